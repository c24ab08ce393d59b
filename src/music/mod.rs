// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory primitives for exercise generation.
//!
//! This module provides spelled pitches, chord-symbol parsing and
//! classification, scale derivation and song-key parsing.

pub mod chord;
pub mod pitch;
pub mod scale;

pub use chord::{Chord, ChordClass, ChordError, ChordQuality};
pub use pitch::{Interval, Letter, MidiNote, Pitch, PitchName};
pub use scale::{Key, KeyError, Mode, Scale, ScaleFamily, ScaleType};
