// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Piano improvisation exercise generator.
//!
//! Given a chord progression and a song key, produces scale suggestions,
//! arpeggio drills, a loose melody idea and a MIDI file of the arpeggios.

pub mod config;
pub mod exercise;
pub mod export;
pub mod logging;
pub mod music;
pub mod ui;

pub use config::ImprovConfig;
pub use exercise::{generate_exercises, ExerciseError, ExerciseGenerator, ExerciseOutcome};
