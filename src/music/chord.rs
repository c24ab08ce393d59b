// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord symbols.
//!
//! Parses symbols such as "C", "Am", "G7" or "Bbmaj7" into a root and a
//! quality, stacks the chord tones upward from the root, and answers the
//! triad/seventh classification questions used when suggesting scales.

use std::fmt;

use thiserror::Error;

use super::pitch::{Interval, Pitch, PitchName};

/// Octave used for a chord root when none is given (C4 = middle C)
pub const DEFAULT_ROOT_OCTAVE: i8 = 4;

/// Errors raised while parsing a chord symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    #[error("empty chord symbol")]
    Empty,
    #[error("invalid root in chord symbol '{0}'")]
    InvalidRoot(String),
    #[error("unknown chord quality '{suffix}' in chord symbol '{symbol}'")]
    UnknownQuality { symbol: String, suffix: String },
}

/// Chord qualities understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
    HalfDiminished,
    DiminishedSeventh,
    Sixth,
    MinorSixth,
}

impl ChordQuality {
    /// Every quality, in suffix lookup order
    pub const ALL: [ChordQuality; 13] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::DominantSeventh,
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
        ChordQuality::HalfDiminished,
        ChordQuality::DiminishedSeventh,
        ChordQuality::Sixth,
        ChordQuality::MinorSixth,
    ];

    /// Intervals above the root, in stacking order (root first)
    pub fn intervals(self) -> &'static [Interval] {
        use Interval as I;
        match self {
            ChordQuality::Major => &[I::UNISON, I::MAJOR_THIRD, I::PERFECT_FIFTH],
            ChordQuality::Minor => &[I::UNISON, I::MINOR_THIRD, I::PERFECT_FIFTH],
            ChordQuality::Diminished => &[I::UNISON, I::MINOR_THIRD, I::DIMINISHED_FIFTH],
            ChordQuality::Augmented => &[I::UNISON, I::MAJOR_THIRD, I::AUGMENTED_FIFTH],
            ChordQuality::Sus2 => &[I::UNISON, I::MAJOR_SECOND, I::PERFECT_FIFTH],
            ChordQuality::Sus4 => &[I::UNISON, I::PERFECT_FOURTH, I::PERFECT_FIFTH],
            ChordQuality::DominantSeventh => &[
                I::UNISON,
                I::MAJOR_THIRD,
                I::PERFECT_FIFTH,
                I::MINOR_SEVENTH,
            ],
            ChordQuality::MajorSeventh => &[
                I::UNISON,
                I::MAJOR_THIRD,
                I::PERFECT_FIFTH,
                I::MAJOR_SEVENTH,
            ],
            ChordQuality::MinorSeventh => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::PERFECT_FIFTH,
                I::MINOR_SEVENTH,
            ],
            ChordQuality::HalfDiminished => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::DIMINISHED_FIFTH,
                I::MINOR_SEVENTH,
            ],
            ChordQuality::DiminishedSeventh => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::DIMINISHED_FIFTH,
                I::DIMINISHED_SEVENTH,
            ],
            ChordQuality::Sixth => &[
                I::UNISON,
                I::MAJOR_THIRD,
                I::PERFECT_FIFTH,
                I::MAJOR_SIXTH,
            ],
            ChordQuality::MinorSixth => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::PERFECT_FIFTH,
                I::MAJOR_SIXTH,
            ],
        }
    }

    /// Accepted symbol suffixes. Matching is exact, so "M7" and "m7" differ.
    pub fn suffixes(self) -> &'static [&'static str] {
        match self {
            ChordQuality::Major => &["", "M", "maj", "Maj", "major"],
            ChordQuality::Minor => &["m", "min", "mi", "minor"],
            ChordQuality::Diminished => &["dim", "°", "o"],
            ChordQuality::Augmented => &["aug", "+"],
            ChordQuality::Sus2 => &["sus2"],
            ChordQuality::Sus4 => &["sus", "sus4"],
            ChordQuality::DominantSeventh => &["7", "dom7"],
            ChordQuality::MajorSeventh => &["maj7", "Maj7", "M7", "Δ7", "Δ"],
            ChordQuality::MinorSeventh => &["m7", "min7", "mi7"],
            ChordQuality::HalfDiminished => &["m7b5", "ø", "ø7"],
            ChordQuality::DiminishedSeventh => &["dim7", "°7", "o7"],
            ChordQuality::Sixth => &["6", "maj6"],
            ChordQuality::MinorSixth => &["m6", "min6"],
        }
    }

    /// Look up a quality by its symbol suffix
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|quality| quality.suffixes().contains(&suffix))
    }
}

/// Classification used to pick improvisation scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordClass {
    MajorTriad,
    MinorTriad,
    DominantSeventh,
    Other,
}

/// A parsed chord with its stacked pitches
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    symbol: String,
    quality: ChordQuality,
    pitches: Vec<Pitch>,
}

impl Chord {
    /// Parse a chord symbol with its root in the default octave
    pub fn parse(symbol: &str) -> Result<Self, ChordError> {
        Self::parse_with_octave(symbol, DEFAULT_ROOT_OCTAVE)
    }

    /// Parse a chord symbol with its root in the given octave
    pub fn parse_with_octave(symbol: &str, root_octave: i8) -> Result<Self, ChordError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ChordError::Empty);
        }

        let (root_name, suffix) = PitchName::parse_prefix(symbol)
            .ok_or_else(|| ChordError::InvalidRoot(symbol.to_string()))?;

        let quality =
            ChordQuality::from_suffix(suffix).ok_or_else(|| ChordError::UnknownQuality {
                symbol: symbol.to_string(),
                suffix: suffix.to_string(),
            })?;

        let root = Pitch::new(root_name, root_octave);
        let pitches = quality
            .intervals()
            .iter()
            .map(|&interval| root.transpose(interval))
            .collect();

        Ok(Self {
            symbol: symbol.to_string(),
            quality,
            pitches,
        })
    }

    /// The symbol this chord was parsed from
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The chord quality
    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    /// Root pitch
    pub fn root(&self) -> Pitch {
        self.pitches[0]
    }

    /// Root pitch name without octave
    pub fn root_name(&self) -> PitchName {
        self.root().name()
    }

    /// Constituent pitches, root first, ascending
    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    /// Semitone distances of each chord tone above the root
    fn semitones_above_root(&self) -> Vec<i16> {
        let root = self.root().midi();
        self.pitches.iter().map(|p| p.midi() - root).collect()
    }

    /// Root, major third and perfect fifth, nothing else
    pub fn is_major_triad(&self) -> bool {
        self.semitones_above_root() == [0, 4, 7]
    }

    /// Root, minor third and perfect fifth, nothing else
    pub fn is_minor_triad(&self) -> bool {
        self.semitones_above_root() == [0, 3, 7]
    }

    /// Major triad plus a minor seventh
    pub fn is_dominant_seventh(&self) -> bool {
        self.semitones_above_root() == [0, 4, 7, 10]
    }

    /// Exactly one classification per chord
    pub fn classify(&self) -> ChordClass {
        if self.is_major_triad() {
            ChordClass::MajorTriad
        } else if self.is_minor_triad() {
            ChordClass::MinorTriad
        } else if self.is_dominant_seventh() {
            ChordClass::DominantSeventh
        } else {
            ChordClass::Other
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
