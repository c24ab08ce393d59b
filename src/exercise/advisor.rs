// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale suggestions for improvising over a chord.

use std::fmt;

use crate::music::{Chord, ChordClass, PitchName, ScaleType};

/// One suggested scale, rendered as e.g. "G Mixolydian"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleSuggestion {
    root: PitchName,
    scale_type: ScaleType,
    fallback: bool,
}

impl ScaleSuggestion {
    fn new(root: PitchName, scale_type: ScaleType) -> Self {
        Self {
            root,
            scale_type,
            fallback: false,
        }
    }

    fn fallback(root: PitchName) -> Self {
        Self {
            root,
            scale_type: ScaleType::Major,
            fallback: true,
        }
    }

    /// Root the scale is built on
    pub fn root(&self) -> PitchName {
        self.root
    }

    /// Suggested scale type
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// True when the chord was not a recognized triad or dominant seventh
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl fmt::Display for ScaleSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fallback {
            write!(f, "{} Major (default)", self.root)
        } else {
            write!(f, "{} {}", self.root, self.scale_type.improv_name())
        }
    }
}

/// Map a chord classification and root to an ordered, non-empty list of scales.
///
/// The song key plays no part here; only the chord decides.
pub fn suggest(class: ChordClass, root: PitchName) -> Vec<ScaleSuggestion> {
    match class {
        ChordClass::MajorTriad => vec![
            ScaleSuggestion::new(root, ScaleType::Major),
            ScaleSuggestion::new(root, ScaleType::Lydian),
        ],
        ChordClass::MinorTriad => vec![
            ScaleSuggestion::new(root, ScaleType::Dorian),
            ScaleSuggestion::new(root, ScaleType::NaturalMinor),
        ],
        ChordClass::DominantSeventh => vec![
            ScaleSuggestion::new(root, ScaleType::Mixolydian),
            ScaleSuggestion::new(root, ScaleType::Altered),
        ],
        ChordClass::Other => vec![ScaleSuggestion::fallback(root)],
    }
}

/// Suggestions for a parsed chord
pub fn suggest_for_chord(chord: &Chord) -> Vec<ScaleSuggestion> {
    suggest(chord.classify(), chord.root_name())
}

/// Comma-joined suggestion text for a chord
pub fn suggestion_line(chord: &Chord) -> String {
    suggest_for_chord(chord)
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
