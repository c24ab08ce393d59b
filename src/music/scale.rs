// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale and key system for musical operations.
//!
//! Provides spelled scale definitions, derivation of a scale from any
//! tonic, song-key parsing and the major/minor family choice that seeds
//! melody sketches.

use std::fmt;

use thiserror::Error;

use super::pitch::{Interval, Pitch, PitchName};

/// Scale types offered as improvisation suggestions or melody templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleType {
    // Major scale and modes
    Major,        // Ionian
    Dorian,       // Minor with raised 6th
    Lydian,       // Major with raised 4th
    Mixolydian,   // Major with lowered 7th
    NaturalMinor, // Aeolian

    // Seventh mode of melodic minor, for altered dominants
    Altered,
}

impl ScaleType {
    /// Spelled intervals from the tonic for each of the seven degrees
    pub fn intervals(self) -> [Interval; 7] {
        use Interval as I;
        match self {
            ScaleType::Major => [
                I::UNISON, I::MAJOR_SECOND, I::MAJOR_THIRD, I::PERFECT_FOURTH,
                I::PERFECT_FIFTH, I::MAJOR_SIXTH, I::MAJOR_SEVENTH,
            ],
            ScaleType::Dorian => [
                I::UNISON, I::MAJOR_SECOND, I::MINOR_THIRD, I::PERFECT_FOURTH,
                I::PERFECT_FIFTH, I::MAJOR_SIXTH, I::MINOR_SEVENTH,
            ],
            ScaleType::Lydian => [
                I::UNISON, I::MAJOR_SECOND, I::MAJOR_THIRD, I::AUGMENTED_FOURTH,
                I::PERFECT_FIFTH, I::MAJOR_SIXTH, I::MAJOR_SEVENTH,
            ],
            ScaleType::Mixolydian => [
                I::UNISON, I::MAJOR_SECOND, I::MAJOR_THIRD, I::PERFECT_FOURTH,
                I::PERFECT_FIFTH, I::MAJOR_SIXTH, I::MINOR_SEVENTH,
            ],
            ScaleType::NaturalMinor => [
                I::UNISON, I::MAJOR_SECOND, I::MINOR_THIRD, I::PERFECT_FOURTH,
                I::PERFECT_FIFTH, I::MINOR_SIXTH, I::MINOR_SEVENTH,
            ],
            ScaleType::Altered => [
                I::UNISON, I::MINOR_SECOND, I::AUGMENTED_SECOND, I::MAJOR_THIRD,
                I::AUGMENTED_FOURTH, I::MINOR_SIXTH, I::MINOR_SEVENTH,
            ],
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Dorian => "Dorian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::Altered => "Altered",
        }
    }

    /// Name used when suggesting the scale for improvisation
    pub fn improv_name(self) -> &'static str {
        match self {
            ScaleType::Major => "Ionian (Major)",
            ScaleType::NaturalMinor => "Aeolian (Natural Minor)",
            ScaleType::Altered => "Altered Dominant",
            other => other.name(),
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A complete scale with tonic and type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    tonic: PitchName,
    scale_type: ScaleType,
}

impl Scale {
    /// Derive a scale of the given type on a tonic
    pub fn new(tonic: PitchName, scale_type: ScaleType) -> Self {
        Self { tonic, scale_type }
    }

    /// Get the tonic
    pub fn tonic(&self) -> PitchName {
        self.tonic
    }

    /// Get the scale type
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Pitches of degrees 1 through 8, starting on the tonic in `octave`
    /// and closing on the tonic an octave above.
    pub fn pitches(&self, octave: i8) -> Vec<Pitch> {
        let tonic = Pitch::new(self.tonic, octave);
        let mut pitches: Vec<Pitch> = self
            .scale_type
            .intervals()
            .iter()
            .map(|&interval| tonic.transpose(interval))
            .collect();
        pitches.push(tonic.transpose(Interval::OCTAVE));
        pitches
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.scale_type)
    }
}

/// Which scale template seeds a melody sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleFamily {
    Major,
    Minor,
}

impl ScaleFamily {
    /// Minor when the key text mentions "minor" in any case, major otherwise
    pub fn from_key_text(key: &str) -> Self {
        if key.to_lowercase().contains("minor") {
            ScaleFamily::Minor
        } else {
            ScaleFamily::Major
        }
    }

    /// Scale type for this family
    pub fn scale_type(self) -> ScaleType {
        match self {
            ScaleFamily::Major => ScaleType::Major,
            ScaleFamily::Minor => ScaleType::NaturalMinor,
        }
    }
}

/// Errors raised while parsing a song key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("empty key")]
    Empty,
    #[error("invalid tonic '{0}'")]
    InvalidTonic(String),
    #[error("unknown mode '{0}' (expected major or minor)")]
    UnknownMode(String),
    #[error("unexpected text after key: '{0}'")]
    TrailingText(String),
}

/// Major or minor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Major,
    Minor,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => write!(f, "major"),
            Mode::Minor => write!(f, "minor"),
        }
    }
}

/// A musical key with tonic and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    tonic: PitchName,
    mode: Mode,
}

impl Key {
    /// Parse a key such as "C major", "a minor", "Bb" or "f#".
    ///
    /// Without a mode word, a lowercase tonic letter means minor.
    pub fn parse(text: &str) -> Result<Self, KeyError> {
        let mut tokens = text.split_whitespace();
        let tonic_text = tokens.next().ok_or(KeyError::Empty)?;
        let tonic = PitchName::parse(tonic_text)
            .ok_or_else(|| KeyError::InvalidTonic(tonic_text.to_string()))?;

        let mode = match tokens.next() {
            Some(word) => match word.to_lowercase().as_str() {
                "major" | "maj" => Mode::Major,
                "minor" | "min" => Mode::Minor,
                _ => return Err(KeyError::UnknownMode(word.to_string())),
            },
            None if tonic_text.starts_with(|c: char| c.is_ascii_lowercase()) => Mode::Minor,
            None => Mode::Major,
        };

        let rest: Vec<&str> = tokens.collect();
        if !rest.is_empty() {
            return Err(KeyError::TrailingText(rest.join(" ")));
        }

        Ok(Self { tonic, mode })
    }

    /// Get the tonic
    pub fn tonic(&self) -> PitchName {
        self.tonic
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::pitch::Letter;

    fn name(s: &str) -> PitchName {
        PitchName::parse(s).unwrap()
    }

    /// Spelled names of the seven degrees
    fn spelled(tonic: &str, scale_type: ScaleType) -> Vec<String> {
        Scale::new(name(tonic), scale_type)
            .pitches(4)
            .iter()
            .take(7)
            .map(|p| p.name().to_string())
            .collect()
    }

    #[test]
    fn test_improv_names() {
        assert_eq!(ScaleType::Major.improv_name(), "Ionian (Major)");
        assert_eq!(ScaleType::NaturalMinor.improv_name(), "Aeolian (Natural Minor)");
        assert_eq!(ScaleType::Altered.improv_name(), "Altered Dominant");
        assert_eq!(ScaleType::Lydian.improv_name(), "Lydian");
        assert_eq!(ScaleType::Dorian.improv_name(), "Dorian");
    }

    #[test]
    fn test_scale_notes() {
        assert_eq!(
            spelled("C", ScaleType::Major),
            vec!["C", "D", "E", "F", "G", "A", "B"]
        );
        assert_eq!(
            spelled("A", ScaleType::NaturalMinor),
            vec!["A", "B", "C", "D", "E", "F", "G"]
        );
        assert_eq!(
            spelled("D", ScaleType::Dorian),
            vec!["D", "E", "F", "G", "A", "B", "C"]
        );
    }

    #[test]
    fn test_scale_spelling_uses_each_letter_once() {
        assert_eq!(
            spelled("F", ScaleType::Major),
            vec!["F", "G", "A", "Bb", "C", "D", "E"]
        );
        assert_eq!(
            spelled("D", ScaleType::Major),
            vec!["D", "E", "F#", "G", "A", "B", "C#"]
        );
        assert_eq!(
            spelled("G", ScaleType::Altered),
            vec!["G", "Ab", "A#", "B", "C#", "Eb", "F"]
        );
        assert_eq!(
            spelled("F", ScaleType::Lydian),
            vec!["F", "G", "A", "B", "C", "D", "E"]
        );
        assert_eq!(
            spelled("Bb", ScaleType::Mixolydian),
            vec!["Bb", "C", "D", "Eb", "F", "G", "Ab"]
        );
    }

    #[test]
    fn test_scale_pitches_span_octave() {
        let g_major = Scale::new(name("G"), ScaleType::Major);
        let pitches: Vec<String> = g_major.pitches(4).iter().map(|p| p.to_string()).collect();
        assert_eq!(
            pitches,
            vec!["G4", "A4", "B4", "C5", "D5", "E5", "F#5", "G5"]
        );
        assert_eq!(g_major.to_string(), "G Major");
    }

    #[test]
    fn test_scale_family_from_key_text() {
        assert_eq!(ScaleFamily::from_key_text("A minor"), ScaleFamily::Minor);
        assert_eq!(ScaleFamily::from_key_text("a MINOR"), ScaleFamily::Minor);
        assert_eq!(ScaleFamily::from_key_text("C major"), ScaleFamily::Major);
        assert_eq!(ScaleFamily::from_key_text("a"), ScaleFamily::Major);
        assert_eq!(ScaleFamily::Minor.scale_type(), ScaleType::NaturalMinor);
    }

    #[test]
    fn test_key_parse() {
        let key = Key::parse("C major").unwrap();
        assert_eq!(key.tonic(), PitchName::natural(Letter::C));
        assert_eq!(key.mode(), Mode::Major);

        let key = Key::parse("  F#   Minor ").unwrap();
        assert_eq!(key.tonic(), PitchName::new(Letter::F, 1));
        assert_eq!(key.mode(), Mode::Minor);

        assert_eq!(Key::parse("Bb").unwrap().mode(), Mode::Major);
        assert_eq!(Key::parse("a").unwrap().mode(), Mode::Minor);
        assert_eq!(Key::parse("A minor").unwrap().to_string(), "A minor");
    }

    #[test]
    fn test_key_parse_errors() {
        assert_eq!(Key::parse(""), Err(KeyError::Empty));
        assert_eq!(Key::parse("   "), Err(KeyError::Empty));
        assert_eq!(
            Key::parse("X major"),
            Err(KeyError::InvalidTonic("X".to_string()))
        );
        assert_eq!(
            Key::parse("C lydian"),
            Err(KeyError::UnknownMode("lydian".to_string()))
        );
        assert_eq!(
            Key::parse("C major please"),
            Err(KeyError::TrailingText("please".to_string()))
        );
    }
}
