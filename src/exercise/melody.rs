// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Loose melody ideas drawn from a scale per chord.
//!
//! For each chord a scale of the key's family (major or minor) is built on
//! the chord's own root, and a random contiguous run of its degrees is taken.
//! The runs are concatenated in progression order. This is a sketch
//! generator, not a constraint solver: the output is deliberately loose.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::music::{Chord, Key, KeyError, Scale, ScaleFamily};

/// Text returned instead of a melody when the key cannot be read
pub const MELODY_FALLBACK: &str = "Could not generate melody—check key format (e.g., 'C major').";

/// Source of the two index draws made per chord
pub trait IndexDraw {
    /// Return an integer uniformly drawn from `range` (inclusive)
    fn draw(&mut self, range: RangeInclusive<usize>) -> usize;
}

/// `IndexDraw` backed by a `rand` generator
pub struct RngDraw<R> {
    rng: R,
}

impl<R: Rng> RngDraw<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDraw<StdRng> {
    /// Seed from system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible draws from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> IndexDraw for RngDraw<R> {
    fn draw(&mut self, range: RangeInclusive<usize>) -> usize {
        self.rng.gen_range(range)
    }
}

/// Window settings for the per-chord slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MelodySettings {
    /// Range of the first index taken
    pub start_range: RangeInclusive<usize>,
    /// Range of the exclusive end index
    pub end_range: RangeInclusive<usize>,
}

impl Default for MelodySettings {
    fn default() -> Self {
        Self {
            start_range: 0..=4,
            end_range: 5..=7,
        }
    }
}

/// Build the melody sketch for a whole progression.
///
/// Never fails: a key that cannot be parsed yields [`MELODY_FALLBACK`]
/// and no partial output.
pub fn sketch(
    chords: &[Chord],
    key_text: &str,
    settings: &MelodySettings,
    draw: &mut dyn IndexDraw,
) -> String {
    match try_sketch(chords, key_text, settings, draw) {
        Ok(melody) => melody,
        Err(_) => MELODY_FALLBACK.to_string(),
    }
}

/// Build the melody sketch, reporting why the key was rejected
pub fn try_sketch(
    chords: &[Chord],
    key_text: &str,
    settings: &MelodySettings,
    draw: &mut dyn IndexDraw,
) -> Result<String, KeyError> {
    Key::parse(key_text)?;
    let family = ScaleFamily::from_key_text(key_text);
    debug!(chords = chords.len(), ?family, "sketching melody");

    let mut notes: Vec<String> = Vec::new();
    for chord in chords {
        let root = chord.root();
        let pitches = Scale::new(root.name(), family.scale_type()).pitches(root.octave());

        let start = draw.draw(settings.start_range.clone());
        let end = draw.draw(settings.end_range.clone()).min(pitches.len());
        if start < end {
            notes.extend(pitches[start..end].iter().map(|p| p.name_with_octave()));
        }
    }

    Ok(notes.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays fixed draws, asserting each lies in the requested range
    struct FixedDraw {
        values: VecDeque<usize>,
    }

    impl FixedDraw {
        fn new(values: &[usize]) -> Self {
            Self {
                values: values.iter().copied().collect(),
            }
        }
    }

    impl IndexDraw for FixedDraw {
        fn draw(&mut self, range: RangeInclusive<usize>) -> usize {
            let value = self.values.pop_front().expect("ran out of draws");
            assert!(range.contains(&value), "{} not in {:?}", value, range);
            value
        }
    }

    fn chords(symbols: &[&str]) -> Vec<Chord> {
        symbols.iter().map(|s| Chord::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_fixed_draws_major() {
        let mut draw = FixedDraw::new(&[0, 5, 2, 7]);
        let melody = sketch(
            &chords(&["C", "G"]),
            "C major",
            &MelodySettings::default(),
            &mut draw,
        );
        assert_eq!(melody, "C4 D4 E4 F4 G4 B4 C5 D5 E5 F#5");
    }

    #[test]
    fn test_fixed_draws_minor_family() {
        let mut draw = FixedDraw::new(&[4, 7]);
        let melody = sketch(
            &chords(&["Am"]),
            "A minor",
            &MelodySettings::default(),
            &mut draw,
        );
        // A natural minor from A4: A4 B4 C5 D5 E5 F5 G5 A5
        assert_eq!(melody, "E5 F5 G5");
    }

    #[test]
    fn test_scale_is_built_on_each_chord_root() {
        let mut draw = FixedDraw::new(&[0, 5, 0, 5]);
        let melody = sketch(
            &chords(&["F", "D"]),
            "C major",
            &MelodySettings::default(),
            &mut draw,
        );
        assert_eq!(melody, "F4 G4 A4 Bb4 C5 D4 E4 F#4 G4 A4");
    }

    #[test]
    fn test_invalid_key_falls_back() {
        for key in ["", "H major", "C lydian", "C major please"] {
            let mut draw = FixedDraw::new(&[]);
            let melody = sketch(
                &chords(&["C", "Am"]),
                key,
                &MelodySettings::default(),
                &mut draw,
            );
            assert_eq!(melody, MELODY_FALLBACK);
        }
    }

    #[test]
    fn test_try_sketch_reports_key_error() {
        let mut draw = FixedDraw::new(&[]);
        let result = try_sketch(
            &chords(&["C"]),
            "Q",
            &MelodySettings::default(),
            &mut draw,
        );
        assert_eq!(result, Err(KeyError::InvalidTonic("Q".to_string())));
    }

    #[test]
    fn test_empty_slice_when_start_not_before_end() {
        let settings = MelodySettings {
            start_range: 6..=6,
            end_range: 5..=5,
        };
        let mut draw = FixedDraw::new(&[6, 5]);
        assert_eq!(sketch(&chords(&["C"]), "C major", &settings, &mut draw), "");
    }

    #[test]
    fn test_seeded_draws_stay_in_scale() {
        let progression = chords(&["C", "Am", "F", "G7"]);
        let mut draw = RngDraw::seeded(42);
        let melody = sketch(&progression, "C major", &MelodySettings::default(), &mut draw);

        let allowed: Vec<String> = progression
            .iter()
            .flat_map(|c| {
                Scale::new(c.root_name(), ScaleFamily::Major.scale_type())
                    .pitches(c.root().octave())
            })
            .map(|p| p.name_with_octave())
            .collect();

        let tokens: Vec<&str> = melody.split(' ').collect();
        assert!(tokens.len() >= progression.len());
        assert!(tokens.len() <= progression.len() * 7);
        for token in tokens {
            assert!(allowed.iter().any(|a| a == token), "{} not in scales", token);
        }
    }

    #[test]
    fn test_same_seed_same_melody() {
        let progression = chords(&["C", "Am", "F", "G"]);
        let settings = MelodySettings::default();
        let first = sketch(&progression, "C major", &settings, &mut RngDraw::seeded(7));
        let second = sketch(&progression, "C major", &settings, &mut RngDraw::seeded(7));
        assert_eq!(first, second);
    }
}
