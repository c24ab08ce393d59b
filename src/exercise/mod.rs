// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Improvisation exercise generation.
//!
//! Turns a whitespace-separated chord progression and a song key into a
//! Markdown practice report (scales, arpeggios, a melody idea and a practice
//! tip) plus a MIDI file of the arpeggios. One call, no shared state.

pub mod advisor;
pub mod arpeggio;
pub mod melody;

pub use advisor::{suggest, suggest_for_chord, ScaleSuggestion};
pub use melody::{IndexDraw, MelodySettings, RngDraw, MELODY_FALLBACK};

use std::io::Cursor;

use thiserror::Error;
use tracing::debug;

use crate::export::{self, ExportError, MidiSettings};
use crate::music::chord::DEFAULT_ROOT_OCTAVE;
use crate::music::{Chord, ChordError};

/// Returned instead of a report when the progression has no chords
pub const EMPTY_PROGRESSION_MESSAGE: &str = "Please enter a chord progression.";

/// Song key used when none is given
pub const DEFAULT_SONG_KEY: &str = "C major";

/// Closing line of every report
pub const PRACTICE_TIP: &str = "Practice Tip: Start slow, loop the progression, and gradually add your own variations using the scales above.";

/// Failures that abort exercise generation
#[derive(Debug, Error)]
pub enum ExerciseError {
    #[error(transparent)]
    Chord(#[from] ChordError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A generated exercise: report text and MIDI file
#[derive(Debug, Clone)]
pub struct Exercise {
    /// Markdown report
    pub report: String,
    /// MIDI file, positioned at its start
    pub midi: Cursor<Vec<u8>>,
}

/// Result of a generation request
#[derive(Debug, Clone)]
pub enum ExerciseOutcome {
    /// Plain message for the user, no exercise produced
    Message(String),
    /// Full exercise
    Exercise(Exercise),
}

impl ExerciseOutcome {
    /// The text to display: the report or the message
    pub fn text(&self) -> &str {
        match self {
            ExerciseOutcome::Message(message) => message,
            ExerciseOutcome::Exercise(exercise) => &exercise.report,
        }
    }

    /// MIDI bytes, when an exercise was produced
    pub fn midi_bytes(&self) -> Option<&[u8]> {
        match self {
            ExerciseOutcome::Message(_) => None,
            ExerciseOutcome::Exercise(exercise) => Some(exercise.midi.get_ref()),
        }
    }
}

/// Settings shared by every generation request
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSettings {
    /// Octave of each chord root
    pub root_octave: i8,
    /// Melody slice windows
    pub melody: MelodySettings,
    /// MIDI rendering
    pub midi: MidiSettings,
}

impl Default for ExerciseSettings {
    fn default() -> Self {
        Self {
            root_octave: DEFAULT_ROOT_OCTAVE,
            melody: MelodySettings::default(),
            midi: MidiSettings::default(),
        }
    }
}

/// Generates exercises from progression text
#[derive(Debug, Clone, Default)]
pub struct ExerciseGenerator {
    settings: ExerciseSettings,
}

impl ExerciseGenerator {
    /// Create a generator with the given settings
    pub fn new(settings: ExerciseSettings) -> Self {
        Self { settings }
    }

    /// Get the settings
    pub fn settings(&self) -> &ExerciseSettings {
        &self.settings
    }

    /// Build the report and MIDI file for a progression.
    ///
    /// An empty progression yields [`EMPTY_PROGRESSION_MESSAGE`]. Any chord
    /// that fails to parse aborts the whole request; an unreadable key only
    /// replaces the melody idea with [`MELODY_FALLBACK`].
    pub fn generate(
        &self,
        progression: &str,
        song_key: &str,
        draw: &mut dyn IndexDraw,
    ) -> Result<ExerciseOutcome, ExerciseError> {
        let tokens: Vec<&str> = progression.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(ExerciseOutcome::Message(EMPTY_PROGRESSION_MESSAGE.to_string()));
        }

        let chords = tokens
            .iter()
            .map(|token| Chord::parse_with_octave(token, self.settings.root_octave))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(chords = chords.len(), key = song_key, "generating exercises");

        let report = self.report(&tokens, &chords, song_key, draw);
        let midi = export::export_arpeggios(&chords, &self.settings.midi)?;

        Ok(ExerciseOutcome::Exercise(Exercise { report, midi }))
    }

    fn report(
        &self,
        tokens: &[&str],
        chords: &[Chord],
        song_key: &str,
        draw: &mut dyn IndexDraw,
    ) -> String {
        let mut output = format!(
            "**Song Key:** {}\n**Chord Progression:** {}\n\n",
            song_key,
            tokens.join(" ")
        );

        output.push_str("### Suggested Scales for Improvisation:\n");
        for chord in chords {
            output.push_str(&format!(
                "- Over {}: {}\n",
                chord.symbol(),
                advisor::suggestion_line(chord)
            ));
        }

        output.push_str("\n### Arpeggio Exercises (Practice in both hands, ascending/descending):\n");
        for chord in chords {
            output.push_str(&format!(
                "- For {}: {}\n",
                chord.symbol(),
                arpeggio::format(chord)
            ));
        }

        let melody = melody::sketch(chords, song_key, &self.settings.melody, draw);
        output.push_str(&format!(
            "\n### Simple Melody Improv Idea (Play over the progression):\n{}\n\n",
            melody
        ));
        output.push_str(PRACTICE_TIP);

        output
    }
}

/// Generate with default settings and entropy-seeded melody draws
pub fn generate_exercises(
    progression: &str,
    song_key: &str,
) -> Result<ExerciseOutcome, ExerciseError> {
    ExerciseGenerator::default().generate(progression, song_key, &mut RngDraw::from_entropy())
}
