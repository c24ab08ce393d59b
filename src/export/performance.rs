// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Arpeggio performance timing.
//!
//! Lays out each chord's pitches one after another on a single running
//! time cursor, with a rest between chords. Times are in beats (quarter
//! notes); the exporter converts them to ticks.

use crate::music::{Chord, MidiNote};

use super::ExportError;

/// A single note of the performance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    /// MIDI channel (0-15)
    pub channel: u8,
    /// MIDI note number (0-127)
    pub pitch: MidiNote,
    /// Onset in beats from the start
    pub onset: u32,
    /// Duration in beats
    pub duration: u32,
    /// Velocity (1-127)
    pub velocity: u8,
}

impl NoteEvent {
    /// Beat at which the note stops sounding
    pub fn end(&self) -> u32 {
        self.onset + self.duration
    }
}

/// Timing and dynamics of the arpeggio performance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceSettings {
    /// MIDI channel for every note
    pub channel: u8,
    /// Velocity for every note
    pub velocity: u8,
    /// Length of each note in beats
    pub note_beats: u32,
    /// Silence after each chord in beats
    pub rest_beats: u32,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            channel: 0,
            velocity: 100,
            note_beats: 1,
            rest_beats: 2,
        }
    }
}

/// Build the note sequence for a progression: every chord pitch in
/// root-to-top order, one after another, then a rest before the next chord.
pub fn arpeggio_events(
    chords: &[Chord],
    settings: &PerformanceSettings,
) -> Result<Vec<NoteEvent>, ExportError> {
    let mut events = Vec::new();
    let mut time = 0u32;

    for chord in chords {
        for pitch in chord.pitches() {
            let note = pitch.midi_note().ok_or_else(|| ExportError::PitchOutOfRange {
                pitch: pitch.name_with_octave(),
            })?;
            events.push(NoteEvent {
                channel: settings.channel,
                pitch: note,
                onset: time,
                duration: settings.note_beats,
                velocity: settings.velocity,
            });
            time += settings.note_beats;
        }
        time += settings.rest_beats;
    }

    Ok(events)
}
