// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI export of arpeggio exercises.
//!
//! This module provides:
//! - Arpeggio performance timing (which note plays when)
//! - Standard MIDI file writing

pub mod performance;
pub mod smf;

pub use performance::{arpeggio_events, NoteEvent, PerformanceSettings};
pub use smf::{MidiExporter, MidiFileFormat};

use std::io::{self, Cursor};

use thiserror::Error;
use tracing::debug;

use crate::music::Chord;

/// Errors raised while producing a MIDI file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write MIDI data: {0}")]
    Io(#[from] io::Error),
    #[error("pitch {pitch} is outside the MIDI note range")]
    PitchOutOfRange { pitch: String },
    #[error("performance too long to encode (event at tick {ticks})")]
    TooLong { ticks: u64 },
}

/// Everything that shapes the exported file
#[derive(Debug, Clone, PartialEq)]
pub struct MidiSettings {
    /// Note timing and dynamics
    pub performance: PerformanceSettings,
    /// Tempo in BPM
    pub tempo: f64,
    /// Ticks per quarter note
    pub ppqn: u16,
    /// File format
    pub format: MidiFileFormat,
    /// Optional track-name meta event
    pub track_name: Option<String>,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            performance: PerformanceSettings::default(),
            tempo: 120.0,
            ppqn: 960,
            format: MidiFileFormat::SingleTrack,
            track_name: None,
        }
    }
}

impl MidiSettings {
    /// Exporter configured from these settings
    pub fn exporter(&self) -> MidiExporter {
        let mut exporter = MidiExporter::new();
        exporter.set_format(self.format);
        exporter.set_ppqn(self.ppqn);
        exporter.set_tempo(self.tempo);
        exporter.set_track_name(self.track_name.clone());
        exporter
    }
}

/// Render the arpeggio performance of a progression as a MIDI file.
///
/// The returned cursor is positioned at the start of the data.
pub fn export_arpeggios(
    chords: &[Chord],
    settings: &MidiSettings,
) -> Result<Cursor<Vec<u8>>, ExportError> {
    let events = arpeggio_events(chords, &settings.performance)?;
    let bytes = settings.exporter().export_to_bytes(&events)?;
    debug!(events = events.len(), bytes = bytes.len(), "exported arpeggios");
    Ok(Cursor::new(bytes))
}
