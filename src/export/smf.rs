// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file export.
//!
//! Turns a note sequence into a single-track (format 0) or tempo-plus-notes
//! (format 1) MIDI file. Byte-level encoding is done by `midly`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::performance::NoteEvent;
use super::ExportError;

/// Largest delta time a MIDI event can carry
const MAX_DELTA_TICKS: u64 = 0x0FFF_FFFF;

/// MIDI file format type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidiFileFormat {
    /// Format 0: one track holding tempo and notes
    #[default]
    SingleTrack,
    /// Format 1: a tempo track followed by the note track
    MultiTrack,
}

/// Where an event sorts among others on the same tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Meta,
    NoteOff,
    NoteOn,
}

/// An event at an absolute tick, before delta encoding
struct TimedEvent<'a> {
    tick: u64,
    slot: Slot,
    kind: TrackEventKind<'a>,
}

/// MIDI file exporter
#[derive(Debug, Clone)]
pub struct MidiExporter {
    /// File format
    format: MidiFileFormat,
    /// PPQN (ticks per quarter note)
    ppqn: u16,
    /// Tempo in BPM
    tempo: f64,
    /// Optional name for the note track
    track_name: Option<String>,
}

impl MidiExporter {
    /// Create a new exporter
    pub fn new() -> Self {
        Self {
            format: MidiFileFormat::SingleTrack,
            ppqn: 960,
            tempo: 120.0,
            track_name: None,
        }
    }

    /// Get format
    pub fn format(&self) -> MidiFileFormat {
        self.format
    }

    /// Set format
    pub fn set_format(&mut self, format: MidiFileFormat) {
        self.format = format;
    }

    /// Set PPQN
    pub fn set_ppqn(&mut self, ppqn: u16) {
        self.ppqn = ppqn.clamp(1, 0x7FFF);
    }

    /// Get PPQN
    pub fn ppqn(&self) -> u16 {
        self.ppqn
    }

    /// Set tempo
    pub fn set_tempo(&mut self, bpm: f64) {
        self.tempo = bpm.clamp(20.0, 300.0);
    }

    /// Get tempo
    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// Name the note track
    pub fn set_track_name(&mut self, name: Option<String>) {
        self.track_name = name;
    }

    /// Export to file
    pub fn export<P: AsRef<Path>>(&self, events: &[NoteEvent], path: P) -> Result<(), ExportError> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write(events, &mut file)?;
        file.flush()?;
        Ok(())
    }

    /// Export to bytes
    pub fn export_to_bytes(&self, events: &[NoteEvent]) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        self.write(events, &mut buffer)?;
        Ok(buffer)
    }

    /// Write MIDI data to writer
    pub fn write<W: Write>(&self, events: &[NoteEvent], writer: W) -> Result<(), ExportError> {
        let smf = self.build(events)?;
        smf.write_std(writer)?;
        Ok(())
    }

    /// Assemble the in-memory file
    fn build(&self, events: &[NoteEvent]) -> Result<Smf<'_>, ExportError> {
        let timing = Timing::Metrical(u15::new(self.ppqn));
        let tempo = TimedEvent {
            tick: 0,
            slot: Slot::Meta,
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(self.microseconds_per_beat()))),
        };

        let tracks = match self.format {
            MidiFileFormat::SingleTrack => {
                let mut timed = vec![tempo];
                timed.extend(self.name_event());
                timed.extend(self.note_events(events));
                vec![encode_track(timed)?]
            }
            MidiFileFormat::MultiTrack => {
                let mut notes: Vec<TimedEvent<'_>> = self.name_event().into_iter().collect();
                notes.extend(self.note_events(events));
                vec![encode_track(vec![tempo])?, encode_track(notes)?]
            }
        };

        let format = match self.format {
            MidiFileFormat::SingleTrack => Format::SingleTrack,
            MidiFileFormat::MultiTrack => Format::Parallel,
        };

        debug!(
            notes = events.len(),
            tracks = tracks.len(),
            ppqn = self.ppqn,
            "built MIDI file"
        );

        let mut smf = Smf::new(Header::new(format, timing));
        smf.tracks = tracks;
        Ok(smf)
    }

    fn microseconds_per_beat(&self) -> u32 {
        (60_000_000.0 / self.tempo) as u32
    }

    fn name_event(&self) -> Option<TimedEvent<'_>> {
        self.track_name.as_ref().map(|name| TimedEvent {
            tick: 0,
            slot: Slot::Meta,
            kind: TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
        })
    }

    fn note_events(&self, events: &[NoteEvent]) -> Vec<TimedEvent<'static>> {
        let ppqn = self.ppqn as u64;
        let mut timed = Vec::with_capacity(events.len() * 2);

        for event in events {
            let channel = u4::new(event.channel & 0x0F);
            let key = u7::new(event.pitch & 0x7F);
            timed.push(TimedEvent {
                tick: event.onset as u64 * ppqn,
                slot: Slot::NoteOn,
                kind: TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn {
                        key,
                        vel: u7::new(event.velocity & 0x7F),
                    },
                },
            });
            timed.push(TimedEvent {
                tick: event.end() as u64 * ppqn,
                slot: Slot::NoteOff,
                kind: TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff {
                        key,
                        vel: u7::new(0),
                    },
                },
            });
        }

        timed
    }
}

impl Default for MidiExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort events by time and convert them to delta-timed track events
fn encode_track(mut timed: Vec<TimedEvent<'_>>) -> Result<Track<'_>, ExportError> {
    timed.sort_by_key(|e| (e.tick, e.slot));

    let mut track: Track<'_> = Vec::with_capacity(timed.len() + 1);
    let mut last_tick = 0u64;

    for event in timed {
        let delta = event.tick - last_tick;
        if delta > MAX_DELTA_TICKS {
            return Err(ExportError::TooLong { ticks: event.tick });
        }
        track.push(TrackEvent {
            delta: u28::new(delta as u32),
            kind: event.kind,
        });
        last_tick = event.tick;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    Ok(track)
}
