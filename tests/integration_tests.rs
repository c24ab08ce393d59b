// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for improv
//!
//! These tests drive the public API end to end: progression text in,
//! report text and MIDI bytes out.

use std::fs;

use midly::num::u15;
use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use tempfile::tempdir;

use improv::config::ImprovConfig;
use improv::exercise::{
    ExerciseError, ExerciseGenerator, ExerciseOutcome, ExerciseSettings, RngDraw,
    EMPTY_PROGRESSION_MESSAGE, MELODY_FALLBACK, PRACTICE_TIP,
};
use improv::export::MidiFileFormat;
use improv::music::{Chord, ChordError};

fn generate(progression: &str, key: &str, seed: u64) -> ExerciseOutcome {
    ExerciseGenerator::default()
        .generate(progression, key, &mut RngDraw::seeded(seed))
        .unwrap()
}

/// Note-on events as (absolute tick, key, velocity), across all tracks
fn note_ons(bytes: &[u8]) -> Vec<(u64, u8, u8)> {
    let smf = Smf::parse(bytes).unwrap();
    let mut notes = Vec::new();
    for track in &smf.tracks {
        let mut tick = 0u64;
        for event in track {
            tick += event.delta.as_int() as u64;
            if let TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } = event.kind
            {
                if vel.as_int() > 0 {
                    notes.push((tick, key.as_int(), vel.as_int()));
                }
            }
        }
    }
    notes
}

fn tempo(bytes: &[u8]) -> Option<u32> {
    let smf = Smf::parse(bytes).unwrap();
    smf.tracks.iter().flatten().find_map(|event| match event.kind {
        TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
        _ => None,
    })
}

/// Section lines that follow a heading, up to the next blank line
fn section<'a>(report: &'a str, heading: &str) -> Vec<&'a str> {
    report
        .lines()
        .skip_while(|line| !line.starts_with(heading))
        .skip(1)
        .take_while(|line| !line.is_empty())
        .collect()
}

#[test]
fn test_header_echoes_input() {
    let outcome = generate("C G", "C major", 1);
    assert!(outcome
        .text()
        .starts_with("**Song Key:** C major\n**Chord Progression:** C G\n\n"));
}

#[test]
fn test_scale_suggestions_per_chord() {
    let outcome = generate("C Am G7 Bdim", "C major", 1);
    let lines = section(outcome.text(), "### Suggested Scales");
    assert_eq!(
        lines,
        vec![
            "- Over C: C Ionian (Major), C Lydian",
            "- Over Am: A Dorian, A Aeolian (Natural Minor)",
            "- Over G7: G Mixolydian, G Altered Dominant",
            "- Over Bdim: B Major (default)",
        ]
    );
}

#[test]
fn test_arpeggio_lines() {
    let outcome = generate("C Bb7", "C major", 1);
    let lines = section(outcome.text(), "### Arpeggio Exercises");
    assert_eq!(
        lines,
        vec![
            "- For C: C4 -> E4 -> G4 -> C5 -> C5 -> G4 -> E4 -> C4",
            "- For Bb7: Bb4 -> D5 -> F5 -> Ab5 -> Bb5 -> Bb5 -> Ab5 -> F5 -> D5 -> Bb4",
        ]
    );
}

#[test]
fn test_report_sections_in_order() {
    let outcome = generate("C Am F G", "C major", 3);
    let text = outcome.text();
    let positions: Vec<usize> = [
        "**Song Key:**",
        "### Suggested Scales for Improvisation:",
        "### Arpeggio Exercises (Practice in both hands, ascending/descending):",
        "### Simple Melody Improv Idea (Play over the progression):",
        PRACTICE_TIP,
    ]
    .iter()
    .map(|marker| text.find(marker).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.ends_with(PRACTICE_TIP));
}

#[test]
fn test_empty_progression_message_only() {
    for input in ["", "    ", "\t\n"] {
        let outcome = generate(input, "C major", 1);
        assert_eq!(outcome.text(), EMPTY_PROGRESSION_MESSAGE);
        assert!(outcome.midi_bytes().is_none());
    }
}

#[test]
fn test_invalid_key_keeps_rest_of_report() {
    let outcome = generate("C Am", "Z lydian", 1);
    let melody = section(outcome.text(), "### Simple Melody");
    assert_eq!(melody, vec![MELODY_FALLBACK]);
    assert_eq!(section(outcome.text(), "### Arpeggio Exercises").len(), 2);
    assert!(outcome.midi_bytes().is_some());
}

#[test]
fn test_bad_chord_is_hard_error() {
    let result = ExerciseGenerator::default().generate("C Qm7", "C major", &mut RngDraw::seeded(1));
    assert!(matches!(
        result,
        Err(ExerciseError::Chord(ChordError::InvalidRoot(_)))
    ));
}

#[test]
fn test_same_seed_same_report() {
    let first = generate("Dm7 G7 Cmaj7", "C major", 11);
    let second = generate("Dm7 G7 Cmaj7", "C major", 11);
    assert_eq!(first.text(), second.text());
}

#[test]
fn test_midi_notes_match_chords() {
    let progression = "C Am F G7";
    let outcome = generate(progression, "C major", 1);
    let bytes = outcome.midi_bytes().unwrap();

    let expected: Vec<u8> = progression
        .split_whitespace()
        .flat_map(|symbol| {
            Chord::parse(symbol)
                .unwrap()
                .pitches()
                .iter()
                .map(|p| p.midi_note().unwrap())
                .collect::<Vec<_>>()
        })
        .collect();

    let notes = note_ons(bytes);
    let keys: Vec<u8> = notes.iter().map(|&(_, key, _)| key).collect();
    assert_eq!(keys, expected);
    assert_eq!(notes.len(), 3 + 3 + 3 + 4);

    assert!(notes.windows(2).all(|w| w[0].0 <= w[1].0));
    assert!(notes.iter().all(|&(_, _, vel)| vel == 100));

    // One beat per note, two-beat rest after each chord, 960 ticks per beat
    let ticks: Vec<u64> = notes.iter().map(|&(tick, _, _)| tick / 960).collect();
    assert_eq!(ticks, vec![0, 1, 2, 5, 6, 7, 10, 11, 12, 15, 16, 17, 18]);
}

#[test]
fn test_midi_header_and_tempo() {
    let outcome = generate("C", "C major", 1);
    let bytes = outcome.midi_bytes().unwrap();
    let smf = Smf::parse(bytes).unwrap();

    assert_eq!(smf.header.format, Format::SingleTrack);
    assert_eq!(smf.header.timing, Timing::Metrical(u15::new(960)));
    assert_eq!(smf.tracks.len(), 1);
    // 120 BPM
    assert_eq!(tempo(bytes), Some(500_000));
}

#[test]
fn test_config_drives_generation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("improv.yaml");
    fs::write(
        &path,
        r#"
chords:
  root_octave: 3
midi:
  tempo: 90
  velocity: 64
  format: multi_track
  track_name: "Arpeggios"
"#,
    )
    .unwrap();

    let config = ImprovConfig::load(&path).unwrap();
    assert_eq!(config.midi.format, MidiFileFormat::MultiTrack);

    let generator = ExerciseGenerator::new(config.exercise_settings());
    let outcome = generator
        .generate("C", "C major", &mut RngDraw::seeded(1))
        .unwrap();
    assert!(outcome
        .text()
        .contains("- For C: C3 -> E3 -> G3 -> C4 -> C4 -> G3 -> E3 -> C3"));

    let bytes = outcome.midi_bytes().unwrap();
    let smf = Smf::parse(bytes).unwrap();
    assert_eq!(smf.header.format, Format::Parallel);
    assert_eq!(smf.tracks.len(), 2);
    assert_eq!(tempo(bytes), Some(666_666));

    let notes = note_ons(bytes);
    let keys: Vec<u8> = notes.iter().map(|&(_, key, _)| key).collect();
    assert_eq!(keys, vec![48, 52, 55]);
    assert!(notes.iter().all(|&(_, _, vel)| vel == 64));
}

#[test]
fn test_default_config_matches_default_settings() {
    let config = ImprovConfig::from_yaml("").unwrap();
    assert_eq!(config.exercise_settings(), ExerciseSettings::default());
}
