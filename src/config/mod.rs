// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the exercise generator.
//!
//! Every field has a default, so an empty file (or no file at all) gives
//! the stock behavior: C major pre-filled, roots in octave 4, 120 BPM.
//! Files are YAML unless the extension is `.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::exercise::{ExerciseSettings, MelodySettings, DEFAULT_SONG_KEY};
use crate::export::{MidiFileFormat, MidiSettings, PerformanceSettings};
use crate::logging::parse_level;
use crate::music::chord::DEFAULT_ROOT_OCTAVE;
use crate::music::Key;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImprovConfig {
    /// Form defaults
    pub exercise: ExerciseConfig,
    /// Chord voicing
    pub chords: ChordsConfig,
    /// Melody sketch windows
    pub melody: MelodyConfig,
    /// MIDI rendering
    pub midi: MidiConfig,
    /// Where MIDI files are written
    pub output: OutputConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl ImprovConfig {
    /// Load and validate a configuration file (YAML, or TOML by extension)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        let config = if is_toml {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if let Err(err) = Key::parse(&self.exercise.default_key) {
            bail!("exercise.default_key {:?}: {}", self.exercise.default_key, err);
        }

        ensure!(
            (-1..=8).contains(&self.chords.root_octave),
            "chords.root_octave must be between -1 and 8, got {}",
            self.chords.root_octave
        );

        let midi = &self.midi;
        ensure!(
            (20.0..=300.0).contains(&midi.tempo),
            "midi.tempo must be between 20 and 300 BPM, got {}",
            midi.tempo
        );
        ensure!(
            (1..=127).contains(&midi.velocity),
            "midi.velocity must be between 1 and 127, got {}",
            midi.velocity
        );
        ensure!(
            midi.channel <= 15,
            "midi.channel must be between 0 and 15, got {}",
            midi.channel
        );
        ensure!(midi.ppqn >= 1, "midi.ppqn must be at least 1");
        ensure!(midi.ppqn <= 0x7FFF, "midi.ppqn must be at most 32767, got {}", midi.ppqn);
        ensure!(midi.note_beats >= 1, "midi.note_beats must be at least 1");

        check_range("melody.start_range", self.melody.start_range, 0, 7)?;
        check_range("melody.end_range", self.melody.end_range, 1, 8)?;

        ensure!(
            !self.output.file_name.trim().is_empty(),
            "output.file_name must not be empty"
        );
        parse_level(&self.logging.level).context("logging.level")?;
        Ok(())
    }

    /// Generation settings described by this configuration
    pub fn exercise_settings(&self) -> ExerciseSettings {
        ExerciseSettings {
            root_octave: self.chords.root_octave,
            melody: self.melody.settings(),
            midi: self.midi.settings(),
        }
    }
}

fn check_range(name: &str, range: [usize; 2], min: usize, max: usize) -> Result<()> {
    let [low, high] = range;
    ensure!(low <= high, "{} low bound {} exceeds high bound {}", name, low, high);
    ensure!(
        low >= min && high <= max,
        "{} must lie within {}..={}, got {}..={}",
        name,
        min,
        max,
        low,
        high
    );
    Ok(())
}

/// Form defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExerciseConfig {
    /// Song key pre-filled in the form and used by one-shot runs
    pub default_key: String,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            default_key: DEFAULT_SONG_KEY.to_string(),
        }
    }
}

/// Chord voicing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChordsConfig {
    /// Octave of every chord root
    pub root_octave: i8,
}

impl Default for ChordsConfig {
    fn default() -> Self {
        Self {
            root_octave: DEFAULT_ROOT_OCTAVE,
        }
    }
}

/// Melody sketch windows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MelodyConfig {
    /// Inclusive range of the slice start
    #[serde(default = "default_start_range")]
    pub start_range: [usize; 2],
    /// Inclusive range of the exclusive slice end
    #[serde(default = "default_end_range")]
    pub end_range: [usize; 2],
    /// Fixed seed for reproducible sketches
    pub seed: Option<u64>,
}

fn default_start_range() -> [usize; 2] {
    [0, 4]
}
fn default_end_range() -> [usize; 2] {
    [5, 7]
}

impl Default for MelodyConfig {
    fn default() -> Self {
        Self {
            start_range: default_start_range(),
            end_range: default_end_range(),
            seed: None,
        }
    }
}

impl MelodyConfig {
    /// Slice windows as melody settings
    pub fn settings(&self) -> MelodySettings {
        MelodySettings {
            start_range: self.start_range[0]..=self.start_range[1],
            end_range: self.end_range[0]..=self.end_range[1],
        }
    }
}

/// MIDI rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MidiConfig {
    /// Tempo in BPM
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    /// Velocity of every note
    #[serde(default = "default_velocity")]
    pub velocity: u8,
    /// Note length in beats
    #[serde(default = "default_note_beats")]
    pub note_beats: u32,
    /// Rest after each chord in beats
    #[serde(default = "default_rest_beats")]
    pub rest_beats: u32,
    /// MIDI channel (0-15)
    pub channel: u8,
    /// Ticks per quarter note
    #[serde(default = "default_ppqn")]
    pub ppqn: u16,
    /// Single- or multi-track file
    pub format: MidiFileFormat,
    /// Optional track name
    pub track_name: Option<String>,
}

fn default_tempo() -> f64 {
    120.0
}
fn default_velocity() -> u8 {
    100
}
fn default_note_beats() -> u32 {
    1
}
fn default_rest_beats() -> u32 {
    2
}
fn default_ppqn() -> u16 {
    960
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            tempo: default_tempo(),
            velocity: default_velocity(),
            note_beats: default_note_beats(),
            rest_beats: default_rest_beats(),
            channel: 0,
            ppqn: default_ppqn(),
            format: MidiFileFormat::default(),
            track_name: None,
        }
    }
}

impl MidiConfig {
    /// Convert to export settings
    pub fn settings(&self) -> MidiSettings {
        MidiSettings {
            performance: PerformanceSettings {
                channel: self.channel,
                velocity: self.velocity,
                note_beats: self.note_beats,
                rest_beats: self.rest_beats,
            },
            tempo: self.tempo,
            ppqn: self.ppqn,
            format: self.format,
            track_name: self.track_name.clone(),
        }
    }
}

/// Where MIDI files are written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Target directory
    pub directory: PathBuf,
    /// File name of the exported exercise
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: "improv_exercise.mid".to_string(),
        }
    }
}

impl OutputConfig {
    /// Full path of the exported file
    pub fn midi_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Log output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: error, warn, info, debug or trace
    pub level: String,
    /// Log file used while the form owns the terminal
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
