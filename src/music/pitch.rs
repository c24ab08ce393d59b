// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled pitches and intervals.
//!
//! Pitches keep their letter spelling (Bb is not A#), so chords and scales
//! built from them read the way a musician would write them. Octave numbers
//! follow the MIDI convention where middle C is C4 = 60, and the octave
//! belongs to the letter (Cb4 sounds as MIDI 59, B#3 as MIDI 60).

use std::fmt;

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Natural note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in ascending order from C
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position of this letter within the octave (C = 0, B = 6)
    pub fn index(self) -> i8 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Pitch class (0-11) of the natural note
    pub fn natural_pitch_class(self) -> i8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Parse a letter, ignoring case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    /// Move up (or down) by letter steps, returning the new letter and
    /// how many octaves were crossed.
    pub fn step(self, steps: i8) -> (Letter, i8) {
        let pos = self.index() + steps;
        let letter = Letter::ALL[pos.rem_euclid(7) as usize];
        (letter, pos.div_euclid(7))
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        };
        write!(f, "{}", c)
    }
}

/// Most sharps or flats a parsed pitch name may carry
pub const MAX_ACCIDENTALS: i8 = 2;

/// A spelled pitch class: letter plus accidental (sharps positive, flats negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchName {
    letter: Letter,
    accidental: i8,
}

impl PitchName {
    /// Create a pitch name from a letter and accidental
    pub fn new(letter: Letter, accidental: i8) -> Self {
        Self { letter, accidental }
    }

    /// A natural pitch name
    pub fn natural(letter: Letter) -> Self {
        Self::new(letter, 0)
    }

    /// The letter
    pub fn letter(self) -> Letter {
        self.letter
    }

    /// The accidental in semitones
    pub fn accidental(self) -> i8 {
        self.accidental
    }

    /// Pitch class (0-11)
    pub fn pitch_class(self) -> u8 {
        (self.letter.natural_pitch_class() + self.accidental).rem_euclid(12) as u8
    }

    /// Parse a pitch name from the start of `s`.
    ///
    /// Accepts a letter (any case) followed by up to [`MAX_ACCIDENTALS`]
    /// of `#`, `b` or `-` (flat). Returns the name and the unparsed
    /// remainder, or `None` when the accidentals run past the limit.
    /// A `b` directly after the letter is always read as a flat, so "Bb"
    /// is B flat and "bb" is also B flat.
    pub fn parse_prefix(s: &str) -> Option<(Self, &str)> {
        let mut chars = s.char_indices();
        let (_, first) = chars.next()?;
        let letter = Letter::from_char(first)?;

        let mut accidental: i8 = 0;
        let mut end = first.len_utf8();
        for (i, c) in chars {
            match c {
                '#' => accidental += 1,
                'b' | '-' => accidental -= 1,
                _ => return Some((Self::new(letter, accidental), &s[i..])),
            }
            if accidental.abs() > MAX_ACCIDENTALS {
                return None;
            }
            end = i + c.len_utf8();
        }

        Some((Self::new(letter, accidental), &s[end..]))
    }

    /// Parse a complete pitch name such as "C", "F#" or "Bb"
    pub fn parse(s: &str) -> Option<Self> {
        match Self::parse_prefix(s.trim())? {
            (name, "") => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        let symbol = if self.accidental > 0 { "#" } else { "b" };
        for _ in 0..self.accidental.unsigned_abs() {
            f.write_str(symbol)?;
        }
        Ok(())
    }
}

/// A spelled interval: letter steps plus semitones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// Number of letter steps (a third is 2)
    pub steps: i8,
    /// Size in semitones
    pub semitones: i8,
}

impl Interval {
    pub const UNISON: Interval = Interval::new(0, 0);
    pub const MINOR_SECOND: Interval = Interval::new(1, 1);
    pub const MAJOR_SECOND: Interval = Interval::new(1, 2);
    pub const AUGMENTED_SECOND: Interval = Interval::new(1, 3);
    pub const MINOR_THIRD: Interval = Interval::new(2, 3);
    pub const MAJOR_THIRD: Interval = Interval::new(2, 4);
    pub const PERFECT_FOURTH: Interval = Interval::new(3, 5);
    pub const AUGMENTED_FOURTH: Interval = Interval::new(3, 6);
    pub const DIMINISHED_FIFTH: Interval = Interval::new(4, 6);
    pub const PERFECT_FIFTH: Interval = Interval::new(4, 7);
    pub const AUGMENTED_FIFTH: Interval = Interval::new(4, 8);
    pub const MINOR_SIXTH: Interval = Interval::new(5, 8);
    pub const MAJOR_SIXTH: Interval = Interval::new(5, 9);
    pub const DIMINISHED_SEVENTH: Interval = Interval::new(6, 9);
    pub const MINOR_SEVENTH: Interval = Interval::new(6, 10);
    pub const MAJOR_SEVENTH: Interval = Interval::new(6, 11);
    pub const OCTAVE: Interval = Interval::new(7, 12);

    /// Create an interval
    pub const fn new(steps: i8, semitones: i8) -> Self {
        Self { steps, semitones }
    }
}

/// A pitch: spelled name plus octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    name: PitchName,
    octave: i8,
}

impl Pitch {
    /// Create a pitch
    pub fn new(name: PitchName, octave: i8) -> Self {
        Self { name, octave }
    }

    /// The spelled name without octave
    pub fn name(&self) -> PitchName {
        self.name
    }

    /// The octave number
    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// Absolute semitone number on the MIDI scale (may fall outside 0-127)
    pub fn midi(&self) -> i16 {
        (self.octave as i16 + 1) * 12
            + self.name.letter.natural_pitch_class() as i16
            + self.name.accidental as i16
    }

    /// MIDI note number, if the pitch lies within the MIDI range
    pub fn midi_note(&self) -> Option<MidiNote> {
        u8::try_from(self.midi()).ok().filter(|n| *n <= 127)
    }

    /// Transpose by a spelled interval, keeping letter spelling consistent.
    ///
    /// Saturates at the ends of the octave range; such pitches have no MIDI
    /// number and are rejected at export.
    pub fn transpose(&self, interval: Interval) -> Pitch {
        let (letter, octave_carry) = self.name.letter.step(interval.steps);
        let octave = self.octave.saturating_add(octave_carry);
        let target = self.midi() + interval.semitones as i16;
        let natural = (octave as i16 + 1) * 12 + letter.natural_pitch_class() as i16;
        let accidental = i8::try_from(target - natural)
            .unwrap_or(if target > natural { i8::MAX } else { i8::MIN });
        Pitch::new(PitchName::new(letter, accidental), octave)
    }

    /// Name-plus-octave representation, e.g. "C4" or "Bb3"
    pub fn name_with_octave(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}
