// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Up-and-down arpeggio text patterns.

use crate::music::{Chord, Interval, Pitch};

/// Separator placed between arpeggio notes
pub const ARROW: &str = " -> ";

/// Ascending half: the chord's pitches in reported order, closed by the
/// first pitch an octave up.
pub fn ascending(chord: &Chord) -> Vec<Pitch> {
    let mut notes = chord.pitches().to_vec();
    notes.push(chord.root().transpose(Interval::OCTAVE));
    notes
}

/// Full pattern: the ascending half followed by its exact reverse
pub fn pattern(chord: &Chord) -> Vec<Pitch> {
    let up = ascending(chord);
    let mut notes = up.clone();
    notes.extend(up.iter().rev());
    notes
}

/// Arrow-joined pattern, e.g. "C4 -> E4 -> G4 -> C5 -> C5 -> G4 -> E4 -> C4"
pub fn format(chord: &Chord) -> String {
    pattern(chord)
        .iter()
        .map(|p| p.name_with_octave())
        .collect::<Vec<_>>()
        .join(ARROW)
}
