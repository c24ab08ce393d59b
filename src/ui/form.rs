// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Form state and key handling, independent of the terminal.

use std::fs;
use std::path::Path;

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::{error, info};

use crate::exercise::{ExerciseGenerator, ExerciseOutcome, IndexDraw};

/// Window title
pub const TITLE: &str = "Custom Piano Improv Exercise Generator";
/// Label of the progression field
pub const PROGRESSION_LABEL: &str = "Chord Progression (space-separated, e.g., 'C Am F G')";
/// Label of the key field
pub const KEY_LABEL: &str = "Song Key (e.g., 'C major' or 'A minor')";
/// Label of the submit button
pub const BUTTON_LABEL: &str = "Generate Exercises";

/// Lines moved by PageUp/PageDown
const PAGE: u16 = 10;

/// Which control has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Progression,
    Key,
    Generate,
}

impl Focus {
    /// Next control in tab order
    pub fn next(self) -> Self {
        match self {
            Focus::Progression => Focus::Key,
            Focus::Key => Focus::Generate,
            Focus::Generate => Focus::Progression,
        }
    }

    /// Previous control in tab order
    pub fn prev(self) -> Self {
        match self {
            Focus::Progression => Focus::Generate,
            Focus::Key => Focus::Progression,
            Focus::Generate => Focus::Key,
        }
    }
}

/// Key event result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Run generation with the current field values
    Generate,
}

/// Single-line text input with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    /// Field holding `value` with the cursor at the end
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Current text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Apply an editing key; returns false if the key is not an edit
    fn edit(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            _ => return false,
        }
        true
    }
}

/// Everything the form shows
#[derive(Debug, Clone)]
pub struct FormState {
    /// Chord progression input
    pub progression: TextField,
    /// Song key input
    pub key: TextField,
    /// Focused control
    pub focus: Focus,
    /// Report, message or error text
    pub output: String,
    /// Whether `output` is an error
    pub output_is_error: bool,
    /// First visible output line
    pub scroll: u16,
    /// Status line text
    pub status: Option<String>,
}

impl FormState {
    /// Empty form with the key field pre-filled
    pub fn new(default_key: &str) -> Self {
        Self {
            progression: TextField::default(),
            key: TextField::with_value(default_key),
            focus: Focus::Progression,
            output: String::new(),
            output_is_error: false,
            scroll: 0,
            status: None,
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::Progression => Some(&mut self.progression),
            Focus::Key => Some(&mut self.key),
            Focus::Generate => None,
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> FormAction {
        match (code, modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                return FormAction::Quit
            }
            (KeyCode::Char('g'), KeyModifiers::CONTROL) => return FormAction::Generate,
            (KeyCode::Tab, _) => {
                self.focus = self.focus.next();
                return FormAction::None;
            }
            (KeyCode::BackTab, _) => {
                self.focus = self.focus.prev();
                return FormAction::None;
            }
            (KeyCode::Enter, _) => {
                if self.focus == Focus::Generate {
                    return FormAction::Generate;
                }
                self.focus = self.focus.next();
                return FormAction::None;
            }
            (KeyCode::PageUp, _) => {
                self.scroll = self.scroll.saturating_sub(PAGE);
                return FormAction::None;
            }
            (KeyCode::PageDown, _) => {
                let max = self.output.lines().count().saturating_sub(1) as u16;
                self.scroll = self.scroll.saturating_add(PAGE).min(max);
                return FormAction::None;
            }
            _ => {}
        }

        match self.focused_field_mut() {
            Some(field) => {
                field.edit(code, modifiers);
                FormAction::None
            }
            None if code == KeyCode::Char(' ') => FormAction::Generate,
            None => FormAction::None,
        }
    }

    /// Run the generator on the current inputs and show the result.
    ///
    /// A produced exercise has its MIDI written to `midi_path`; messages and
    /// errors write nothing.
    pub fn submit(
        &mut self,
        generator: &ExerciseGenerator,
        draw: &mut dyn IndexDraw,
        midi_path: &Path,
    ) {
        self.scroll = 0;
        let result = generator.generate(self.progression.value(), self.key.value(), draw);

        match result {
            Ok(ExerciseOutcome::Message(message)) => {
                self.output = message;
                self.output_is_error = false;
                self.status = None;
            }
            Ok(ExerciseOutcome::Exercise(exercise)) => {
                self.output = exercise.report;
                self.output_is_error = false;
                match fs::write(midi_path, exercise.midi.get_ref()) {
                    Ok(()) => {
                        info!(path = %midi_path.display(), "wrote MIDI file");
                        self.status = Some(format!("MIDI saved to {}", midi_path.display()));
                    }
                    Err(err) => {
                        error!(path = %midi_path.display(), "failed to write MIDI file: {}", err);
                        self.status = Some(format!(
                            "Error: could not write {}: {}",
                            midi_path.display(),
                            err
                        ));
                    }
                }
            }
            Err(err) => {
                error!("exercise generation failed: {}", err);
                self.show_error(&err.to_string());
            }
        }
    }

    /// Replace the output with an error message
    pub fn show_error(&mut self, message: &str) {
        self.output = format!("Error: {}", message);
        self.output_is_error = true;
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::{RngDraw, EMPTY_PROGRESSION_MESSAGE, PRACTICE_TIP};
    use tempfile::tempdir;

    fn type_text(form: &mut FormState, text: &str) {
        for c in text.chars() {
            form.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_new_form() {
        let form = FormState::new("C major");
        assert_eq!(form.focus, Focus::Progression);
        assert_eq!(form.progression.value(), "");
        assert_eq!(form.key.value(), "C major");
        assert_eq!(form.key.cursor(), 7);
        assert!(form.output.is_empty());
    }

    #[test]
    fn test_focus_cycle() {
        let mut form = FormState::new("C major");
        form.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(form.focus, Focus::Key);
        form.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(form.focus, Focus::Generate);
        form.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(form.focus, Focus::Progression);
        form.handle_key(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(form.focus, Focus::Generate);
    }

    #[test]
    fn test_enter_moves_then_generates() {
        let mut form = FormState::new("C major");
        assert_eq!(form.handle_key(KeyCode::Enter, KeyModifiers::NONE), FormAction::None);
        assert_eq!(form.focus, Focus::Key);
        assert_eq!(form.handle_key(KeyCode::Enter, KeyModifiers::NONE), FormAction::None);
        assert_eq!(form.focus, Focus::Generate);
        assert_eq!(
            form.handle_key(KeyCode::Enter, KeyModifiers::NONE),
            FormAction::Generate
        );
    }

    #[test]
    fn test_global_keys() {
        let mut form = FormState::new("C major");
        assert_eq!(
            form.handle_key(KeyCode::Char('g'), KeyModifiers::CONTROL),
            FormAction::Generate
        );
        assert_eq!(form.handle_key(KeyCode::Esc, KeyModifiers::NONE), FormAction::Quit);
        assert_eq!(
            form.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            FormAction::Quit
        );
        // Control chords never reach the text field
        assert_eq!(form.progression.value(), "");
    }

    #[test]
    fn test_typing_and_editing() {
        let mut form = FormState::new("C major");
        type_text(&mut form, "C Am F G");
        assert_eq!(form.progression.value(), "C Am F G");

        form.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        form.handle_key(KeyCode::Char('G'), KeyModifiers::SHIFT);
        form.handle_key(KeyCode::Char('7'), KeyModifiers::NONE);
        assert_eq!(form.progression.value(), "C Am F G7");

        form.handle_key(KeyCode::Home, KeyModifiers::NONE);
        form.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        form.handle_key(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(form.progression.value(), "D Am F G7");

        form.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        for _ in 0..5 {
            form.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        }
        type_text(&mut form, "minor");
        assert_eq!(form.key.value(), "C minor");
    }

    #[test]
    fn test_text_field_unicode_cursor() {
        let mut field = TextField::with_value("C°7");
        field.left();
        field.backspace();
        assert_eq!(field.value(), "C7");
        field.insert('ø');
        assert_eq!(field.value(), "Cø7");
        field.end();
        field.right();
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn test_space_on_button_generates() {
        let mut form = FormState::new("C major");
        form.focus = Focus::Generate;
        assert_eq!(
            form.handle_key(KeyCode::Char(' '), KeyModifiers::NONE),
            FormAction::Generate
        );
    }

    #[test]
    fn test_submit_writes_midi() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exercise.mid");
        let mut form = FormState::new("C major");
        type_text(&mut form, "C Am F G");

        form.submit(&ExerciseGenerator::default(), &mut RngDraw::seeded(1), &path);

        assert!(!form.output_is_error);
        assert!(form.output.starts_with("**Song Key:** C major"));
        assert!(form.output.ends_with(PRACTICE_TIP));
        assert!(form.status.as_deref().unwrap().contains("exercise.mid"));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"MThd");
    }

    #[test]
    fn test_submit_empty_progression_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exercise.mid");
        let mut form = FormState::new("C major");

        form.submit(&ExerciseGenerator::default(), &mut RngDraw::seeded(1), &path);

        assert_eq!(form.output, EMPTY_PROGRESSION_MESSAGE);
        assert!(!form.output_is_error);
        assert!(form.status.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_submit_bad_chord_shows_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exercise.mid");
        let mut form = FormState::new("C major");
        type_text(&mut form, "C Hm");

        form.submit(&ExerciseGenerator::default(), &mut RngDraw::seeded(1), &path);

        assert!(form.output_is_error);
        assert!(form.output.starts_with("Error: "));
        assert!(!path.exists());
    }

    #[test]
    fn test_scroll_bounds() {
        let mut form = FormState::new("C major");
        form.output = (0..25).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        form.handle_key(KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(form.scroll, 10);
        form.handle_key(KeyCode::PageDown, KeyModifiers::NONE);
        form.handle_key(KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(form.scroll, 24);
        form.handle_key(KeyCode::PageUp, KeyModifiers::NONE);
        form.handle_key(KeyCode::PageUp, KeyModifiers::NONE);
        form.handle_key(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(form.scroll, 0);
    }
}
