// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the exercise generator.
//!
//! Provides a ratatui-based form with chord progression and song key
//! fields, a generate button, and a scrollable report pane.

pub mod form;
pub mod markdown;
mod report;

pub use form::{FormAction, FormState, Focus, TextField};
pub use report::ReportWidget;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::info;

use crate::config::ImprovConfig;
use crate::exercise::{ExerciseGenerator, RngDraw};

/// Terminal UI application
pub struct App {
    /// Form contents
    form: FormState,
    /// Exercise generator built from config
    generator: ExerciseGenerator,
    /// Melody draws
    draw: RngDraw<StdRng>,
    /// Where generated MIDI goes
    midi_path: PathBuf,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Create the app and take over the terminal
    pub fn new(config: &ImprovConfig, seed: Option<u64>) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        or_restore(execute!(stdout, EnterAlternateScreen), restore_terminal)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = or_restore(Terminal::new(backend), restore_terminal)?;

        Ok(Self {
            form: FormState::new(&config.exercise.default_key),
            generator: ExerciseGenerator::new(config.exercise_settings()),
            draw: RngDraw::from_seed_option(seed.or(config.melody.seed)),
            midi_path: config.output.midi_path(),
            terminal,
            running: true,
        })
    }

    /// Run until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        info!("form opened");
        while self.running {
            self.draw()?;
            if let Some(Event::Key(key)) = self.poll_event()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match self.form.handle_key(key.code, key.modifiers) {
                    FormAction::Quit => self.running = false,
                    FormAction::Generate => {
                        self.form
                            .submit(&self.generator, &mut self.draw, &self.midi_path)
                    }
                    FormAction::None => {}
                }
            }
        }
        info!("form closed");
        Ok(())
    }

    /// Poll for events with timeout
    fn poll_event(&self) -> io::Result<Option<Event>> {
        if event::poll(Duration::from_millis(100))? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    fn draw(&mut self) -> io::Result<()> {
        let form = &self.form;
        self.terminal.draw(|frame| render_form(frame, form))?;
        Ok(())
    }

    /// Restore the terminal
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// Best-effort undo of raw mode and the alternate screen
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Run `restore` if a setup step failed, then pass the result through
fn or_restore<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the whole form
fn render_form(frame: &mut Frame, form: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Progression
            Constraint::Length(3), // Key
            Constraint::Length(3), // Button
            Constraint::Min(5),    // Report
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new(form::TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(title, chunks[0]);

    render_field(frame, chunks[1], form::PROGRESSION_LABEL, &form.progression, form.focus == Focus::Progression);
    render_field(frame, chunks[2], form::KEY_LABEL, &form.key, form.focus == Focus::Key);
    render_button(frame, chunks[3], form.focus == Focus::Generate);

    let report = ReportWidget::new(&form.output)
        .error(form.output_is_error)
        .scroll(form.scroll)
        .block(Block::default().borders(Borders::ALL).title(" Exercises "));
    frame.render_widget(report, chunks[4]);

    render_status_bar(frame, chunks[5], form);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Render a labelled text input, placing the cursor when focused
fn render_field(frame: &mut Frame, area: Rect, label: &str, field: &TextField, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(format!(" {} ", label));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep the cursor visible on long inputs
    let width = inner.width.max(1) as usize;
    let offset = field.cursor().saturating_sub(width - 1);
    let visible: String = field.value().chars().skip(offset).take(width).collect();
    frame.render_widget(Paragraph::new(visible), inner);

    if focused {
        let x = inner.x + (field.cursor() - offset) as u16;
        frame.set_cursor_position((x, inner.y));
    }
}

/// Render the submit button
fn render_button(frame: &mut Frame, area: Rect, focused: bool) {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let width = (form::BUTTON_LABEL.len() as u16 + 4).min(area.width);
    let button_area = Rect::new(area.x, area.y, width, area.height);
    let button = Paragraph::new(Span::styled(form::BUTTON_LABEL, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(focus_style(focused)));
    frame.render_widget(button, button_area);
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, form: &FormState) {
    let text = if let Some(ref msg) = form.status {
        let style = if msg.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Span::styled(msg.as_str(), style)
    } else {
        Span::styled(
            " Tab: Next field | Enter: Next/Generate | Ctrl+G: Generate | PgUp/PgDn: Scroll | Esc: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}
