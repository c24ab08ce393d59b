// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Output pane widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget, Wrap},
};

use super::markdown;

/// Report widget for displaying generated exercises or errors
pub struct ReportWidget<'a> {
    text: &'a str,
    is_error: bool,
    scroll: u16,
    block: Option<Block<'a>>,
}

impl<'a> ReportWidget<'a> {
    /// Create a new report widget
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            is_error: false,
            scroll: 0,
            block: None,
        }
    }

    /// Render the text as an error
    pub fn error(mut self, is_error: bool) -> Self {
        self.is_error = is_error;
        self
    }

    /// Set the first visible line
    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for ReportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let paragraph = if self.text.is_empty() {
            Paragraph::new("Enter a progression and press Generate Exercises")
                .style(Style::default().fg(Color::DarkGray))
        } else if self.is_error {
            let lines: Vec<Line> = self.text.lines().map(Line::from).collect();
            Paragraph::new(lines).style(Style::default().fg(Color::Red))
        } else {
            Paragraph::new(markdown::to_lines(self.text))
        };

        paragraph
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
