// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Styling of the report's Markdown subset: `###` headings, `- ` bullets
//! and `**bold**` runs. Everything else is plain text.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

fn heading_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Convert report text into styled lines
pub fn to_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(line).collect()
}

fn line(raw: &str) -> Line<'static> {
    let heading = raw.trim_start_matches('#');
    if heading.len() < raw.len() && heading.starts_with(' ') {
        return Line::from(Span::styled(heading.trim_start().to_string(), heading_style()));
    }

    if let Some(item) = raw.strip_prefix("- ") {
        let mut spans = vec![Span::styled("  • ", Style::default().fg(Color::Yellow))];
        spans.extend(inline(item));
        return Line::from(spans);
    }

    Line::from(inline(raw))
}

/// Split on `**` markers; odd segments are bold
fn inline(text: &str) -> Vec<Span<'static>> {
    text.split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            if i % 2 == 1 {
                Span::styled(part.to_string(), bold_style())
            } else {
                Span::raw(part.to_string())
            }
        })
        .collect()
}
