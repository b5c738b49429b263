//! Listing view - header with clock, card grid, loading indicator

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use cardfeed_core::Card;

use crate::tui::surface::{Indicator, TerminalSurface};
use crate::tui::theme::Theme;

/// Text rows of one card: label, remaining lines, blank spacer
///
/// The row count drives the content height reported to the controller, so
/// rendering must produce exactly these rows.
pub fn card_rows(card: &Card) -> Vec<String> {
    let label = card.label();
    let mut rows = vec![label.to_string()];

    let mut label_skipped = false;
    for line in &card.lines {
        if !label_skipped && line == label {
            label_skipped = true;
            continue;
        }
        rows.push(line.clone());
    }

    rows.push(String::new());
    rows
}

/// Top line: title on the left, datetime on the right
pub fn render_header(f: &mut Frame, area: Rect, theme: &Theme, title: &str, datetime: &str) {
    let bg = Paragraph::new("").style(Style::default().bg(theme.status_bar_bg_color));
    f.render_widget(bg, area);

    let left = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            title,
            Style::default()
                .fg(theme.accent_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(left), area);

    let right = Line::from(Span::styled(
        format!("{datetime} "),
        Style::default().fg(theme.text_color),
    ));
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
}

/// Card grid, scrolled to the surface's offset
pub fn render_listing(f: &mut Frame, area: Rect, theme: &Theme, surface: &TerminalSurface) {
    if surface.cards.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No products yet",
            Style::default().fg(theme.dim_color),
        ))
        .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let text_width = area.width.saturating_sub(4) as usize;
    let mut lines = Vec::with_capacity(surface.scroll.content);

    for card in &surface.cards {
        let mut rows = card_rows(card).into_iter();
        if let Some(label) = rows.next() {
            lines.push(Line::from(vec![
                Span::styled("▍ ", Style::default().fg(theme.accent_color)),
                Span::styled(
                    truncate_ellipsis(&label, text_width),
                    Style::default()
                        .fg(theme.text_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        for row in rows {
            lines.push(Line::from(Span::styled(
                format!("  {}", truncate_ellipsis(&row, text_width)),
                Style::default().fg(theme.dim_color),
            )));
        }
    }

    let offset = u16::try_from(surface.scroll.offset).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);

    if surface.scroll.max_scroll > 0 {
        let mut state = ScrollbarState::new(surface.scroll.max_scroll)
            .position(surface.scroll.offset)
            .viewport_content_length(surface.scroll.viewport);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .thumb_style(Style::default().fg(theme.dim_color))
                .track_style(Style::default().fg(theme.border_color)),
            area,
            &mut state,
        );
    }
}

/// Loading indicator line, drawn only while visible
pub fn render_indicator(f: &mut Frame, area: Rect, theme: &Theme, indicator: &Indicator) {
    if !indicator.visible {
        return;
    }

    let line = Line::from(Span::styled(
        indicator.text.as_str(),
        Style::default().fg(theme.processing_color),
    ));
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Cut text to a display width, ending in an ellipsis when shortened
pub fn truncate_ellipsis(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            // Make room for the ellipsis
            while width + 1 > max_width {
                match out.pop() {
                    Some(removed) => width -= removed.width().unwrap_or(0),
                    None => return String::new(),
                }
            }
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }

    out
}
