//! Status bar component - bottom bar with source, page, card count, shortcuts

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use cardfeed_core::{LoadPhase, PageOutcome};

use crate::tui::components::listing::truncate_ellipsis;
use crate::tui::theme::Theme;

/// What the status bar shows on the left
pub struct StatusInfo<'a> {
    pub source: &'a str,
    pub page: u32,
    pub cards: usize,
    pub phase: LoadPhase,
    pub last_outcome: Option<&'a PageOutcome>,
}

/// Render the status bar at the bottom of the screen
pub fn render_status_bar(f: &mut Frame, area: Rect, theme: &Theme, info: &StatusInfo<'_>) {
    // Background
    let bg = Paragraph::new("").style(Style::default().bg(theme.status_bar_bg_color));
    f.render_widget(bg, area);

    let source_display = shorten_source(info.source, 30);
    let page_text = format!("page {}", info.page);
    let cards_text = format!("{} items", info.cards);
    let (phase_text, phase_color) = match info.phase {
        LoadPhase::Idle => ("idle", theme.dim_color),
        LoadPhase::Loading { .. } => ("loading", theme.processing_color),
        LoadPhase::Exhausted => ("end", theme.success_color),
    };

    let separator = || Span::styled(" │ ", Style::default().fg(theme.dim_color));
    let mut left_spans = vec![
        Span::raw(" "),
        Span::styled(source_display.as_str(), Style::default().fg(theme.dim_color)),
        separator(),
        Span::styled(page_text.as_str(), Style::default().fg(theme.dim_color)),
        separator(),
        Span::styled(cards_text.as_str(), Style::default().fg(theme.dim_color)),
        separator(),
        Span::styled(phase_text, Style::default().fg(phase_color)),
    ];

    // space + three " │ " separators + text
    let mut left_width = 1
        + 3 * 3
        + source_display.width()
        + page_text.width()
        + cards_text.width()
        + phase_text.width();

    if let Some(outcome) = info.last_outcome {
        let (text, color) = describe_outcome(outcome, theme);
        left_width += 3 + text.width();
        left_spans.push(separator());
        left_spans.push(Span::styled(text, Style::default().fg(color)));
    }
    let left_width = u16::try_from(left_width).unwrap_or(u16::MAX);

    // Split into left (fixed) and right (fill)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(left_width), Constraint::Fill(1)])
        .split(area);

    f.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);

    // Render commands based on available width (right-aligned)
    let available_width = chunks[1].width as usize;
    let commands = build_commands_for_width(available_width, theme);
    f.render_widget(
        Paragraph::new(Line::from(commands)).alignment(Alignment::Right),
        chunks[1],
    );
}

/// Short text for the last completed fetch
fn describe_outcome(outcome: &PageOutcome, theme: &Theme) -> (String, Color) {
    match outcome {
        PageOutcome::Appended { page, cards } => {
            (format!("+{cards} from page {page}"), theme.success_color)
        }
        PageOutcome::Exhausted { page } => (format!("page {page} empty"), theme.dim_color),
        PageOutcome::Failed { page, .. } => (format!("page {page} failed"), theme.error_color),
    }
}

/// Build command spans based on available width
/// Priority (highest to lowest): quit, scroll, page, jump
fn build_commands_for_width(width: usize, theme: &Theme) -> Vec<Span<'_>> {
    // Format: (key_text, desc_text)
    let commands: [(&str, &str); 4] = [
        (" q ", "quit "), // highest priority
        (" j/k ", "scroll "),
        (" PgUp/PgDn ", "page "),
        (" g/G ", "top/end "), // lowest priority
    ];

    let mut spans = Vec::new();
    let mut used_width = 0;

    for (key, desc) in commands {
        let cmd_width = key.width() + desc.width();
        if used_width + cmd_width <= width {
            spans.push(Span::styled(
                key,
                Style::default().bg(theme.border_color).fg(theme.text_color),
            ));
            spans.push(Span::styled(desc, Style::default().fg(theme.dim_color)));
            used_width += cmd_width;
        }
    }

    spans
}

/// Shorten the source URL for display: drop the scheme, cap the width
fn shorten_source(source: &str, max_len: usize) -> String {
    let display = source
        .strip_prefix("https://")
        .or_else(|| source.strip_prefix("http://"))
        .unwrap_or(source)
        .trim_end_matches('/');

    truncate_ellipsis(display, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_source() {
        assert_eq!(shorten_source("http://127.0.0.1:5000/", 30), "127.0.0.1:5000");
        assert_eq!(
            shorten_source("https://shop.example/listing", 30),
            "shop.example/listing"
        );
        assert_eq!(shorten_source("https://a-very-long-host.example", 10), "a-very-lo…");
    }

    #[test]
    fn test_describe_outcome() {
        let theme = Theme::default();
        let (text, color) = describe_outcome(&PageOutcome::Appended { page: 2, cards: 3 }, &theme);
        assert_eq!(text, "+3 from page 2");
        assert_eq!(color, theme.success_color);

        let failed = PageOutcome::Failed {
            page: 4,
            error: "HTTP 502".into(),
        };
        assert_eq!(describe_outcome(&failed, &theme).0, "page 4 failed");
    }

    #[test]
    fn test_commands_fit_width() {
        let theme = Theme::default();
        assert!(build_commands_for_width(0, &theme).is_empty());
        // " q " + "quit " only
        assert_eq!(build_commands_for_width(8, &theme).len(), 2);
        assert_eq!(build_commands_for_width(200, &theme).len(), 8);
    }
}
