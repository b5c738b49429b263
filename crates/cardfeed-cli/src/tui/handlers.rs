//! Keyboard and mouse handling

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::tui::app::App;
use crate::tui::state::ScrollState;

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: usize = 3;

/// Scroll input on the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    Up(usize),
    Down(usize),
    PageUp,
    PageDown,
    Top,
    Bottom,
}

impl ScrollAction {
    pub fn apply(self, scroll: &mut ScrollState) {
        match self {
            ScrollAction::Up(rows) => scroll.scroll_up(rows),
            ScrollAction::Down(rows) => scroll.scroll_down(rows),
            ScrollAction::PageUp => scroll.page_up(),
            ScrollAction::PageDown => scroll.page_down(),
            ScrollAction::Top => scroll.scroll_to_top(),
            ScrollAction::Bottom => scroll.scroll_to_end(),
        }
    }
}

/// Map a key press to a scroll action
pub fn scroll_action_for_key(key: &KeyEvent) -> Option<ScrollAction> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(ScrollAction::Down(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(ScrollAction::Up(1)),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(ScrollAction::PageDown),
        KeyCode::PageUp => Some(ScrollAction::PageUp),
        KeyCode::Char('g') | KeyCode::Home => Some(ScrollAction::Top),
        KeyCode::Char('G') | KeyCode::End => Some(ScrollAction::Bottom),
        _ => None,
    }
}

/// Map a mouse event to a scroll action
pub fn scroll_action_for_mouse(mouse: &MouseEvent) -> Option<ScrollAction> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(ScrollAction::Down(WHEEL_ROWS)),
        MouseEventKind::ScrollUp => Some(ScrollAction::Up(WHEEL_ROWS)),
        _ => None,
    }
}

pub fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

impl App {
    /// Handle one terminal event
    pub(crate) fn handle_event(&mut self, event: Event) {
        let action = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    self.should_quit = true;
                    return;
                }
                scroll_action_for_key(&key)
            }
            Event::Mouse(mouse) => scroll_action_for_mouse(&mouse),
            _ => None,
        };

        if let Some(action) = action {
            action.apply(&mut self.surface.lock().scroll);
            self.on_container_scrolled();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            scroll_action_for_key(&key(KeyCode::Char('j'))),
            Some(ScrollAction::Down(1))
        );
        assert_eq!(
            scroll_action_for_key(&key(KeyCode::PageUp)),
            Some(ScrollAction::PageUp)
        );
        assert_eq!(
            scroll_action_for_key(&key(KeyCode::Char('G'))),
            Some(ScrollAction::Bottom)
        );
        assert_eq!(scroll_action_for_key(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key(KeyCode::Char('q'))));
        assert!(is_quit(&key(KeyCode::Esc)));
        assert!(is_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_actions_move_scroll() {
        let mut scroll = ScrollState::new();
        scroll.update_bounds(100, 10);

        ScrollAction::Bottom.apply(&mut scroll);
        assert_eq!(scroll.offset, 90);
        ScrollAction::Up(3).apply(&mut scroll);
        assert_eq!(scroll.offset, 87);
        ScrollAction::Top.apply(&mut scroll);
        assert_eq!(scroll.offset, 0);
    }
}
