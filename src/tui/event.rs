use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::io;
use std::time::Duration;

use crate::core::page::PageId;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    ShowPage(PageId),
    NextPage,
    PrevPage,
    Escape,
    ToggleMenu,
    OpenInfo,
    StartDemo,
    StopDemo,
    ResetDemo,
    RotateDemo,
    PreviewMotion,
    FocusNext,
    FocusPrev,
    Activate,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    Click(u16, u16),
    Resize(u16, u16),
}

/// Poll for an event, waiting up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(map_event(event::read()?))
}

/// Poll for an event without blocking.
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::Click(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Release/repeat reports arrive with the keyboard enhancement flags on
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);

    let shortcut = key_event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
    match key_event.code {
        // Ctrl/Cmd+1..4 jump to a page
        KeyCode::Char(c) if shortcut && PageId::from_shortcut(c).is_some() => {
            PageId::from_shortcut(c).map(TuiEvent::ShowPage)
        }
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::Quit)
        }
        KeyCode::Char(_) if shortcut => None,
        KeyCode::Char('q') => Some(TuiEvent::Quit),
        KeyCode::Char('m') => Some(TuiEvent::ToggleMenu),
        KeyCode::Char('o') => Some(TuiEvent::OpenInfo),
        KeyCode::Char('s') => Some(TuiEvent::StartDemo),
        KeyCode::Char('x') => Some(TuiEvent::StopDemo),
        KeyCode::Char('r') => Some(TuiEvent::ResetDemo),
        KeyCode::Char('t') => Some(TuiEvent::RotateDemo),
        KeyCode::Char('p') => Some(TuiEvent::PreviewMotion),
        KeyCode::Tab => Some(TuiEvent::NextPage),
        KeyCode::BackTab => Some(TuiEvent::PrevPage),
        KeyCode::Esc => Some(TuiEvent::Escape),
        KeyCode::Left => Some(TuiEvent::FocusPrev),
        KeyCode::Right => Some(TuiEvent::FocusNext),
        KeyCode::Enter => Some(TuiEvent::Activate),
        KeyCode::Up => Some(TuiEvent::ScrollUp),
        KeyCode::Down => Some(TuiEvent::ScrollDown),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_ctrl_digits_show_pages() {
        assert_eq!(
            map_event(key(KeyCode::Char('1'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ShowPage(PageId::Home))
        );
        assert_eq!(
            map_event(key(KeyCode::Char('3'), KeyModifiers::SUPER)),
            Some(TuiEvent::ShowPage(PageId::WhatWeDo))
        );
        // Plain digits do nothing
        assert_eq!(map_event(key(KeyCode::Char('2'), KeyModifiers::NONE)), None);
        // Ctrl+5 has no page
        assert_eq!(map_event(key(KeyCode::Char('5'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(TuiEvent::Quit));
        assert_eq!(map_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(TuiEvent::Quit));
        assert_eq!(map_event(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(release), None);
        assert_eq!(map_event(key(KeyCode::Esc, KeyModifiers::NONE)), Some(TuiEvent::Escape));
    }

    #[test]
    fn test_mouse_click_and_resize() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(click), Some(TuiEvent::Click(4, 7)));
        assert_eq!(map_event(Event::Resize(100, 30)), Some(TuiEvent::Resize(100, 30)));
    }
}
