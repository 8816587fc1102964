//! # Actions
//!
//! Everything that can happen in Pageflow becomes an `Action`.
//! User presses Ctrl+2? That's `Action::ShowPage(PageId::About)`.
//! The clock ticks? That's `Action::Advance(elapsed_ms)`.
//!
//! The `update()` function applies an action to the state and returns an
//! [`Effect`] telling the front-end what to do next. No terminal I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use log::debug;

use crate::core::document::NodeId;
use crate::core::page::PageId;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Run the startup sequence.
    Initialize,
    /// Real time passed; fire due timers.
    Advance(u64),
    /// The page area changed size (cells).
    Resize { width: u16, height: u16 },
    ShowPage(PageId),
    NextPage,
    PrevPage,
    /// Scroll the page by this many cells.
    Scroll(i32),
    FocusNext,
    FocusPrev,
    ActivateFocused,
    Activate(NodeId),
    ToggleMenu,
    OpenInfoModal,
    CloseModal(String),
    /// Dismiss the notice, or close every open modal.
    Escape,
    StartDemo,
    StopDemo,
    ResetDemo,
    RotateDemo,
    PreviewMotion,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    if !matches!(action, Action::Advance(_)) {
        debug!("Action: {:?}", action);
    }
    match action {
        Action::Initialize => app.initialize(),
        Action::Advance(ms) => {
            app.advance(ms);
        }
        Action::Resize { width, height } => app.resize(width, height),
        Action::ShowPage(page) => {
            app.show_page(page.as_str());
        }
        Action::NextPage => {
            app.next_page();
        }
        Action::PrevPage => {
            app.prev_page();
        }
        Action::Scroll(delta) => app.scroll_by(f64::from(delta)),
        Action::FocusNext => {
            app.move_focus(1);
        }
        Action::FocusPrev => {
            app.move_focus(-1);
        }
        Action::ActivateFocused => {
            app.activate_focused();
        }
        Action::Activate(node) => {
            app.focus = Some(node);
            app.activate(node);
        }
        Action::ToggleMenu => {
            app.toggle_menu();
        }
        Action::OpenInfoModal => {
            app.open_info_modal();
        }
        Action::CloseModal(id) => {
            app.close_modal(&id);
        }
        Action::Escape => {
            app.escape();
        }
        Action::StartDemo => {
            app.start_demo();
        }
        Action::StopDemo => {
            app.stop_demo();
        }
        Action::ResetDemo => {
            app.reset_demo();
        }
        Action::RotateDemo => {
            app.rotate_demo();
        }
        Action::PreviewMotion => {
            app.preview_motion();
        }
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}
