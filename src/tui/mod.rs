//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the document,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Clock
//!
//! The core's timer queue runs on a virtual clock. A tokio interval task
//! measures real elapsed time and sends `Action::Advance(ms)` over the same
//! channel background work would use; the event loop drains it every frame.
//!
//! ## Redraw Strategy
//!
//! The loop redraws every frame (~30fps) while timers are pending or the
//! demo box animates, and otherwise only when an event arrived.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::{Position, Rect};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::document::NodeId;
use crate::core::effects::open_modal;
use crate::core::site::{INTERACTIVE_SELECTOR, SiteSpec};
use crate::core::state::App;
use crate::tui::components::NavTarget;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const FRAME_MS: u64 = 33;
const IDLE_POLL_MS: u64 = 250;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Click targets of the nav bar from the last frame.
    pub nav_hits: Vec<(Rect, NavTarget)>,
    /// Where the page was drawn in the last frame.
    pub page_area: Rect,
    /// Open modal id and its on-screen bounds.
    pub modal: Option<(String, Rect)>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            nav_hits: Vec::new(),
            page_area: Rect::default(),
            modal: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol so Ctrl+digit arrives as a distinct key;
        // terminals without support ignore it
        execute!(
            stdout(),
            EnableMouseCapture,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableMouseCapture);
    }
}

/// Send elapsed real time to the event loop as `Action::Advance`.
fn spawn_clock(tx: mpsc::Sender<Action>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(FRAME_MS));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut last = tokio::time::Instant::now();
        loop {
            let now = interval.tick().await;
            let elapsed = now.duration_since(last).as_millis() as u64;
            last = now;
            if elapsed > 0 && tx.send(Action::Advance(elapsed)).is_err() {
                debug!("Clock stopped: receiver dropped");
                break;
            }
        }
    })
}

pub fn run(site: SiteSpec, config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::new(&site, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let clock = spawn_clock(tx.clone());

    let size = terminal.size()?;
    let (width, height) = ui::page_content_size(Rect::new(0, 0, size.width, size.height));
    update(&mut app, Action::Resize { width, height });
    update(&mut app, Action::Initialize);

    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        let animating = !app.stage.timers.is_empty() || app.demo.is_animating;
        if animating {
            needs_redraw = true;
        }
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = Duration::from_millis(if animating { FRAME_MS } else { IDLE_POLL_MS });
        let mut next = poll_event_timeout(timeout)?;

        // Process first event + drain all pending events before next draw
        while let Some(event) = next {
            needs_redraw = true;
            for action in actions_for(event, &app, &tui) {
                if update(&mut app, action) == Effect::Quit {
                    should_quit = true;
                }
            }
            next = poll_event_immediate()?;
        }

        // Handle background task actions (clock ticks)
        while let Ok(action) = rx.try_recv() {
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }
    }

    clock.abort();
    info!("Shutting down: {}", app.state_snapshot());
    ratatui::restore();
    Ok(())
}

/// Translate a terminal event into core actions.
fn actions_for(event: TuiEvent, app: &App, tui: &TuiState) -> Vec<Action> {
    let action = match event {
        TuiEvent::Quit => Action::Quit,
        TuiEvent::ShowPage(page) => Action::ShowPage(page),
        TuiEvent::NextPage => Action::NextPage,
        TuiEvent::PrevPage => Action::PrevPage,
        TuiEvent::Escape => Action::Escape,
        TuiEvent::ToggleMenu => Action::ToggleMenu,
        TuiEvent::OpenInfo => Action::OpenInfoModal,
        TuiEvent::StartDemo => Action::StartDemo,
        TuiEvent::StopDemo => Action::StopDemo,
        TuiEvent::ResetDemo => Action::ResetDemo,
        TuiEvent::RotateDemo => Action::RotateDemo,
        TuiEvent::PreviewMotion => Action::PreviewMotion,
        TuiEvent::FocusNext => Action::FocusNext,
        TuiEvent::FocusPrev => Action::FocusPrev,
        TuiEvent::Activate => Action::ActivateFocused,
        TuiEvent::ScrollUp => Action::Scroll(-1),
        TuiEvent::ScrollDown => Action::Scroll(1),
        TuiEvent::ScrollPageUp => Action::Scroll(-page_step(tui)),
        TuiEvent::ScrollPageDown => Action::Scroll(page_step(tui)),
        TuiEvent::Resize(width, height) => {
            let (width, height) = ui::page_content_size(Rect::new(0, 0, width, height));
            Action::Resize { width, height }
        }
        TuiEvent::Click(column, row) => return click_actions(column, row, app, tui),
    };
    vec![action]
}

fn page_step(tui: &TuiState) -> i32 {
    i32::from(tui.page_area.height.saturating_sub(1).max(1))
}

/// Clicks: outside an open modal closes it; on the nav bar they show a
/// page or toggle the menu; on the page they activate the element hit.
fn click_actions(column: u16, row: u16, app: &App, tui: &TuiState) -> Vec<Action> {
    let position = Position::new(column, row);

    if let Some((id, bounds)) = &tui.modal {
        if !bounds.contains(position) {
            return vec![Action::CloseModal(id.clone())];
        }
        return Vec::new();
    }
    if open_modal(&app.stage.document).is_some() {
        return Vec::new();
    }

    if let Some((_, target)) = tui.nav_hits.iter().find(|(rect, _)| rect.contains(position)) {
        return match target {
            NavTarget::Page(page) => vec![Action::ShowPage(*page)],
            NavTarget::Menu => vec![Action::ToggleMenu],
        };
    }

    if tui.page_area.contains(position) {
        let x = f64::from(column - tui.page_area.x);
        let y = f64::from(row - tui.page_area.y) + app.viewport.scroll_y;
        if let Some(node) = hit_test_element(app, x, y) {
            return vec![Action::Activate(node)];
        }
    }
    Vec::new()
}

/// Innermost interactive element of the current page under page-local
/// (`x`, `y`).
fn hit_test_element(app: &App, x: f64, y: f64) -> Option<NodeId> {
    let document = &app.stage.document;
    let interactive: Vec<NodeId> = app.interactive_elements();
    let hit = interactive.into_iter().rev().find(|node| {
        document.bounding_rect(*node).is_some_and(|r| {
            x >= r.x && x < r.x + r.width && y >= r.y && y < r.bottom()
        })
    });
    if hit.is_none() {
        debug!("No interactive element ({}) at {:.0},{:.0}", INTERACTIVE_SELECTOR, x, y);
    }
    hit
}
