use crate::core::effects::{SUBMIT_NOTICE, open_modal};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{LoadingScreen, Modal, NavBar, PageView, StatusBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Color;

/// Split the frame into nav bar, page and status bar.
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1)]).areas(area)
}

/// Size the page content is laid out for: the page area minus the
/// scrollbar column.
pub fn page_content_size(area: Rect) -> (u16, u16) {
    let [_, page_area, _] = screen_layout(area);
    (page_area.width.saturating_sub(1), page_area.height)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [nav_area, page_area, status_area] = screen_layout(frame.area());
    let document = &app.stage.document;

    let mut nav_bar = NavBar::from_document(&app.title, document);
    nav_bar.render(frame, nav_area);
    tui.nav_hits = nav_bar.hits;

    let page = document.get_by_id(app.current_page().as_str());
    let mut page_view = PageView {
        document,
        page,
        focus: app.focus,
        scroll_y: app.viewport.scroll_y.round() as u16,
        content_height: app.viewport.content_height.ceil() as u16,
        now_ms: app.stage.now_ms(),
    };
    page_view.render(frame, page_area);
    tui.page_area = page_area;

    let mut status_bar = StatusBar {
        page: app.current_page(),
        status_message: app.status_message.clone(),
        animation_count: app.demo.animation_count,
        pending_timers: app.stage.timers.len(),
    };
    status_bar.render(frame, status_area);

    // Overlays, bottom to top
    tui.modal = None;
    if let Some(id) = open_modal(document)
        && let Some(mut modal) = Modal::from_document(document, &id)
    {
        modal.render(frame, page_area);
        tui.modal = modal.bounds.map(|bounds| (id, bounds));
    }

    if let Some(notice) = &app.notice {
        let title = if notice == SUBMIT_NOTICE { "Message sent" } else { "Notice" };
        Modal::new(title, notice.as_str(), Color::Green).render(frame, page_area);
    }

    if let Some(mut loader) = LoadingScreen::from_document(document, app.stage.now_ms()) {
        loader.render(frame, frame.area());
    }
}
