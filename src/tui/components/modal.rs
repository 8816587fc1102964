//! # Modal Component
//!
//! Centered dialog drawn over the page: the document's open `.modal` and
//! the form confirmation notice both use it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::document::Document;
use crate::tui::component::Component;

pub struct Modal {
    pub title: String,
    pub body: String,
    pub accent: Color,
    /// Where the dialog was drawn; clicks outside it close the modal.
    pub bounds: Option<Rect>,
}

impl Modal {
    pub fn new(title: impl Into<String>, body: impl Into<String>, accent: Color) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            accent,
            bounds: None,
        }
    }

    /// Props for the document modal with element id `modal_id`, read from
    /// its `.modal-title` and `.modal-body` children.
    pub fn from_document(document: &Document, modal_id: &str) -> Option<Self> {
        let modal = document.get_by_id(modal_id)?;
        let part = |class: &str| {
            document
                .children(modal)
                .iter()
                .find(|c| document.has_class(**c, class))
                .and_then(|c| document.text(*c))
                .unwrap_or("")
                .to_string()
        };
        Some(Self::new(part("modal-title"), part("modal-body"), Color::Cyan))
    }
}

impl Component for Modal {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 40, area);
        self.bounds = Some(overlay);

        frame.render_widget(Clear, overlay);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::horizontal(1));
        let body = Paragraph::new(self.body.as_str())
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
