//! # LoadingScreen Component
//!
//! Full-screen cover shown until the document's loading screen element
//! stops displaying. While it carries `hidden` it is drawn faded.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Clear, Paragraph};

use crate::core::document::Document;
use crate::core::effects::LOADING_SCREEN_ID;
use crate::tui::component::Component;

const DOTS_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Showing,
    Fading,
}

pub struct LoadingScreen {
    pub phase: LoaderPhase,
    pub label: String,
    pub now_ms: u64,
}

impl LoadingScreen {
    /// `None` once the loader no longer displays (or does not exist).
    pub fn from_document(document: &Document, now_ms: u64) -> Option<Self> {
        let loader = document.get_by_id(LOADING_SCREEN_ID)?;
        if !document.is_rendered(loader) {
            return None;
        }
        let phase = if document.has_class(loader, "hidden") {
            LoaderPhase::Fading
        } else {
            LoaderPhase::Showing
        };
        let label = document.text(loader).unwrap_or("Loading").trim_end_matches('.').to_string();
        Some(Self { phase, label, now_ms })
    }
}

impl Component for LoadingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let dots = ".".repeat((self.now_ms / DOTS_MS % 4) as usize);
        let style = match self.phase {
            LoaderPhase::Showing => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            LoaderPhase::Fading => Style::default().fg(Color::DarkGray),
        };
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let text = Paragraph::new(format!("{}{:<3}", self.label, dots))
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(text, middle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_loader() -> (Document, crate::core::document::NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let loader = doc.append(root, "div");
        doc.set_id(loader, LOADING_SCREEN_ID);
        doc.set_text(loader, "Loading...");
        (doc, loader)
    }

    #[test]
    fn test_phases_follow_document() {
        let (mut doc, loader) = with_loader();
        let screen = LoadingScreen::from_document(&doc, 0).unwrap();
        assert_eq!(screen.phase, LoaderPhase::Showing);
        assert_eq!(screen.label, "Loading");

        doc.add_class(loader, "hidden");
        assert_eq!(LoadingScreen::from_document(&doc, 0).unwrap().phase, LoaderPhase::Fading);

        doc.set_style(loader, "display", "none");
        assert!(LoadingScreen::from_document(&doc, 0).is_none());
    }

    #[test]
    fn test_no_loader_element() {
        assert!(LoadingScreen::from_document(&Document::new(), 0).is_none());
    }
}
