//! # PageView Component
//!
//! Draws the active page of the document inside a vertical scroll view.
//! Element boxes come straight from the layout pass, so what is drawn is
//! exactly what the intersection observer measures.
//!
//! Classes map onto terminal styling:
//!
//! | class / state        | look                       |
//! |----------------------|----------------------------|
//! | opacity below 0.5    | dark grey (not yet in)     |
//! | focused              | reversed                   |
//! | `highlighted`        | yellow, bold               |
//! | `flipped`            | magenta, back face shown   |
//! | `animated`           | green, bold                |
//! | `expanded`           | detail text appended       |
//! | `.stat-number`       | cyan, bold                 |
//! | `spinning`/`bouncing`| frame-based glyph on box   |

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::document::{Document, NodeId};
use crate::core::layout::{display_text, is_boxed};
use crate::tui::component::Component;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const BOUNCE: [&str; 4] = ["_", "-", "^", "-"];
const FRAME_MS: u64 = 120;

pub struct PageView<'a> {
    pub document: &'a Document,
    pub page: Option<NodeId>,
    pub focus: Option<NodeId>,
    pub scroll_y: u16,
    pub content_height: u16,
    pub now_ms: u64,
}

impl PageView<'_> {
    fn is_hidden(&self, node: NodeId) -> bool {
        std::iter::once(node)
            .chain(self.document.ancestors(node))
            .any(|n| self.document.opacity(n) < 0.5)
    }

    fn style_for(&self, node: NodeId) -> Style {
        let doc = self.document;
        let mut style = if self.is_hidden(node) {
            Style::default().fg(Color::DarkGray)
        } else if doc.has_class(node, "highlighted") {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if doc.has_class(node, "flipped") {
            Style::default().fg(Color::Magenta)
        } else if doc.has_class(node, "animated") {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if doc.has_class(node, "stat-number") {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if doc.element(node).is_some_and(|e| matches!(e.tag.as_str(), "h1" | "h2" | "h3")) {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        if self.focus == Some(node) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    /// The element's own text, including animation glyphs and detail.
    fn text_for(&self, node: NodeId) -> String {
        let doc = self.document;
        let mut text = display_text(doc, node).to_string();
        if doc.has_class(node, "animated-box") {
            let frame = (self.now_ms / FRAME_MS) as usize % SPINNER.len();
            if doc.has_class(node, "spinning") {
                text = format!("{} {}", SPINNER[frame], text);
            } else if doc.has_class(node, "bouncing") {
                text = format!("{} {}", BOUNCE[frame], text);
            }
            if let Some(transform) = doc.style(node, "transform") {
                text = format!("{text}  {transform}");
            }
        }
        if doc.has_class(node, "expanded")
            && let Some(detail) = doc.data(node, "detail")
        {
            text = format!("{text}\n{detail}");
        }
        text
    }
}

fn to_cells(rect: crate::core::document::Rect) -> Rect {
    Rect::new(
        rect.x.max(0.0) as u16,
        rect.y.max(0.0) as u16,
        rect.width.max(0.0) as u16,
        rect.height.max(0.0) as u16,
    )
}

impl Component for PageView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(page) = self.page else {
            let empty = Paragraph::new("Page not found.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        };

        let width = area.width.saturating_sub(1);
        let height = self.content_height.max(1);
        let content = Rect::new(0, 0, width, height);
        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let doc = self.document;
        for node in doc.descendants(page) {
            if !doc.is_rendered(node) {
                continue;
            }
            let Some(bounds) = doc.bounding_rect(node) else {
                continue;
            };
            let rect = to_cells(bounds).intersection(content);
            if rect.is_empty() {
                continue;
            }
            let style = self.style_for(node);
            let inset = u16::from(is_boxed(doc, node));

            if inset > 0 {
                scroll_view.render_widget(Block::bordered().border_style(style), rect);
            }

            // Own text sits above the first child
            let text_top = rect.y + inset;
            let text_bottom = doc
                .children(node)
                .first()
                .and_then(|c| doc.bounding_rect(*c))
                .map_or(rect.bottom().saturating_sub(inset), |c| c.y.max(0.0) as u16);
            let text_area = Rect::new(
                rect.x + inset,
                text_top,
                rect.width.saturating_sub(2 * inset),
                text_bottom.saturating_sub(text_top),
            )
            .intersection(content);
            if text_area.is_empty() {
                continue;
            }
            let paragraph = Paragraph::new(self.text_for(node))
                .style(style)
                .wrap(Wrap { trim: true });
            scroll_view.render_widget(paragraph, text_area);
        }

        let mut state = ScrollViewState::default();
        state.set_offset(Position {
            x: 0,
            y: self.scroll_y,
        });
        frame.render_stateful_widget(scroll_view, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::layout_document;
    use crate::core::site::SiteSpec;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(doc: &Document, page: &str, focus: Option<NodeId>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        let page = doc.get_by_id(page);
        let height = page.and_then(|p| doc.bounding_rect(p)).map_or(1.0, |r| r.height) as u16;
        terminal
            .draw(|f| {
                let mut view = PageView {
                    document: doc,
                    page,
                    focus,
                    scroll_y: 0,
                    content_height: height,
                    now_ms: 0,
                };
                view.render(f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn site_doc() -> Document {
        let mut doc = SiteSpec::embedded().unwrap().build_document();
        layout_document(&mut doc, 59);
        doc
    }

    #[test]
    fn test_inactive_page_draws_nothing() {
        let doc = site_doc();
        let screen = rendered(&doc, "home", None);
        assert!(!screen.contains("Welcome"));
    }

    #[test]
    fn test_active_page_draws_blocks() {
        let mut doc = site_doc();
        let about = doc.get_by_id("about").unwrap();
        doc.add_class(about, "active");
        let screen = rendered(&doc, "about", None);
        assert!(screen.contains("About Us"));
        assert!(screen.contains("Happy clients"));
    }

    #[test]
    fn test_flipped_card_shows_back() {
        let mut doc = site_doc();
        let home = doc.get_by_id("home").unwrap();
        doc.add_class(home, "active");
        let card = doc.query_selector(".flip-card").unwrap();
        doc.add_class(card, "flipped");
        let screen = rendered(&doc, "home", Some(card));
        assert!(screen.contains("Interfaces shaped"));
    }

    #[test]
    fn test_missing_page() {
        let doc = site_doc();
        let screen = rendered(&doc, "nowhere", None);
        assert!(screen.contains("Page not found."));
    }
}
