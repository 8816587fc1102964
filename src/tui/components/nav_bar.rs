//! # NavBar Component
//!
//! One-line navigation bar: site title, the nav links and the menu button.
//!
//! Narrow terminals play the part of a mobile viewport: links are only
//! listed while the menu (`.nav-menu.active`) is open.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::document::Document;
use crate::core::page::PageId;
use crate::tui::component::Component;

/// Below this width the links collapse behind the menu button.
pub const COMPACT_WIDTH: u16 = 60;

const MENU_LABEL: &str = "[≡]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Page(PageId),
    Menu,
}

#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub page: Option<PageId>,
    pub active: bool,
}

pub struct NavBar {
    pub title: String,
    pub links: Vec<NavLink>,
    pub menu_open: bool,
    /// Click targets recorded during the last render.
    pub hits: Vec<(Rect, NavTarget)>,
}

impl NavBar {
    /// Props from the document's `.nav-link`s and `.nav-menu`.
    pub fn from_document(title: &str, document: &Document) -> Self {
        let links = document
            .query_selector_all(".nav-link")
            .into_iter()
            .map(|link| NavLink {
                label: document.text(link).unwrap_or("").to_string(),
                page: document.data(link, "page").and_then(|p| p.parse().ok()),
                active: document.has_class(link, "active"),
            })
            .collect();
        let menu_open = document
            .query_selector(".nav-menu")
            .is_some_and(|menu| document.has_class(menu, "active"));
        Self {
            title: title.to_string(),
            links,
            menu_open,
            hits: Vec::new(),
        }
    }
}

impl Component for NavBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        let show_links = area.width >= COMPACT_WIDTH || self.menu_open;

        let mut spans = Vec::new();
        let mut x = area.x;

        let mut push = |text: String, style: Style, target: Option<NavTarget>, spans: &mut Vec<Span<'static>>| {
            let width = text.width() as u16;
            if let Some(target) = target {
                self.hits.push((Rect::new(x, area.y, width, 1), target));
            }
            x = x.saturating_add(width);
            spans.push(Span::styled(text, style));
        };

        push(
            format!(" {} ", self.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            None,
            &mut spans,
        );
        push(
            format!("{MENU_LABEL} "),
            if self.menu_open {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            },
            Some(NavTarget::Menu),
            &mut spans,
        );

        if show_links {
            for link in &self.links {
                let style = if link.active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                push(format!(" {} ", link.label), style, link.page.map(NavTarget::Page), &mut spans);
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl NavBar {
    pub fn hit_test(&self, column: u16, row: u16) -> Option<NavTarget> {
        self.hits
            .iter()
            .find(|(rect, _)| rect.contains((column, row).into()))
            .map(|(_, target)| *target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::site::SiteSpec;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn bar() -> NavBar {
        let doc = SiteSpec::embedded().unwrap().build_document();
        NavBar::from_document("Test", &doc)
    }

    #[test]
    fn test_links_come_from_document() {
        let bar = bar();
        let labels: Vec<&str> = bar.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Home", "About Us", "What We Do", "Contact"]);
        assert_eq!(bar.links[2].page, Some(PageId::WhatWeDo));
        assert!(!bar.menu_open);
    }

    #[test]
    fn test_wide_render_records_link_hits() {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        let mut bar = bar();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let pages: Vec<NavTarget> = bar.hits.iter().map(|(_, t)| *t).collect();
        assert_eq!(pages[0], NavTarget::Menu);
        assert_eq!(pages.len(), 5);

        let (contact, _) = bar.hits[4];
        assert_eq!(bar.hit_test(contact.x, 0), Some(NavTarget::Page(PageId::Contact)));
        assert_eq!(bar.hit_test(0, 0), None);
    }

    #[test]
    fn test_compact_render_hides_links_until_menu_opens() {
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        let mut bar = bar();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        assert_eq!(bar.hits.len(), 1);

        bar.menu_open = true;
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        assert_eq!(bar.hits.len(), 5);
    }
}
