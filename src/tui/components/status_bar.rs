//! # StatusBar Component
//!
//! Bottom line: current page, the last status message, demo counters and
//! the virtual clock.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::page::PageId;
use crate::tui::component::Component;

pub struct StatusBar {
    pub page: PageId,
    pub status_message: String,
    pub animation_count: u32,
    pub pending_timers: usize,
}

impl StatusBar {
    pub fn text(&self) -> String {
        let mut text = format!(" {} ", self.page.label());
        if !self.status_message.is_empty() && self.status_message != self.page.label() {
            text.push_str(&format!("| {} ", self.status_message));
        }
        text.push_str(&format!("| flips: {} ", self.animation_count));
        if self.pending_timers > 0 {
            text.push_str(&format!("| timers: {} ", self.pending_timers));
        }
        text
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help = Span::styled(" Tab page  ←/→ focus  Enter  o info  q quit ", Style::default().fg(Color::DarkGray));
        let line = Line::from(vec![Span::styled(self.text(), Style::default().fg(Color::Black).bg(Color::Gray)), help]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
