//! # Viewport
//!
//! Scroll position over the active page plus an intersection notifier that
//! reports observed elements as they enter the visible area.
//!
//! The notifier mirrors the browser's: an element is intersecting when at
//! least `THRESHOLD` of its height overlaps the viewport shrunk by a bottom
//! margin, and it is reported once per entry (leaving and re-entering
//! reports it again).

use std::collections::HashSet;

use crate::core::document::{Document, NodeId, Rect};
use crate::core::effects::CELL_HEIGHT_PX;

pub const OBSERVED_SELECTOR: &str = ".text-block, .stats-card, .pillar-card";
pub const THRESHOLD: f64 = 0.1;
/// `rootMargin: 0 0 -50px 0`, in cells.
pub const BOTTOM_MARGIN: f64 = 50.0 / CELL_HEIGHT_PX;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
    pub content_height: f64,
}

impl Viewport {
    pub fn new(height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            height,
            content_height: 0.0,
        }
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.height).max(0.0)
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll_y + delta);
    }

    /// Scroll so `rect` sits in the middle of the viewport.
    pub fn center_on(&mut self, rect: Rect) {
        self.scroll_to(rect.y + rect.height / 2.0 - self.height / 2.0);
    }

    /// Fraction of `rect`'s height inside the margin-adjusted viewport.
    pub fn visible_ratio(&self, rect: Rect) -> f64 {
        let top = self.scroll_y;
        let bottom = self.scroll_y + (self.height - BOTTOM_MARGIN).max(0.0);
        let overlap = (rect.bottom().min(bottom) - rect.y.max(top)).max(0.0);
        if rect.height <= 0.0 {
            return if rect.y >= top && rect.y <= bottom { 1.0 } else { 0.0 };
        }
        overlap / rect.height
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntersectionObserver {
    observed: Vec<NodeId>,
    intersecting: HashSet<NodeId>,
}

impl IntersectionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, node: NodeId) {
        if !self.observed.contains(&node) {
            self.observed.push(node);
        }
    }

    /// Observe every element matching [`OBSERVED_SELECTOR`].
    pub fn observe_all(&mut self, document: &Document) -> usize {
        for node in document.query_selector_all(OBSERVED_SELECTOR) {
            self.observe(node);
        }
        self.observed.len()
    }

    pub fn observed(&self) -> &[NodeId] {
        &self.observed
    }

    /// Elements that started intersecting since the last check, in
    /// observation order. Elements that are not rendered never intersect.
    pub fn check(&mut self, document: &Document, viewport: &Viewport) -> Vec<NodeId> {
        let mut entered = Vec::new();
        for node in &self.observed {
            let visible = document.is_rendered(*node)
                && document
                    .bounding_rect(*node)
                    .is_some_and(|rect| viewport.visible_ratio(rect) >= THRESHOLD);
            if visible {
                if self.intersecting.insert(*node) {
                    entered.push(*node);
                }
            } else {
                self.intersecting.remove(node);
            }
        }
        entered
    }
}
