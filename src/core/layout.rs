//! # Layout
//!
//! Gives every element inside a page a bounding box in terminal cells, so
//! geometry queries (viewport intersection, size-derived durations) have
//! something real to measure. Boxes are page-local: each page starts at
//! `y = 0`.
//!
//! Direct children of a page are *blocks*. Blocks other than headings get a
//! one-cell border on every side; their children stack vertically inside.

use textwrap::Options;
use unicode_width::UnicodeWidthStr;

use crate::core::document::{Document, NodeId, Rect};

/// Gap between consecutive blocks.
pub const BLOCK_GAP: f64 = 1.0;

/// Lines `text` occupies when wrapped at `width` columns.
pub fn wrapped_lines(text: &str, width: usize) -> usize {
    if text.is_empty() {
        return 0;
    }
    if width == 0 {
        return text.lines().count().max(1);
    }
    if !text.contains('\n') && text.width() <= width {
        return 1;
    }
    textwrap::wrap(text, Options::new(width)).len()
}

fn is_heading(document: &Document, node: NodeId) -> bool {
    document
        .element(node)
        .is_some_and(|e| matches!(e.tag.as_str(), "h1" | "h2" | "h3"))
}

/// Blocks other than headings are drawn with a border.
pub fn is_boxed(document: &Document, node: NodeId) -> bool {
    document
        .parent(node)
        .is_some_and(|p| document.has_class(p, "page"))
        && !is_heading(document, node)
}

/// Text shown for an element right now. Flip cards show their back face
/// while flipped.
pub fn display_text<'a>(document: &'a Document, node: NodeId) -> &'a str {
    if document.has_class(node, "flipped")
        && let Some(back) = document.data(node, "back")
    {
        return back;
    }
    document.text(node).unwrap_or("")
}

/// Tallest face of an element, so flipping never changes its height.
fn tallest_text(document: &Document, node: NodeId, width: usize) -> usize {
    let front = wrapped_lines(document.text(node).unwrap_or(""), width);
    let back = wrapped_lines(document.data(node, "back").unwrap_or(""), width);
    front.max(back)
}

/// Lay out one element at (`x`, `y`) with the given width; returns its height.
fn layout_node(document: &mut Document, node: NodeId, x: f64, y: f64, width: f64, boxed: bool) -> f64 {
    let inset = if boxed { 1.0 } else { 0.0 };
    let inner_width = (width - 2.0 * inset).max(1.0);

    let mut height = tallest_text(document, node, inner_width as usize) as f64;
    if document.has_class(node, "expanded")
        && let Some(detail) = document.data(node, "detail")
    {
        height += wrapped_lines(detail, inner_width as usize) as f64;
    }

    let children: Vec<NodeId> = document.children(node).to_vec();
    for child in children {
        let child_height = layout_node(document, child, x + inset, y + inset + height, inner_width, false);
        height += child_height;
    }

    let total = (height + 2.0 * inset).max(1.0);
    document.set_rect(node, Rect::new(x, y, width, total));
    total
}

/// Lay out every block of `page` for a viewport `width` cells wide.
/// Returns the page's content height.
pub fn layout_page(document: &mut Document, page: NodeId, width: u16) -> f64 {
    let width = f64::from(width.max(4));
    let blocks: Vec<NodeId> = document.children(page).to_vec();
    let mut y = 0.0;
    for (index, block) in blocks.into_iter().enumerate() {
        if index > 0 {
            y += BLOCK_GAP;
        }
        let boxed = is_boxed(document, block);
        y += layout_node(document, block, 0.0, y, width, boxed);
    }
    document.set_rect(page, Rect::new(0.0, 0.0, width, y));
    y
}

/// Lay out every `.page` in the document.
pub fn layout_document(document: &mut Document, width: u16) {
    for page in document.query_selector_all(".page") {
        layout_page(document, page, width);
    }
}
