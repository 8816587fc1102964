//! # Document Model
//!
//! An arena-backed element tree with the handful of operations the page
//! engine needs: lookup by id, selector queries, class lists, text, `data-*`
//! attributes, inline styles and bounding boxes.
//!
//! ```text
//! Document
//! ├── nodes: Vec<Element>          // arena, NodeId indexes into it
//! └── id_index: HashMap<id, NodeId> // first element registered with an id wins
//! ```
//!
//! Every mutator takes a `NodeId` and reports whether the node existed.
//! A stale or foreign id is never an error, just a no-op.

use log::warn;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned box in layout units (terminal cells).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub data: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            parent,
            ..Default::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    id_index: HashMap<String, NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body", None)],
            id_index: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Append a new element under `parent`. Falls back to the root when
    /// `parent` is not part of this document.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let parent = if self.contains(parent) { parent } else { self.root() };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) -> bool {
        if !self.contains(node) {
            return false;
        }
        if let Some(existing) = self.id_index.get(id)
            && *existing != node
        {
            warn!("Duplicate element id '{}' ignored for {}", id, node);
            return false;
        }
        if let Some(old) = self.nodes[node.0].id.take() {
            self.id_index.remove(&old);
        }
        self.nodes[node.0].id = Some(id.to_string());
        self.id_index.insert(id.to_string(), node);
        true
    }

    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(|e| e.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Ancestors of `node`, nearest first. Does not include `node` itself.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |n| self.parent(*n))
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Nearest ancestor-or-self carrying `class`.
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|n| self.has_class(*n, class))
    }

    // ------------------------------------------------------------------
    // Selector queries
    // ------------------------------------------------------------------

    /// All elements matching `selector`, in document order. A malformed
    /// selector matches nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Ok(parsed) => self.select_all(&parsed),
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }

    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    pub fn select_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector.groups.iter().any(|chain| self.matches_chain(node, chain))
    }

    fn matches_chain(&self, node: NodeId, chain: &[Compound]) -> bool {
        let Some((last, rest)) = chain.split_last() else {
            return false;
        };
        if !self.element(node).is_some_and(|e| last.matches(e)) {
            return false;
        }
        // Descendant combinators only, so the nearest matching ancestor is
        // always a valid choice.
        let mut ancestors = self.ancestors(node);
        for compound in rest.iter().rev() {
            let found = ancestors.by_ref().any(|a| {
                self.element(a).is_some_and(|e| compound.matches(e))
            });
            if !found {
                return false;
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Class list
    // ------------------------------------------------------------------

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        if !element.has_class(class) {
            element.classes.push(class.to_string());
        }
        true
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        element.classes.retain(|c| c != class);
        true
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class)
        }
    }

    // ------------------------------------------------------------------
    // Text, data attributes, inline style, geometry
    // ------------------------------------------------------------------

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.text.as_str())
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        element.text = text.to_string();
        true
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.data.get(key)).map(String::as_str)
    }

    pub fn set_data(&mut self, node: NodeId, key: &str, value: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        element.data.insert(key.to_string(), value.to_string());
        true
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.style.get(property)).map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        if value.is_empty() {
            element.style.remove(property);
        } else {
            element.style.insert(property.to_string(), value.to_string());
        }
        true
    }

    /// Effective inline opacity; elements without one are fully opaque.
    pub fn opacity(&self, node: NodeId) -> f64 {
        self.style(node, "opacity")
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(1.0)
    }

    pub fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.element(node).map(|e| e.rect)
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        element.rect = rect;
        true
    }

    /// Whether the element takes part in rendering: nothing on the way to
    /// the root is `display: none` and every enclosing page is active.
    pub fn is_rendered(&self, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }
        std::iter::once(node).chain(self.ancestors(node)).all(|n| {
            self.style(n, "display") != Some("none")
                && (!self.has_class(n, "page") || self.has_class(n, "active"))
        })
    }
}

// ============================================================================
// Selectors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError {
    pub selector: String,
    pub reason: &'static str,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector '{}': {}", self.selector, self.reason)
    }
}

impl std::error::Error for SelectorError {}

/// One `tag#id.class.class` step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        self.tag.as_ref().is_none_or(|t| t.eq_ignore_ascii_case(&element.tag))
            && self.id.as_ref().is_none_or(|id| element.id.as_ref() == Some(id))
            && self.classes.iter().all(|c| element.has_class(c))
    }
}

/// Comma separated groups of descendant chains, e.g.
/// `#about .fade-in, #about .slide-in-up`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Vec<Compound>>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Selector, SelectorError> {
        let err = |reason| SelectorError {
            selector: input.to_string(),
            reason,
        };

        let mut groups = Vec::new();
        for group in input.split(',') {
            let chain = group
                .split_whitespace()
                .map(|token| parse_compound(token).ok_or_else(|| err("malformed step")))
                .collect::<Result<Vec<_>, _>>()?;
            if chain.is_empty() {
                return Err(err("empty selector group"));
            }
            groups.push(chain);
        }
        Ok(Selector { groups })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(token: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = token;

    if let Some(after_star) = rest.strip_prefix('*') {
        rest = after_star;
    } else {
        let end = rest.find(['#', '.']).unwrap_or(rest.len());
        if end > 0 {
            let tag = &rest[..end];
            if !tag.chars().all(is_name_char) {
                return None;
            }
            compound.tag = Some(tag.to_string());
        }
        rest = &rest[end..];
    }

    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let end = body.find(['#', '.']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() || !name.chars().all(is_name_char) {
            return None;
        }
        match marker {
            '#' if compound.id.is_none() => compound.id = Some(name.to_string()),
            '.' => compound.classes.push(name.to_string()),
            _ => return None,
        }
        rest = &body[end..];
    }
    Some(compound)
}
