//! # Site Description
//!
//! The markup layer: a TOML file listing the pages, their content blocks
//! and the modal dialogs, turned into a [`Document`] carrying the class
//! vocabulary the engine queries.
//!
//! ```toml
//! [[pages]]
//! id = "about"
//!
//! [[pages.blocks]]
//! kind = "heading"
//! text = "About Us"
//! animation = "fade-in"
//!
//! [[pages.blocks]]
//! kind = "stats"
//! items = [{ label = "Clients", target = 150 }]
//! ```
//!
//! A default site is embedded in the binary; `--site` or the config file
//! can point at another one.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::demo::DEMO_BOX_ID;
use crate::core::document::{Document, NodeId};
use crate::core::effects::LOADING_SCREEN_ID;
use crate::core::page::PageId;

const EMBEDDED_SITE: &str = include_str!("../../assets/site.toml");

/// Classes that make an element interactive (focusable in the front-end).
pub const INTERACTIVE_SELECTOR: &str =
    ".flip-card, .approach-card, .pillar-card, .timeline-item, .animated-box, .submit-button";

// ============================================================================
// Site description
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteSpec {
    #[serde(default = "default_title")]
    pub title: String,
    pub pages: Vec<PageSpec>,
    #[serde(default)]
    pub modals: Vec<ModalSpec>,
}

fn default_title() -> String {
    "Pageflow".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageSpec {
    pub id: PageId,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModalSpec {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Entrance animation class for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entrance {
    FadeIn,
    SlideInLeft,
    SlideInRight,
    SlideInUp,
}

impl Entrance {
    pub fn class(self) -> &'static str {
        match self {
            Entrance::FadeIn => "fade-in",
            Entrance::SlideInLeft => "slide-in-left",
            Entrance::SlideInRight => "slide-in-right",
            Entrance::SlideInUp => "slide-in-up",
        }
    }

    /// Starting transform, undone by the staggered reveal.
    fn initial_transform(self) -> &'static str {
        match self {
            Entrance::FadeIn => "translateY(0)",
            Entrance::SlideInLeft => "translateX(-50px)",
            Entrance::SlideInRight => "translateX(50px)",
            Entrance::SlideInUp => "translateY(50px)",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatSpec {
    pub label: String,
    pub target: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardSpec {
    pub title: String,
    #[serde(default)]
    pub back: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PillarSpec {
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimelineSpec {
    pub year: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BlockSpec {
    Heading {
        text: String,
        #[serde(default)]
        animation: Option<Entrance>,
    },
    Text {
        text: String,
        #[serde(default)]
        animation: Option<Entrance>,
    },
    Stats {
        #[serde(default)]
        title: String,
        items: Vec<StatSpec>,
    },
    Cards {
        items: Vec<CardSpec>,
    },
    Approaches {
        items: Vec<String>,
    },
    Pillars {
        items: Vec<PillarSpec>,
    },
    Timeline {
        items: Vec<TimelineSpec>,
    },
    Demo {
        #[serde(default)]
        text: String,
    },
    Form {
        id: String,
        fields: Vec<String>,
    },
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum SiteError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    DuplicatePage(PageId),
    NoPages,
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::Io(e) => write!(f, "site I/O error: {e}"),
            SiteError::Parse(e) => write!(f, "site parse error: {e}"),
            SiteError::DuplicatePage(page) => write!(f, "page '{page}' is defined more than once"),
            SiteError::NoPages => write!(f, "site defines no pages"),
        }
    }
}

impl std::error::Error for SiteError {}

// ============================================================================
// Loading
// ============================================================================

impl SiteSpec {
    /// The default site shipped with the binary.
    pub fn embedded() -> Result<SiteSpec, SiteError> {
        Self::parse(EMBEDDED_SITE)
    }

    pub fn parse(contents: &str) -> Result<SiteSpec, SiteError> {
        let site: SiteSpec = toml::from_str(contents).map_err(SiteError::Parse)?;
        site.validate()?;
        Ok(site)
    }

    pub fn load(path: &Path) -> Result<SiteSpec, SiteError> {
        let contents = fs::read_to_string(path).map_err(SiteError::Io)?;
        let site = Self::parse(&contents)?;
        info!("Loaded site from {} ({} pages)", path.display(), site.pages.len());
        Ok(site)
    }

    fn validate(&self) -> Result<(), SiteError> {
        if self.pages.is_empty() {
            return Err(SiteError::NoPages);
        }
        let mut seen = HashSet::new();
        for page in &self.pages {
            if !seen.insert(page.id) {
                return Err(SiteError::DuplicatePage(page.id));
            }
        }
        Ok(())
    }

    pub fn has_page(&self, page: PageId) -> bool {
        self.pages.iter().any(|p| p.id == page)
    }

    /// Build the document: loading screen, nav bar, one `.page` section per
    /// page, then the modals.
    pub fn build_document(&self) -> Document {
        let mut doc = Document::new();
        let root = doc.root();

        let loader = element(&mut doc, root, "div", &["loading-screen"], "Loading...");
        doc.set_id(loader, LOADING_SCREEN_ID);

        let nav = element(&mut doc, root, "nav", &["navbar"], "");
        element(&mut doc, nav, "div", &["nav-brand"], &self.title);
        element(&mut doc, nav, "button", &["hamburger"], "Menu");
        let menu = element(&mut doc, nav, "ul", &["nav-menu"], "");
        for page in PageId::ALL.into_iter().filter(|p| self.has_page(*p)) {
            let link = element(&mut doc, menu, "a", &["nav-link"], page.label());
            doc.set_data(link, "page", page.as_str());
        }

        let main = element(&mut doc, root, "main", &[], "");
        for page in &self.pages {
            let section = element(&mut doc, main, "section", &["page"], "");
            doc.set_id(section, page.id.as_str());
            for block in &page.blocks {
                build_block(&mut doc, section, block);
            }
        }

        for modal in &self.modals {
            let node = element(&mut doc, root, "div", &["modal"], "");
            doc.set_id(node, &modal.id);
            doc.set_style(node, "display", "none");
            element(&mut doc, node, "h3", &["modal-title"], &modal.title);
            element(&mut doc, node, "p", &["modal-body"], &modal.body);
        }

        debug!("Built document with {} elements", doc.len());
        doc
    }
}

fn element(doc: &mut Document, parent: NodeId, tag: &str, classes: &[&str], text: &str) -> NodeId {
    let node = doc.append(parent, tag);
    for class in classes {
        doc.add_class(node, class);
    }
    if !text.is_empty() {
        doc.set_text(node, text);
    }
    node
}

fn with_entrance(doc: &mut Document, node: NodeId, animation: Option<Entrance>) {
    if let Some(animation) = animation {
        doc.add_class(node, animation.class());
        doc.set_style(node, "opacity", "0");
        doc.set_style(node, "transform", animation.initial_transform());
    }
}

fn build_block(doc: &mut Document, section: NodeId, block: &BlockSpec) {
    match block {
        BlockSpec::Heading { text, animation } => {
            let node = element(doc, section, "h2", &["section-title"], text);
            with_entrance(doc, node, *animation);
        }
        BlockSpec::Text { text, animation } => {
            let node = element(doc, section, "div", &["text-block"], text);
            with_entrance(doc, node, *animation);
        }
        BlockSpec::Stats { title, items } => {
            let card = element(doc, section, "div", &["stats-card"], title);
            for item in items {
                let stat = element(doc, card, "div", &["stat"], &item.label);
                let number = element(doc, stat, "span", &["stat-number"], "0");
                doc.set_data(number, "target", &item.target.to_string());
            }
        }
        BlockSpec::Cards { items } => {
            let grid = element(doc, section, "div", &["cards-grid"], "");
            for item in items {
                let card = element(doc, grid, "div", &["flip-card"], &item.title);
                doc.set_data(card, "back", &item.back);
            }
        }
        BlockSpec::Approaches { items } => {
            let list = element(doc, section, "div", &["approaches"], "");
            for item in items {
                element(doc, list, "div", &["approach-card"], item);
            }
        }
        BlockSpec::Pillars { items } => {
            let list = element(doc, section, "div", &["pillars"], "");
            for item in items {
                let pillar = element(doc, list, "div", &["pillar-card"], &item.title);
                doc.set_data(pillar, "detail", &item.detail);
            }
        }
        BlockSpec::Timeline { items } => {
            let list = element(doc, section, "div", &["timeline"], "");
            for item in items {
                element(doc, list, "div", &["timeline-item"], &format!("{}: {}", item.year, item.text));
            }
        }
        BlockSpec::Demo { text } => {
            let demo = element(doc, section, "div", &["demo-section"], text);
            let demo_box = element(doc, demo, "div", &["animated-box"], "[ demo ]");
            doc.set_id(demo_box, DEMO_BOX_ID);
        }
        BlockSpec::Form { id, fields } => {
            let form = element(doc, section, "form", &["contact-form"], "");
            doc.set_id(form, id);
            for field in fields {
                let input = element(doc, form, "div", &["form-input"], field);
                doc.set_data(input, "value", "");
            }
            let submit = element(doc, form, "button", &["submit-button"], "Send Message");
            doc.set_data(submit, "form", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_site_parses() {
        let site = SiteSpec::embedded().unwrap();
        for page in PageId::ALL {
            assert!(site.has_page(page), "embedded site is missing {page}");
        }
        assert!(site.modals.iter().any(|m| m.id == "infoModal"));
    }

    #[test]
    fn test_embedded_document_has_engine_vocabulary() {
        let doc = SiteSpec::embedded().unwrap().build_document();
        assert_eq!(doc.query_selector_all(".page").len(), 4);
        assert_eq!(doc.query_selector_all(".nav-link").len(), 4);
        assert!(!doc.query_selector_all("#about .stat-number").is_empty());
        assert!(!doc.query_selector_all(".flip-card").is_empty());
        assert!(doc.get_by_id(DEMO_BOX_ID).is_some());
        assert!(doc.get_by_id(LOADING_SCREEN_ID).is_some());
        assert!(doc.query_selector(".modal").is_some());
        assert!(doc.query_selector(".hamburger").is_some());
    }

    #[test]
    fn test_duplicate_page_rejected() {
        let toml = r#"
[[pages]]
id = "home"

[[pages]]
id = "home"
"#;
        assert!(matches!(SiteSpec::parse(toml), Err(SiteError::DuplicatePage(PageId::Home))));
    }

    #[test]
    fn test_unknown_page_id_rejected() {
        let toml = r#"
[[pages]]
id = "blog"
"#;
        assert!(matches!(SiteSpec::parse(toml), Err(SiteError::Parse(_))));
    }

    #[test]
    fn test_empty_site_rejected() {
        assert!(matches!(SiteSpec::parse("pages = []"), Err(SiteError::NoPages)));
    }

    #[test]
    fn test_blocks_build_expected_markup() {
        let toml = r#"
title = "Test"

[[pages]]
id = "contact"

[[pages.blocks]]
kind = "heading"
text = "Get in touch"
animation = "slide-in-up"

[[pages.blocks]]
kind = "form"
id = "contactForm"
fields = ["Name", "Email"]
"#;
        let site = SiteSpec::parse(toml).unwrap();
        let doc = site.build_document();

        // Only pages that exist get nav links
        let links = doc.query_selector_all(".nav-link");
        assert_eq!(links.len(), 1);
        assert_eq!(doc.text(links[0]), Some("Contact"));

        let heading = doc.query_selector("#contact .slide-in-up").unwrap();
        assert_eq!(doc.style(heading, "opacity"), Some("0"));
        assert_eq!(doc.style(heading, "transform"), Some("translateY(50px)"));

        assert_eq!(doc.query_selector_all("#contactForm .form-input").len(), 2);
        let submit = doc.query_selector(".submit-button").unwrap();
        assert_eq!(doc.data(submit, "form"), Some("contactForm"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = SiteSpec::load(Path::new("/definitely/not/here/site.toml"));
        assert!(matches!(result, Err(SiteError::Io(_))));
    }
}
