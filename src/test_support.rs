//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::ResolvedConfig;
use crate::core::document::{Document, NodeId, Rect};
use crate::core::navigator::Navigator;
use crate::core::page::PageId;
use crate::core::site::SiteSpec;
use crate::core::stage::{Stage, Task};
use crate::core::state::App;

fn add(doc: &mut Document, parent: NodeId, tag: &str, classes: &[&str], text: &str) -> NodeId {
    let node = doc.append(parent, tag);
    for class in classes {
        doc.add_class(node, class);
    }
    doc.set_text(node, text);
    node
}

/// A small hand-built document with the class vocabulary the engine
/// queries:
///
/// ```text
/// nav > .nav-link x4
/// #home.page      > .fade-in, .slide-in-left, .slide-in-up  (opacity 0)
/// #about.page     > .stats-card > .stat-number[150], .stat-number[12]
/// #what-we-do.page
/// #contact.page   > form#contactForm
/// ```
pub fn fixture_document() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let nav = add(&mut doc, root, "nav", &["nav-menu"], "");
    for page in PageId::ALL {
        add(&mut doc, nav, "a", &["nav-link"], page.label());
    }

    for page in PageId::ALL {
        let section = add(&mut doc, root, "section", &["page"], "");
        doc.set_id(section, page.as_str());
        doc.set_rect(section, Rect::new(0.0, 0.0, 80.0, 40.0));
    }

    let home = doc.get_by_id("home").unwrap_or(root);
    for class in ["fade-in", "slide-in-left", "slide-in-up"] {
        let el = add(&mut doc, home, "div", &[class], class);
        doc.set_style(el, "opacity", "0");
    }

    let about = doc.get_by_id("about").unwrap_or(root);
    let card = add(&mut doc, about, "div", &["stats-card"], "");
    for target in ["150", "12"] {
        let stat = add(&mut doc, card, "span", &["stat-number"], "0");
        doc.set_data(stat, "target", target);
    }

    let contact = doc.get_by_id("contact").unwrap_or(root);
    let form = add(&mut doc, contact, "form", &["contact-form"], "");
    doc.set_id(form, "contactForm");

    doc
}

/// Advance the stage clock by `ms`, running the tasks the navigator owns.
/// Other tasks are dropped.
pub fn run_for(stage: &mut Stage, nav: &mut Navigator, ms: u64) {
    let target = stage.now_ms() + ms;
    while let Some(fired) = stage.timers.pop_due(target) {
        match fired.task {
            Task::Reveal { element, effect } => {
                effect.apply(&mut stage.document, element);
            }
            Task::CounterTick(id) => {
                nav.tick_counter(stage, id);
            }
            Task::AnimateStats => {
                nav.animate_stats(stage);
            }
            _ => {}
        }
    }
    stage.timers.set_now(target);
}

/// Creates a test App over the embedded default site.
pub fn test_app() -> App {
    let site = SiteSpec::embedded().expect("embedded site parses");
    App::new(&site, &ResolvedConfig::default())
}
