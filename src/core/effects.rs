//! # Effects
//!
//! Peripheral page glue: modals, the mobile menu, card and pillar
//! interactions, the simulated form submission, the loading screen and
//! size-derived animation timing. Each function is a short mutation of the
//! stage guarded by an existence check; deferred halves go through the
//! timer queue as [`Task`]s.

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::core::document::{Document, NodeId};
use crate::core::stage::{Stage, Task};
use crate::core::timer::TimerId;

/// Layout units are terminal cells; geometry formulas work in pixels.
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

pub const MIN_ANIMATION_MS: f64 = 300.0;
pub const MAX_ANIMATION_MS: f64 = 1000.0;

pub const MODAL_FADE_MS: u64 = 300;
pub const HIGHLIGHT_MS: u64 = 3000;
pub const TIMELINE_PULSE_MS: u64 = 600;
pub const SUBMIT_PROCESSING_MS: u64 = 1000;
pub const LOADER_START_MS: u64 = 1500;
pub const LOADER_FADE_MS: u64 = 500;

pub const LOADING_SCREEN_ID: &str = "loadingScreen";
pub const SUBMIT_NOTICE: &str = "Thank you for your message! We will get back to you soon.";

const BOUNCE_EASING: &str = "cubic-bezier(0.68, -0.55, 0.265, 1.55)";

// ============================================================================
// Timing helpers
// ============================================================================

/// Larger elements animate longer: `area / 1000` ms clamped to 300..=1000.
/// Missing elements get the minimum.
pub fn calculate_animation_duration(document: &Document, element: Option<NodeId>) -> f64 {
    let Some(rect) = element.and_then(|e| document.bounding_rect(e)) else {
        return MIN_ANIMATION_MS;
    };
    let area_px = rect.area() * CELL_WIDTH_PX * CELL_HEIGHT_PX;
    (area_px / 1000.0).clamp(MIN_ANIMATION_MS, MAX_ANIMATION_MS)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionKind {
    #[default]
    Bounce,
    Slide,
    Fade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationProperties {
    pub duration_ms: f64,
    pub easing: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Randomised motion parameters for one of the three motion kinds.
pub fn generate_animation_properties(kind: MotionKind, rng: &mut impl Rng) -> AnimationProperties {
    match kind {
        MotionKind::Bounce => AnimationProperties {
            duration_ms: rng.gen_range(500.0..1000.0),
            easing: BOUNCE_EASING,
            transform: Some(format!("scale({:.3})", 0.8 + rng.gen_range(0.0..0.4))),
            opacity: None,
        },
        MotionKind::Slide => AnimationProperties {
            duration_ms: rng.gen_range(200.0..500.0),
            easing: "ease-out",
            transform: Some(format!("translateX({:.1}px)", rng.gen_range(-10.0..10.0))),
            opacity: None,
        },
        MotionKind::Fade => AnimationProperties {
            duration_ms: rng.gen_range(300.0..700.0),
            easing: "ease-in-out",
            transform: None,
            opacity: Some(rng.gen_range(0.7..1.0)),
        },
    }
}

/// Apply generated motion to `element` as an inline transition.
pub fn apply_motion(document: &mut Document, element: NodeId, props: &AnimationProperties) -> bool {
    if !document.contains(element) {
        return false;
    }
    document.set_style(
        element,
        "transition",
        &format!("all {:.0}ms {}", props.duration_ms, props.easing),
    );
    if let Some(transform) = &props.transform {
        document.set_style(element, "transform", transform);
    }
    if let Some(opacity) = props.opacity {
        document.set_style(element, "opacity", &format!("{opacity:.2}"));
    }
    true
}

/// Recompute `animation-duration` for every `.animated-box`.
pub fn recalculate_animated_boxes(document: &mut Document) -> usize {
    let boxes = document.query_selector_all(".animated-box");
    for element in &boxes {
        let duration = calculate_animation_duration(document, Some(*element));
        document.set_style(*element, "animation-duration", &format!("{duration:.0}ms"));
    }
    boxes.len()
}

pub fn add_class_with_delay(stage: &mut Stage, element: NodeId, class: &str, delay_ms: u64) -> TimerId {
    stage.set_timeout(
        delay_ms,
        Task::AddClass {
            element,
            class: class.to_string(),
        },
    )
}

// ============================================================================
// Navigation chrome
// ============================================================================

/// Returns whether the menu is open afterwards.
pub fn toggle_mobile_menu(document: &mut Document) -> bool {
    let menu = document.query_selector(".nav-menu");
    let hamburger = document.query_selector(".hamburger");
    if let Some(hamburger) = hamburger {
        document.toggle_class(hamburger, "active");
    }
    menu.is_some_and(|menu| document.toggle_class(menu, "active"))
}

// ============================================================================
// Modals
// ============================================================================

pub fn show_modal(document: &mut Document, modal_id: &str) -> bool {
    let Some(modal) = document.get_by_id(modal_id) else {
        return false;
    };
    document.set_style(modal, "display", "flex");
    document.add_class(modal, "show");
    debug!("Modal {} shown", modal_id);
    true
}

/// Fade the modal out; it stops displaying once the fade is over.
pub fn close_modal(stage: &mut Stage, modal_id: &str) -> bool {
    let Some(modal) = stage.document.get_by_id(modal_id) else {
        return false;
    };
    stage.document.remove_class(modal, "show");
    stage.set_timeout(MODAL_FADE_MS, Task::HideModal(modal));
    true
}

/// End of the close fade. A modal reopened during the fade keeps displaying.
pub fn finish_close_modal(document: &mut Document, modal: NodeId) -> bool {
    if !document.contains(modal) || document.has_class(modal, "show") {
        return false;
    }
    document.set_style(modal, "display", "none")
}

/// Close every `.modal.show`. Returns how many were closed.
pub fn close_open_modals(stage: &mut Stage) -> usize {
    let open: Vec<String> = stage
        .document
        .query_selector_all(".modal.show")
        .into_iter()
        .filter_map(|m| stage.document.element(m).and_then(|e| e.id.clone()))
        .collect();
    open.iter().filter(|id| close_modal(stage, id)).count()
}

/// The id of the first open modal, if any.
pub fn open_modal(document: &Document) -> Option<String> {
    document
        .query_selector(".modal.show")
        .and_then(|m| document.element(m))
        .and_then(|e| e.id.clone())
}

// ============================================================================
// Cards, pillars, timeline
// ============================================================================

/// Pop the card with a size-derived duration, then put its transform back.
pub fn animate_card(stage: &mut Stage, card_id: &str) -> bool {
    let Some(card) = stage.document.get_by_id(card_id) else {
        return false;
    };
    let original = stage.document.style(card, "transform").unwrap_or("").to_string();
    let duration = calculate_animation_duration(&stage.document, Some(card));

    stage.document.set_style(
        card,
        "transition",
        &format!("transform {duration:.0}ms {BOUNCE_EASING}"),
    );
    stage.document.set_style(card, "transform", "scale(1.1) rotate(5deg)");
    stage.set_timeout(
        duration as u64,
        Task::SetStyle {
            element: card,
            property: "transform".into(),
            value: original,
        },
    );
    true
}

/// Single highlighted `.approach-card`, cleared again after 3s.
pub fn highlight_card(stage: &mut Stage, card: NodeId) -> bool {
    if !stage.document.contains(card) {
        return false;
    }
    for other in stage.document.query_selector_all(".approach-card") {
        stage.document.remove_class(other, "highlighted");
    }
    stage.document.add_class(card, "highlighted");
    stage.set_timeout(
        HIGHLIGHT_MS,
        Task::RemoveClass {
            element: card,
            class: "highlighted".into(),
        },
    );
    true
}

/// Collapse every pillar and expand `pillar` unless it was the expanded
/// one. Returns the pillar to scroll to when it was expanded.
pub fn expand_pillar(document: &mut Document, pillar: NodeId) -> Option<NodeId> {
    if !document.contains(pillar) {
        return None;
    }
    let was_expanded = document.has_class(pillar, "expanded");
    for other in document.query_selector_all(".pillar-card") {
        document.remove_class(other, "expanded");
    }
    if was_expanded {
        return None;
    }
    document.add_class(pillar, "expanded");
    Some(pillar)
}

pub fn animate_timeline_item(stage: &mut Stage, item: NodeId) -> bool {
    if !stage.document.add_class(item, "animated") {
        return false;
    }
    stage.set_timeout(
        TIMELINE_PULSE_MS,
        Task::RemoveClass {
            element: item,
            class: "animated".into(),
        },
    );
    true
}

// ============================================================================
// Form submission
// ============================================================================

/// Shrink the form while the (simulated) submission is processed.
pub fn submit_form(stage: &mut Stage, form_id: &str) -> bool {
    let Some(form) = stage.document.get_by_id(form_id) else {
        return false;
    };
    stage.document.set_style(form, "transform", "scale(0.95)");
    stage.document.set_style(form, "opacity", "0.7");
    stage.set_timeout(SUBMIT_PROCESSING_MS, Task::FinishSubmit(form));
    info!("Form {} submitted", form_id);
    true
}

/// Restore the form, clear its fields and produce the confirmation text.
pub fn finish_submit(document: &mut Document, form: NodeId) -> Option<&'static str> {
    if !document.contains(form) {
        return None;
    }
    document.set_style(form, "transform", "scale(1)");
    document.set_style(form, "opacity", "1");
    let fields: Vec<NodeId> = document
        .descendants(form)
        .into_iter()
        .filter(|n| document.has_class(*n, "form-input"))
        .collect();
    for field in fields {
        document.set_data(field, "value", "");
    }
    Some(SUBMIT_NOTICE)
}

// ============================================================================
// Loading screen
// ============================================================================

/// Start hiding the loading screen; it stops displaying after the fade.
pub fn hide_loading_screen(stage: &mut Stage) -> bool {
    let Some(loader) = stage.document.get_by_id(LOADING_SCREEN_ID) else {
        return false;
    };
    stage.document.add_class(loader, "hidden");
    stage.set_timeout(
        LOADER_FADE_MS,
        Task::SetStyle {
            element: loader,
            property: "display".into(),
            value: "none".into(),
        },
    );
    true
}
