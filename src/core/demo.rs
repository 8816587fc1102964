//! # Demo Box
//!
//! The interactive animation demo: one box that can run a single looping
//! animation at a time, plus the rotate-by-45° controller.

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::core::document::{Document, NodeId};

pub const DEMO_BOX_ID: &str = "demoBox";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemoAnimation {
    Spinning,
    Bouncing,
}

impl DemoAnimation {
    pub const ALL: [DemoAnimation; 2] = [DemoAnimation::Spinning, DemoAnimation::Bouncing];

    pub fn class(self) -> &'static str {
        match self {
            DemoAnimation::Spinning => "spinning",
            DemoAnimation::Bouncing => "bouncing",
        }
    }

    pub fn random(rng: &mut impl Rng) -> DemoAnimation {
        DemoAnimation::ALL[rng.gen_range(0..DemoAnimation::ALL.len())]
    }
}

/// Lifecycle of the demo animation. Not reentrant: starting while running
/// is refused.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimationState {
    pub is_animating: bool,
    pub current_animation: Option<DemoAnimation>,
    pub animation_count: u32,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a random animation on the demo box.
    pub fn start(&mut self, document: &mut Document, rng: &mut impl Rng) -> bool {
        let Some(demo_box) = document.get_by_id(DEMO_BOX_ID) else {
            return false;
        };
        if self.is_animating {
            return false;
        }
        let animation = DemoAnimation::random(rng);
        document.add_class(demo_box, animation.class());
        self.is_animating = true;
        self.current_animation = Some(animation);
        debug!("Demo started: {:?}", animation);
        true
    }

    pub fn stop(&mut self, document: &mut Document) -> bool {
        let Some(demo_box) = document.get_by_id(DEMO_BOX_ID) else {
            return false;
        };
        if !self.is_animating {
            return false;
        }
        if let Some(animation) = self.current_animation.take() {
            document.remove_class(demo_box, animation.class());
        }
        self.is_animating = false;
        true
    }

    /// Stop whatever runs, clear inline motion and zero the counter.
    pub fn reset(&mut self, document: &mut Document) -> bool {
        let Some(demo_box) = document.get_by_id(DEMO_BOX_ID) else {
            return false;
        };
        self.stop(document);
        document.set_style(demo_box, "transform", "");
        document.set_style(demo_box, "transition", "");
        self.animation_count = 0;
        true
    }

    /// Toggle `flipped` on a card and count it as an animation.
    pub fn flip_card(&mut self, document: &mut Document, card: NodeId) -> bool {
        if !document.contains(card) {
            return false;
        }
        document.toggle_class(card, "flipped");
        self.animation_count += 1;
        true
    }
}

/// Rotates one element a further 45° per call and remembers how often.
#[derive(Debug, Clone)]
pub struct AnimationController {
    element: Option<NodeId>,
    count: u32,
}

impl AnimationController {
    pub fn new(document: &Document, element_id: &str) -> Self {
        Self {
            element: document.get_by_id(element_id),
            count: 0,
        }
    }

    /// Returns the new count, or 0 when the element is missing.
    pub fn animate(&mut self, document: &mut Document) -> u32 {
        match self.element {
            Some(element) if document.contains(element) => {
                self.count += 1;
                document.set_style(element, "transform", &format!("rotate({}deg)", self.count * 45));
                self.count
            }
            _ => 0,
        }
    }

    pub fn reset(&mut self, document: &mut Document) -> bool {
        match self.element {
            Some(element) if document.contains(element) => {
                self.count = 0;
                document.set_style(element, "transform", "");
                true
            }
            _ => false,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
