//! # Stage
//!
//! The host environment the engine mutates: the document plus the timer
//! facility. Deferred work is described by [`Task`] values rather than
//! closures, so the owner of the stage decides how each one is run.

use crate::core::document::{Document, NodeId};
use crate::core::scheduler::CounterId;
use crate::core::timer::{TimerId, TimerQueue};

/// Deferred DOM mutation waiting in the timer queue.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Staggered entrance of one element.
    Reveal { element: NodeId, effect: RevealEffect },
    /// One frame of a running counter.
    CounterTick(CounterId),
    /// The delayed statistics pass for the about page.
    AnimateStats,
    AddClass { element: NodeId, class: String },
    RemoveClass { element: NodeId, class: String },
    SetStyle {
        element: NodeId,
        property: String,
        value: String,
    },
    /// End of a modal's close fade.
    HideModal(NodeId),
    /// End of the simulated form submission.
    FinishSubmit(NodeId),
    /// Start fading out the loading screen.
    HideLoadingScreen,
}

/// Inline style changes applied when a staggered element comes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEffect {
    /// Page entrance: visible, translation cleared on both axes.
    Entrance,
    /// Startup card rise: visible, vertical offset cleared, eased transition.
    Rise,
}

impl RevealEffect {
    pub fn apply(self, document: &mut Document, element: NodeId) -> bool {
        match self {
            RevealEffect::Entrance => {
                document.set_style(element, "opacity", "1")
                    && document.set_style(element, "transform", "translateX(0) translateY(0)")
            }
            RevealEffect::Rise => {
                document.set_style(element, "opacity", "1")
                    && document.set_style(element, "transform", "translateY(0)")
                    && document.set_style(element, "transition", "all 0.6s ease")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stage {
    pub document: Document,
    pub timers: TimerQueue<Task>,
}

impl Stage {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            timers: TimerQueue::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn set_timeout(&mut self, delay_ms: u64, task: Task) -> TimerId {
        self.timers.set_timeout(delay_ms, task)
    }
}
