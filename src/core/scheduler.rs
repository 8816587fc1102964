//! # Animation Scheduler
//!
//! Sequences delayed visual mutations without blocking the caller:
//!
//! - [`AnimationScheduler::stagger`] spreads one task per element over
//!   increasing one-shot delays (cascading reveal).
//! - [`AnimationScheduler::animate_counter`] counts an element's text up to
//!   a target on a repeating ~60fps tick.
//!
//! Both only schedule work on the [`Stage`]; the ticks themselves arrive
//! later as [`Task::CounterTick`] and are fed back through
//! [`AnimationScheduler::tick`].

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::document::NodeId;
use crate::core::stage::{Stage, Task};
use crate::core::timer::TimerId;

pub const DEFAULT_STAGGER_STEP_MS: u64 = 200;
pub const DEFAULT_STATS_DELAY_MS: u64 = 500;
pub const DEFAULT_COUNTER_DURATION_MS: u64 = 2000;
pub const DEFAULT_COUNTER_TICK_MS: u64 = 16;

/// Timing knobs shared by the navigator and the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationTimings {
    pub stagger_step_ms: u64,
    pub stats_delay_ms: u64,
    pub counter_duration_ms: u64,
    pub counter_tick_ms: u64,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            stagger_step_ms: DEFAULT_STAGGER_STEP_MS,
            stats_delay_ms: DEFAULT_STATS_DELAY_MS,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            counter_tick_ms: DEFAULT_COUNTER_TICK_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CounterId(u64);

#[derive(Debug, Clone)]
struct CounterRun {
    element: NodeId,
    current: f64,
    increment: f64,
    target: f64,
    timer: TimerId,
}

/// What a single counter tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterProgress {
    /// Still counting; carries the value now displayed.
    Running(i64),
    /// Reached the target and stopped ticking.
    Finished,
    /// Unknown or cancelled counter, or its element disappeared.
    Gone,
}

#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    tick_ms: u64,
    next_counter: u64,
    counters: HashMap<CounterId, CounterRun>,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTER_TICK_MS)
    }
}

impl AnimationScheduler {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            tick_ms: tick_ms.max(1),
            next_counter: 1,
            counters: HashMap::new(),
        }
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// Schedule `apply(element)` for the element at position `i` after
    /// `i * step_ms`. Each element gets its own one-shot timer, so later
    /// elements fire regardless of earlier ones. Elements missing from the
    /// document are skipped without shifting the others.
    pub fn stagger<I, F>(&self, stage: &mut Stage, elements: I, step_ms: u64, apply: F) -> Vec<TimerId>
    where
        I: IntoIterator<Item = NodeId>,
        F: Fn(NodeId) -> Task,
    {
        let mut timers = Vec::new();
        for (index, element) in elements.into_iter().enumerate() {
            if !stage.document.contains(element) {
                continue;
            }
            let delay = (index as u64).saturating_mul(step_ms);
            timers.push(stage.set_timeout(delay, apply(element)));
        }
        timers
    }

    /// Start counting `element`'s text from 0 up to `target` over roughly
    /// `duration_ms`. Returns `None` (and does nothing) if the element is
    /// absent.
    pub fn animate_counter(
        &mut self,
        stage: &mut Stage,
        element: NodeId,
        target: i64,
        duration_ms: u64,
    ) -> Option<CounterId> {
        if !stage.document.contains(element) {
            return None;
        }

        let frames = duration_ms as f64 / self.tick_ms as f64;
        let target = target as f64;
        let increment = if frames > 0.0 { target / frames } else { target };

        let id = CounterId(self.next_counter);
        self.next_counter += 1;
        let timer = stage.timers.set_interval(self.tick_ms, Task::CounterTick(id));
        self.counters.insert(
            id,
            CounterRun {
                element,
                current: 0.0,
                increment,
                target,
                timer,
            },
        );
        debug!(
            "Counter {:?} on {} -> {} over {}ms (step {:.3})",
            id, element, target, duration_ms, increment
        );
        Some(id)
    }

    /// Advance one counter by a single frame.
    pub fn tick(&mut self, stage: &mut Stage, id: CounterId) -> CounterProgress {
        let Some(run) = self.counters.get_mut(&id) else {
            return CounterProgress::Gone;
        };
        if !stage.document.contains(run.element) {
            self.cancel(stage, id);
            return CounterProgress::Gone;
        }

        run.current += run.increment;
        let finished = run.current >= run.target;
        if finished {
            run.current = run.target;
        }
        let shown = run.current.floor() as i64;
        stage.document.set_text(run.element, &shown.to_string());

        if finished {
            let timer = run.timer;
            stage.timers.clear(timer);
            self.counters.remove(&id);
            CounterProgress::Finished
        } else {
            CounterProgress::Running(shown)
        }
    }

    /// Stop a running counter where it is.
    pub fn cancel(&mut self, stage: &mut Stage, id: CounterId) -> bool {
        match self.counters.remove(&id) {
            Some(run) => {
                stage.timers.clear(run.timer);
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, id: CounterId) -> bool {
        self.counters.contains_key(&id)
    }

    pub fn running_counters(&self) -> usize {
        self.counters.len()
    }
}
