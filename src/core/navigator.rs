//! # Navigator
//!
//! Owns which page is visible and keeps the nav links and the per-page
//! entrance animations consistent with it.
//!
//! ```text
//! show_page(id)
//!   ├── look up #id            (missing → false, nothing changes)
//!   ├── .page      -= active, target += active
//!   ├── update_navigation      (.nav-link whose label matches)
//!   └── trigger_page_animations
//!         ├── about → reset stats latch, AnimateStats in 500ms
//!         └── entrance elements → stagger(200ms)
//! ```
//!
//! ## Stats latch
//!
//! `Idle → Running → Done`, reset to `Idle` every time the about page is
//! shown. `animate_stats` only starts a pass from `Idle`, so scroll-driven
//! re-triggers are ignored while counters run and after they finish.
//! [`Navigator::stats_animated`] reports `Done`.

use log::{debug, info, warn};
use serde::Serialize;

use crate::core::document::Document;
use crate::core::page::PageId;
use crate::core::scheduler::{AnimationScheduler, AnimationTimings, CounterId, CounterProgress};
use crate::core::stage::{RevealEffect, Stage, Task};
use crate::core::timer::TimerId;

pub const PAGE_CLASS: &str = "page";
pub const NAV_LINK_CLASS: &str = "nav-link";
pub const ACTIVE_CLASS: &str = "active";
pub const STAT_NUMBER_CLASS: &str = "stat-number";

/// Classes marking an element for staggered entrance on page show.
pub const ENTRANCE_CLASSES: [&str; 4] = ["fade-in", "slide-in-left", "slide-in-right", "slide-in-up"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatsLatch {
    Idle,
    Running,
    Done,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigatorState {
    pub current_page: PageId,
    pub stats: StatsLatch,
}

impl Default for NavigatorState {
    fn default() -> Self {
        Self {
            current_page: PageId::default(),
            stats: StatsLatch::Idle,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    state: NavigatorState,
    timings: AnimationTimings,
    /// Cancel the previous page's pending reveals and counters on navigation.
    cancel_pending: bool,
    scheduler: AnimationScheduler,
    /// Timers scheduled for the current visit (reveals, stats pass).
    visit_timers: Vec<TimerId>,
    /// Counters belonging to the current stats pass.
    stats_counters: Vec<CounterId>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(AnimationTimings::default(), false)
    }
}

impl Navigator {
    pub fn new(timings: AnimationTimings, cancel_pending: bool) -> Self {
        Self {
            state: NavigatorState::default(),
            timings,
            cancel_pending,
            scheduler: AnimationScheduler::new(timings.counter_tick_ms),
            visit_timers: Vec::new(),
            stats_counters: Vec::new(),
        }
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn current_page(&self) -> PageId {
        self.state.current_page
    }

    pub fn stats_animated(&self) -> bool {
        self.state.stats == StatsLatch::Done
    }

    pub fn timings(&self) -> AnimationTimings {
        self.timings
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut AnimationScheduler {
        &mut self.scheduler
    }

    /// Show the page with element id `page_id`. Unknown ids and pages
    /// missing from the document return false and leave everything as it
    /// was.
    pub fn show_page(&mut self, stage: &mut Stage, page_id: &str) -> bool {
        match page_id.parse::<PageId>() {
            Ok(page) => self.show(stage, page),
            Err(e) => {
                debug!("show_page ignored: {}", e);
                false
            }
        }
    }

    pub fn show(&mut self, stage: &mut Stage, page: PageId) -> bool {
        let Some(target) = stage.document.get_by_id(page.as_str()) else {
            warn!("Page not found: {}", page);
            return false;
        };

        if self.cancel_pending {
            self.cancel_visit(stage);
        }

        for other in stage.document.query_selector_all(&format!(".{PAGE_CLASS}")) {
            stage.document.remove_class(other, ACTIVE_CLASS);
        }
        stage.document.add_class(target, ACTIVE_CLASS);
        self.state.current_page = page;

        self.update_navigation(&mut stage.document, page);
        self.trigger_page_animations(stage, page);

        info!("Showing page {}", page);
        true
    }

    /// Highlight the nav link labelled for `active`, clearing all others.
    pub fn update_navigation(&self, document: &mut Document, active: PageId) {
        for link in document.query_selector_all(&format!(".{NAV_LINK_CLASS}")) {
            document.remove_class(link, ACTIVE_CLASS);
            if document.text(link) == Some(active.label()) {
                document.add_class(link, ACTIVE_CLASS);
            }
        }
    }

    /// Schedule the stats pass (about page only) and the staggered entrance
    /// of the page's animatable elements.
    pub fn trigger_page_animations(&mut self, stage: &mut Stage, page: PageId) {
        self.visit_timers.clear();

        if page == PageId::About {
            self.state.stats = StatsLatch::Idle;
            self.stats_counters.clear();
            let timer = stage.set_timeout(self.timings.stats_delay_ms, Task::AnimateStats);
            self.visit_timers.push(timer);
        }

        let selector = ENTRANCE_CLASSES
            .iter()
            .map(|class| format!("#{} .{}", page.as_str(), class))
            .collect::<Vec<_>>()
            .join(", ");
        let elements = stage.document.query_selector_all(&selector);
        debug!("Staggering {} entrance elements on {}", elements.len(), page);

        let timers = self.scheduler.stagger(stage, elements, self.timings.stagger_step_ms, |element| {
            Task::Reveal {
                element,
                effect: RevealEffect::Entrance,
            }
        });
        self.visit_timers.extend(timers);
    }

    /// Count every `.stat-number` up to its `data-target`. Returns false when
    /// the latch is not idle.
    pub fn animate_stats(&mut self, stage: &mut Stage) -> bool {
        if self.state.stats != StatsLatch::Idle {
            return false;
        }

        for stat in stage.document.query_selector_all(&format!(".{STAT_NUMBER_CLASS}")) {
            let Some(target) = stage
                .document
                .data(stat, "target")
                .and_then(|t| t.trim().parse::<i64>().ok())
            else {
                warn!("Stat {} has no numeric data-target, skipping", stat);
                continue;
            };
            if let Some(id) = self.scheduler.animate_counter(
                stage,
                stat,
                target,
                self.timings.counter_duration_ms,
            ) {
                self.stats_counters.push(id);
            }
        }

        self.state.stats = if self.stats_counters.is_empty() {
            StatsLatch::Done
        } else {
            StatsLatch::Running
        };
        debug!("Stats pass started with {} counters", self.stats_counters.len());
        true
    }

    /// Route a counter frame to the scheduler and close the stats latch once
    /// the pass's last counter stops.
    pub fn tick_counter(&mut self, stage: &mut Stage, id: CounterId) -> CounterProgress {
        let progress = self.scheduler.tick(stage, id);
        if matches!(progress, CounterProgress::Finished | CounterProgress::Gone)
            && let Some(pos) = self.stats_counters.iter().position(|c| *c == id)
        {
            self.stats_counters.remove(pos);
            if self.stats_counters.is_empty() && self.state.stats == StatsLatch::Running {
                self.state.stats = StatsLatch::Done;
                debug!("Stats pass complete");
            }
        }
        progress
    }

    fn cancel_visit(&mut self, stage: &mut Stage) {
        let timers = self.visit_timers.len();
        for timer in self.visit_timers.drain(..) {
            stage.timers.clear(timer);
        }
        let counters = self.stats_counters.len();
        for id in self.stats_counters.drain(..) {
            self.scheduler.cancel(stage, id);
        }
        if self.state.stats == StatsLatch::Running {
            self.state.stats = StatsLatch::Idle;
        }
        debug!("Cancelled {} timers and {} counters from previous visit", timers, counters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_document, run_for};

    fn setup() -> (Stage, Navigator) {
        (Stage::new(fixture_document()), Navigator::default())
    }

    fn active_pages(stage: &Stage) -> Vec<String> {
        stage
            .document
            .query_selector_all(".page.active")
            .into_iter()
            .filter_map(|n| stage.document.element(n).and_then(|e| e.id.clone()))
            .collect()
    }

    fn active_links(stage: &Stage) -> Vec<String> {
        stage
            .document
            .query_selector_all(".nav-link.active")
            .into_iter()
            .filter_map(|n| stage.document.text(n).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_every_page_activates_exactly_one_page_and_link() {
        let (mut stage, mut nav) = setup();
        for page in PageId::ALL {
            assert!(nav.show_page(&mut stage, page.as_str()));
            assert_eq!(nav.current_page(), page);
            assert_eq!(active_pages(&stage), vec![page.as_str().to_string()]);
            assert_eq!(active_links(&stage), vec![page.label().to_string()]);
        }
    }

    #[test]
    fn test_unknown_page_changes_nothing() {
        let (mut stage, mut nav) = setup();
        assert!(nav.show_page(&mut stage, "contact"));
        assert!(!nav.show_page(&mut stage, "nonexistent"));
        assert_eq!(nav.current_page(), PageId::Contact);
        assert_eq!(active_pages(&stage), vec!["contact".to_string()]);
        assert_eq!(active_links(&stage), vec!["Contact".to_string()]);
    }

    #[test]
    fn test_known_page_missing_from_document_fails() {
        let mut doc = Document::new();
        let root = doc.root();
        let home = doc.append(root, "section");
        doc.set_id(home, "home");
        doc.add_class(home, "page");
        let mut stage = Stage::new(doc);
        let mut nav = Navigator::default();

        assert!(nav.show_page(&mut stage, "home"));
        assert!(!nav.show(&mut stage, PageId::About));
        assert_eq!(nav.current_page(), PageId::Home);
        assert!(stage.document.has_class(home, "active"));
    }

    #[test]
    fn test_update_navigation_without_matching_label() {
        let (mut stage, nav) = setup();
        let link = stage.document.query_selector(".nav-link").unwrap();
        stage.document.add_class(link, "active");
        stage.document.set_text(link, "Start");
        nav.update_navigation(&mut stage.document, PageId::Home);
        assert!(active_links(&stage).is_empty());
    }

    #[test]
    fn test_entrance_elements_cascade() {
        let (mut stage, mut nav) = setup();
        nav.show_page(&mut stage, "home");
        let elements = stage
            .document
            .query_selector_all("#home .fade-in, #home .slide-in-left, #home .slide-in-right, #home .slide-in-up");
        assert_eq!(elements.len(), 3);

        run_for(&mut stage, &mut nav, 0);
        assert_eq!(stage.document.style(elements[0], "opacity"), Some("1"));
        assert_eq!(stage.document.style(elements[1], "opacity"), Some("0"));

        run_for(&mut stage, &mut nav, 200);
        assert_eq!(stage.document.style(elements[1], "opacity"), Some("1"));
        assert_eq!(stage.document.style(elements[2], "opacity"), Some("0"));

        run_for(&mut stage, &mut nav, 200);
        assert_eq!(stage.document.style(elements[2], "opacity"), Some("1"));
        assert_eq!(
            stage.document.style(elements[2], "transform"),
            Some("translateX(0) translateY(0)")
        );
    }

    #[test]
    fn test_about_latch_closes_after_counters_finish() {
        let (mut stage, mut nav) = setup();
        nav.show_page(&mut stage, "about");
        assert!(!nav.stats_animated());

        run_for(&mut stage, &mut nav, 499);
        assert_eq!(nav.state().stats, StatsLatch::Idle);

        run_for(&mut stage, &mut nav, 1);
        assert_eq!(nav.state().stats, StatsLatch::Running);
        assert!(!nav.stats_animated());

        run_for(&mut stage, &mut nav, 1900);
        assert!(!nav.stats_animated());

        run_for(&mut stage, &mut nav, 200);
        assert!(nav.stats_animated());
        let stats = stage.document.query_selector_all(".stat-number");
        let shown: Vec<&str> = stats.iter().filter_map(|s| stage.document.text(*s)).collect();
        assert_eq!(shown, vec!["150", "12"]);
    }

    #[test]
    fn test_animate_stats_is_latched() {
        let (mut stage, mut nav) = setup();
        nav.show_page(&mut stage, "about");
        assert!(nav.animate_stats(&mut stage));
        assert!(!nav.animate_stats(&mut stage));
        run_for(&mut stage, &mut nav, 3000);
        assert!(nav.stats_animated());
        assert!(!nav.animate_stats(&mut stage));
        assert_eq!(nav.scheduler().running_counters(), 0);
    }

    #[test]
    fn test_revisiting_about_resets_latch() {
        let (mut stage, mut nav) = setup();
        nav.show_page(&mut stage, "about");
        run_for(&mut stage, &mut nav, 3000);
        assert!(nav.stats_animated());

        nav.show_page(&mut stage, "home");
        nav.show_page(&mut stage, "about");
        assert!(!nav.stats_animated());
        run_for(&mut stage, &mut nav, 3000);
        assert!(nav.stats_animated());
    }

    #[test]
    fn test_fire_and_forget_by_default() {
        let (mut stage, mut nav) = setup();
        nav.show_page(&mut stage, "home");
        nav.show_page(&mut stage, "contact");
        // Home's later reveals still run after leaving the page
        run_for(&mut stage, &mut nav, 1000);
        for el in stage.document.query_selector_all("#home .fade-in, #home .slide-in-up") {
            assert_eq!(stage.document.style(el, "opacity"), Some("1"));
        }
    }

    #[test]
    fn test_cancel_pending_on_navigate() {
        let mut stage = Stage::new(fixture_document());
        let mut nav = Navigator::new(AnimationTimings::default(), true);
        nav.show_page(&mut stage, "about");
        run_for(&mut stage, &mut nav, 600);
        assert_eq!(nav.state().stats, StatsLatch::Running);

        nav.show_page(&mut stage, "home");
        assert_eq!(nav.scheduler().running_counters(), 0);
        assert_eq!(nav.state().stats, StatsLatch::Idle);

        // Home's own reveals are still scheduled
        assert!(!stage.timers.is_empty());
        run_for(&mut stage, &mut nav, 3000);
        let stat = stage.document.query_selector(".stat-number").unwrap();
        assert_ne!(stage.document.text(stat), Some("150"));
    }
}
