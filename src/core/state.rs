//! # Application State
//!
//! Core state for Pageflow. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── stage: Stage                     // document + timer queue
//! ├── navigator: Navigator             // current page, stats latch, scheduler
//! ├── demo: AnimationState             // demo box lifecycle
//! ├── controller: AnimationController  // rotate-by-45° on the demo box
//! ├── observer: IntersectionObserver   // scroll-driven animations
//! ├── viewport: Viewport               // scroll position over the active page
//! ├── focus: Option<NodeId>            // focused interactive element
//! ├── notice: Option<String>           // form confirmation overlay
//! └── status_message: String           // status bar text
//! ```
//!
//! Every deferred [`Task`] the engine schedules comes back through
//! [`App::advance`], which is the only place the clock moves.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use crate::core::config::ResolvedConfig;
use crate::core::demo::{AnimationController, AnimationState, DEMO_BOX_ID};
use crate::core::document::NodeId;
use crate::core::effects::{self, LOADER_START_MS, MotionKind};
use crate::core::layout;
use crate::core::navigator::Navigator;
use crate::core::page::PageId;
use crate::core::site::{INTERACTIVE_SELECTOR, SiteSpec};
use crate::core::stage::{RevealEffect, Stage, Task};
use crate::core::viewport::{IntersectionObserver, Viewport};

/// Upper bound on tasks run by a single [`App::advance`] call.
pub const MAX_TASKS_PER_ADVANCE: usize = 10_000;

pub const INFO_MODAL_ID: &str = "infoModal";

/// Animations handed out to text blocks at startup, in rotation.
const TEXT_BLOCK_ANIMATIONS: [&str; 3] = ["slide-in-left", "slide-in-right", "slide-in-up"];
const DEFAULT_TEXT_BLOCK_ANIMATION: &str = "slide-in-left";

const DEFAULT_VIEWPORT_WIDTH: u16 = 80;
const DEFAULT_VIEWPORT_HEIGHT: f64 = 24.0;

pub struct App {
    pub title: String,
    pub stage: Stage,
    pub navigator: Navigator,
    pub demo: AnimationState,
    pub controller: AnimationController,
    pub observer: IntersectionObserver,
    pub viewport: Viewport,
    pub viewport_width: u16,
    pub focus: Option<NodeId>,
    pub notice: Option<String>,
    pub status_message: String,
    start_page: PageId,
    /// Pages the site defines, in navigation order.
    pages: Vec<PageId>,
    next_motion: MotionKind,
    rng: StdRng,
}

impl App {
    pub fn new(site: &SiteSpec, config: &ResolvedConfig) -> Self {
        let document = site.build_document();
        let controller = AnimationController::new(&document, DEMO_BOX_ID);
        Self {
            title: site.title.clone(),
            stage: Stage::new(document),
            navigator: Navigator::new(config.timings, config.cancel_pending_on_navigate),
            demo: AnimationState::new(),
            controller,
            observer: IntersectionObserver::new(),
            viewport: Viewport::new(DEFAULT_VIEWPORT_HEIGHT),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            focus: None,
            notice: None,
            status_message: String::from("Welcome to Pageflow!"),
            start_page: config.start_page,
            pages: PageId::ALL.into_iter().filter(|p| site.has_page(*p)).collect(),
            next_motion: MotionKind::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source, for reproducible demo animations.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn current_page(&self) -> PageId {
        self.navigator.current_page()
    }

    /// Startup sequence: schedule the loading screen, start observing,
    /// hide the startup-animated elements and show the start page.
    pub fn initialize(&mut self) {
        self.stage.set_timeout(LOADER_START_MS, Task::HideLoadingScreen);

        let observed = self.observer.observe_all(&self.stage.document);
        debug!("Observing {} elements for scroll animations", observed);

        self.init_staggered_animations();

        if !self.show_page(self.start_page.as_str()) {
            let fallback = self.pages.iter().copied().find(|p| *p != self.start_page);
            match fallback {
                Some(page) => {
                    warn!("Start page {} unavailable, falling back to {}", self.start_page, page);
                    self.show_page(page.as_str());
                }
                None => warn!("Start page {} unavailable and no other page to show", self.start_page),
            }
        }

        info!("App initialized");
        info!("Current page: {}", self.current_page());
        info!("State: {}", self.state_snapshot());
    }

    fn init_staggered_animations(&mut self) {
        let doc = &mut self.stage.document;

        let cards = doc.query_selector_all(".flip-card");
        for card in &cards {
            doc.set_style(*card, "opacity", "0");
            doc.set_style(*card, "transform", "translateY(30px)");
        }

        for (index, block) in doc.query_selector_all(".text-block").into_iter().enumerate() {
            let animation = TEXT_BLOCK_ANIMATIONS[index % TEXT_BLOCK_ANIMATIONS.len()];
            doc.set_data(block, "animation", animation);
            doc.set_style(block, "opacity", "0");
            doc.set_style(block, "transform", "translateY(30px)");
        }

        let step = self.navigator.timings().stagger_step_ms;
        self.navigator
            .scheduler()
            .stagger(&mut self.stage, cards, step, |element| Task::Reveal {
                element,
                effect: RevealEffect::Rise,
            });
    }

    /// Current page, navigator state and demo state as JSON, for logging.
    pub fn state_snapshot(&self) -> serde_json::Value {
        json!({
            "current_page": self.current_page(),
            "navigator": self.navigator.state(),
            "animation_state": self.demo,
            "controller_count": self.controller.count(),
            "now_ms": self.stage.now_ms(),
        })
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// Move the clock forward by `ms`, running every task that falls due.
    /// Returns how many tasks ran.
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.stage.now_ms().saturating_add(ms);
        let mut ran = 0;
        while ran < MAX_TASKS_PER_ADVANCE {
            let Some(fired) = self.stage.timers.pop_due(target) else {
                break;
            };
            self.run_task(fired.task);
            ran += 1;
        }
        if ran == MAX_TASKS_PER_ADVANCE {
            warn!("Task limit reached while advancing to {}ms", target);
        }
        self.stage.timers.set_now(target);
        if ran > 0 {
            self.relayout();
            self.check_intersections();
        }
        ran
    }

    pub fn run_task(&mut self, task: Task) {
        match task {
            Task::Reveal { element, effect } => {
                if !effect.apply(&mut self.stage.document, element) {
                    debug!("Reveal target {} is gone", element);
                }
            }
            Task::CounterTick(id) => {
                self.navigator.tick_counter(&mut self.stage, id);
            }
            Task::AnimateStats => {
                self.navigator.animate_stats(&mut self.stage);
            }
            Task::AddClass { element, class } => {
                if !self.stage.document.add_class(element, &class) {
                    debug!("Delayed class '{}' not added: {} is gone", class, element);
                }
            }
            Task::RemoveClass { element, class } => {
                self.stage.document.remove_class(element, &class);
            }
            Task::SetStyle { element, property, value } => {
                self.stage.document.set_style(element, &property, &value);
            }
            Task::HideModal(modal) => {
                if !effects::finish_close_modal(&mut self.stage.document, modal) {
                    debug!("Modal {} reopened or gone, left displayed", modal);
                }
            }
            Task::FinishSubmit(form) => {
                if let Some(notice) = effects::finish_submit(&mut self.stage.document, form) {
                    self.notice = Some(notice.to_string());
                }
            }
            Task::HideLoadingScreen => {
                effects::hide_loading_screen(&mut self.stage);
            }
        }
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// The page area changed size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport.height = f64::from(height);
        self.relayout();
        let boxes = effects::recalculate_animated_boxes(&mut self.stage.document);
        debug!("Resized to {}x{}, recalculated {} animated boxes", width, height, boxes);
        self.check_intersections();
    }

    pub fn relayout(&mut self) {
        layout::layout_document(&mut self.stage.document, self.viewport_width);
        let page = self.stage.document.get_by_id(self.current_page().as_str());
        self.viewport.content_height = page
            .and_then(|p| self.stage.document.bounding_rect(p))
            .map_or(0.0, |r| r.height);
        self.viewport.scroll_to(self.viewport.scroll_y);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.viewport.scroll_by(delta);
        self.check_intersections();
    }

    /// Feed newly visible elements to the scroll animations: stats cards
    /// start the stats pass, text blocks play their `data-animation`.
    pub fn check_intersections(&mut self) {
        let entered = self.observer.check(&self.stage.document, &self.viewport);
        for node in entered {
            let doc = &mut self.stage.document;
            if doc.has_class(node, "stats-card") {
                self.navigator.animate_stats(&mut self.stage);
            } else if doc.has_class(node, "text-block") {
                let class = doc
                    .data(node, "animation")
                    .unwrap_or(DEFAULT_TEXT_BLOCK_ANIMATION)
                    .to_string();
                doc.add_class(node, &class);
                RevealEffect::Entrance.apply(doc, node);
            } else {
                debug!("Observed element {} entered the viewport", node);
            }
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn show_page(&mut self, page_id: &str) -> bool {
        if !self.navigator.show_page(&mut self.stage, page_id) {
            self.status_message = format!("No such page: {page_id}");
            return false;
        }
        self.focus = None;
        self.viewport.scroll_y = 0.0;
        self.relayout();
        self.check_intersections();
        self.status_message = self.current_page().label().to_string();
        true
    }

    /// Show the next page the site defines, wrapping around.
    pub fn next_page(&mut self) -> bool {
        self.step_page(PageId::next)
    }

    /// Show the previous page the site defines, wrapping around.
    pub fn prev_page(&mut self) -> bool {
        self.step_page(PageId::prev)
    }

    fn step_page(&mut self, step: fn(PageId) -> PageId) -> bool {
        let current = self.current_page();
        let mut page = step(current);
        while page != current {
            if self.pages.contains(&page) {
                return self.show_page(page.as_str());
            }
            page = step(page);
        }
        false
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Interactive elements of the active page, in document order.
    pub fn interactive_elements(&self) -> Vec<NodeId> {
        let page = self.current_page().as_str();
        let selector = INTERACTIVE_SELECTOR
            .split(',')
            .map(|s| format!("#{} {}", page, s.trim()))
            .collect::<Vec<_>>()
            .join(", ");
        self.stage.document.query_selector_all(&selector)
    }

    /// Move focus by `step` through the interactive elements, wrapping.
    pub fn move_focus(&mut self, step: isize) -> Option<NodeId> {
        let elements = self.interactive_elements();
        if elements.is_empty() {
            self.focus = None;
            return None;
        }
        let len = elements.len() as isize;
        let next = match self.focus.and_then(|f| elements.iter().position(|e| *e == f)) {
            Some(pos) => (pos as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        };
        let node = elements[next as usize];
        self.focus = Some(node);
        self.scroll_into_view(node);
        Some(node)
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        let Some(rect) = self.stage.document.bounding_rect(node) else {
            return;
        };
        let top = self.viewport.scroll_y;
        let bottom = top + self.viewport.height;
        if rect.y < top || rect.bottom() > bottom {
            self.viewport.center_on(rect);
            self.check_intersections();
        }
    }

    /// Activate the focused element.
    pub fn activate_focused(&mut self) -> bool {
        match self.focus {
            Some(node) => self.activate(node),
            None => false,
        }
    }

    /// Run the interaction bound to the element's class.
    pub fn activate(&mut self, node: NodeId) -> bool {
        let doc = &self.stage.document;
        if doc.has_class(node, "flip-card") {
            let flipped = self.demo.flip_card(&mut self.stage.document, node);
            self.status_message = format!("Animations: {}", self.demo.animation_count);
            flipped
        } else if doc.has_class(node, "approach-card") {
            effects::highlight_card(&mut self.stage, node)
        } else if doc.has_class(node, "pillar-card") {
            let expanded = effects::expand_pillar(&mut self.stage.document, node);
            self.relayout();
            if let Some(rect) = expanded.and_then(|p| self.stage.document.bounding_rect(p)) {
                self.viewport.center_on(rect);
                self.check_intersections();
            }
            true
        } else if doc.has_class(node, "timeline-item") {
            effects::animate_timeline_item(&mut self.stage, node)
        } else if doc.has_class(node, "animated-box") {
            let id = doc.element(node).and_then(|e| e.id.clone());
            id.is_some_and(|id| effects::animate_card(&mut self.stage, &id))
        } else if doc.has_class(node, "submit-button") {
            let form = doc.data(node, "form").map(str::to_string);
            let submitted = form.is_some_and(|form| effects::submit_form(&mut self.stage, &form));
            if submitted {
                self.status_message = "Sending...".to_string();
            }
            submitted
        } else {
            debug!("Element {} has no interaction", node);
            false
        }
    }

    // ------------------------------------------------------------------
    // Chrome, modals, demo
    // ------------------------------------------------------------------

    pub fn toggle_menu(&mut self) -> bool {
        let open = effects::toggle_mobile_menu(&mut self.stage.document);
        self.status_message = if open { "Menu open" } else { "Menu closed" }.to_string();
        open
    }

    pub fn open_info_modal(&mut self) -> bool {
        effects::show_modal(&mut self.stage.document, INFO_MODAL_ID)
    }

    pub fn close_modal(&mut self, modal_id: &str) -> bool {
        effects::close_modal(&mut self.stage, modal_id)
    }

    /// Escape: dismiss the notice if one is up, otherwise close every open
    /// modal. Returns whether anything was dismissed.
    pub fn escape(&mut self) -> bool {
        if self.notice.take().is_some() {
            return true;
        }
        effects::close_open_modals(&mut self.stage) > 0
    }

    pub fn start_demo(&mut self) -> bool {
        let started = self.demo.start(&mut self.stage.document, &mut self.rng);
        if let Some(animation) = self.demo.current_animation.filter(|_| started) {
            self.status_message = format!("Demo: {}", animation.class());
        }
        started
    }

    pub fn stop_demo(&mut self) -> bool {
        let stopped = self.demo.stop(&mut self.stage.document);
        if stopped {
            self.status_message = "Demo stopped".to_string();
        }
        stopped
    }

    pub fn reset_demo(&mut self) -> bool {
        let reset = self.demo.reset(&mut self.stage.document);
        self.controller.reset(&mut self.stage.document);
        if reset {
            self.status_message = "Demo reset".to_string();
        }
        reset
    }

    pub fn rotate_demo(&mut self) -> u32 {
        let count = self.controller.animate(&mut self.stage.document);
        self.status_message = format!("Rotations: {count}");
        count
    }

    /// Apply randomised motion of the next kind to the demo box.
    pub fn preview_motion(&mut self) -> Option<MotionKind> {
        let demo_box = self.stage.document.get_by_id(DEMO_BOX_ID)?;
        let kind = self.next_motion;
        let props = effects::generate_animation_properties(kind, &mut self.rng);
        debug!("Motion preview: {}", json!(props));
        effects::apply_motion(&mut self.stage.document, demo_box, &props);
        self.next_motion = match kind {
            MotionKind::Bounce => MotionKind::Slide,
            MotionKind::Slide => MotionKind::Fade,
            MotionKind::Fade => MotionKind::Bounce,
        };
        self.status_message = format!("Motion: {kind:?} {:.0}ms", props.duration_ms);
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::{LOADER_FADE_MS, LOADING_SCREEN_ID, SUBMIT_NOTICE};
    use crate::test_support::test_app;

    fn initialized() -> App {
        let mut app = test_app().with_seed(5);
        app.resize(80, 24);
        app.initialize();
        app
    }

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Pageflow!");
        assert_eq!(app.current_page(), PageId::Home);
        assert!(app.notice.is_none());
        assert!(app.stage.timers.is_empty());
    }

    #[test]
    fn test_initialize_shows_start_page() {
        let app = initialized();
        assert_eq!(app.current_page(), PageId::Home);
        let home = app.stage.document.get_by_id("home").unwrap();
        assert!(app.stage.document.has_class(home, "active"));
        assert!(!app.stage.timers.is_empty());
    }

    #[test]
    fn test_start_page_from_config() {
        let site = SiteSpec::embedded().unwrap();
        let config = ResolvedConfig {
            start_page: PageId::Contact,
            ..Default::default()
        };
        let mut app = App::new(&site, &config);
        app.initialize();
        assert_eq!(app.current_page(), PageId::Contact);
    }

    #[test]
    fn test_loading_screen_lifecycle() {
        let mut app = initialized();
        let loader = app.stage.document.get_by_id(LOADING_SCREEN_ID).unwrap();
        app.advance(LOADER_START_MS - 1);
        assert!(!app.stage.document.has_class(loader, "hidden"));
        app.advance(1);
        assert!(app.stage.document.has_class(loader, "hidden"));
        app.advance(LOADER_FADE_MS);
        assert_eq!(app.stage.document.style(loader, "display"), Some("none"));
    }

    #[test]
    fn test_flip_cards_rise_in_at_startup() {
        let mut app = initialized();
        let cards = app.stage.document.query_selector_all(".flip-card");
        assert!(cards.len() >= 2);
        assert_eq!(app.stage.document.style(cards[1], "opacity"), Some("0"));
        app.advance(1000);
        for card in cards {
            assert_eq!(app.stage.document.style(card, "opacity"), Some("1"));
            assert_eq!(app.stage.document.style(card, "transition"), Some("all 0.6s ease"));
        }
    }

    #[test]
    fn test_visible_text_block_plays_its_animation() {
        let mut app = initialized();
        let block = app.stage.document.query_selector("#home .text-block").unwrap();
        let animation = app.stage.document.data(block, "animation").unwrap().to_string();
        assert!(app.stage.document.has_class(block, &animation));
        assert_eq!(app.stage.document.style(block, "opacity"), Some("1"));
    }

    #[test]
    fn test_about_stats_count_up() {
        let mut app = initialized();
        assert!(app.show_page("about"));
        assert!(!app.navigator.stats_animated());
        app.advance(3000);
        assert!(app.navigator.stats_animated());
        let shown: Vec<String> = app
            .stage
            .document
            .query_selector_all(".stat-number")
            .into_iter()
            .filter_map(|n| app.stage.document.text(n).map(str::to_string))
            .collect();
        assert_eq!(shown, vec!["150", "12", "320"]);
    }

    #[test]
    fn test_focus_wraps_and_activates() {
        let mut app = initialized();
        let elements = app.interactive_elements();
        assert!(!elements.is_empty());
        assert_eq!(app.move_focus(-1), elements.last().copied());
        assert_eq!(app.move_focus(1), elements.first().copied());

        let card = elements[0];
        assert!(app.stage.document.has_class(card, "flip-card"));
        assert!(app.activate_focused());
        assert!(app.stage.document.has_class(card, "flipped"));
        assert_eq!(app.demo.animation_count, 1);
    }

    #[test]
    fn test_page_change_clears_focus_and_scroll() {
        let mut app = initialized();
        app.move_focus(1);
        app.viewport.scroll_to(5.0);
        app.next_page();
        assert_eq!(app.current_page(), PageId::About);
        assert_eq!(app.focus, None);
        assert_eq!(app.viewport.scroll_y, 0.0);
        app.prev_page();
        assert_eq!(app.current_page(), PageId::Home);
    }

    #[test]
    fn test_failed_show_page_keeps_everything() {
        let mut app = initialized();
        app.show_page("contact");
        assert!(!app.show_page("nonexistent"));
        assert_eq!(app.current_page(), PageId::Contact);
        assert_eq!(app.status_message, "No such page: nonexistent");
    }

    #[test]
    fn test_form_submission_raises_notice() {
        let mut app = initialized();
        app.show_page("contact");
        let submit = app.stage.document.query_selector(".submit-button").unwrap();
        assert!(app.activate(submit));
        assert!(app.notice.is_none());
        app.advance(1000);
        assert_eq!(app.notice.as_deref(), Some(SUBMIT_NOTICE));
        assert!(app.escape());
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_escape_closes_info_modal() {
        let mut app = initialized();
        assert!(app.open_info_modal());
        assert!(app.escape());
        app.advance(300);
        let modal = app.stage.document.get_by_id(INFO_MODAL_ID).unwrap();
        assert_eq!(app.stage.document.style(modal, "display"), Some("none"));
        assert!(!app.escape());
    }

    #[test]
    fn test_demo_controls() {
        let mut app = initialized();
        assert!(app.start_demo());
        assert!(!app.start_demo());
        assert!(app.stop_demo());
        assert_eq!(app.rotate_demo(), 1);
        assert_eq!(app.rotate_demo(), 2);
        assert!(app.reset_demo());
        assert_eq!(app.controller.count(), 0);
    }

    #[test]
    fn test_preview_motion_cycles_kinds() {
        let mut app = initialized();
        assert_eq!(app.preview_motion(), Some(MotionKind::Bounce));
        assert_eq!(app.preview_motion(), Some(MotionKind::Slide));
        assert_eq!(app.preview_motion(), Some(MotionKind::Fade));
        let demo_box = app.stage.document.get_by_id(DEMO_BOX_ID).unwrap();
        assert!(app.stage.document.style(demo_box, "opacity").is_some());
    }

    #[test]
    fn test_expanding_pillar_grows_page() {
        let mut app = initialized();
        app.show_page("what-we-do");
        let before = app.viewport.content_height;
        let pillar = app.stage.document.query_selector(".pillar-card").unwrap();
        assert!(app.activate(pillar));
        assert!(app.stage.document.has_class(pillar, "expanded"));
        assert!(app.viewport.content_height > before);
    }

    #[test]
    fn test_delayed_class_lands_on_time() {
        let mut app = initialized();
        let item = app.stage.document.query_selector(".timeline-item").unwrap();
        effects::add_class_with_delay(&mut app.stage, item, "highlight", 250);
        app.advance(249);
        assert!(!app.stage.document.has_class(item, "highlight"));
        app.advance(1);
        assert!(app.stage.document.has_class(item, "highlight"));
    }

    fn partial_site(pages: &[&str]) -> SiteSpec {
        let toml: String = pages
            .iter()
            .map(|id| format!("[[pages]]\nid = \"{id}\"\nblocks = [{{ kind = \"heading\", text = \"{id}\" }}]\n\n"))
            .collect();
        SiteSpec::parse(&toml).unwrap()
    }

    fn active_pages(app: &App) -> usize {
        app.stage.document.query_selector_all(".page.active").len()
    }

    #[test]
    fn test_missing_home_falls_back_to_first_page() {
        let site = partial_site(&["about", "contact"]);
        let mut app = App::new(&site, &ResolvedConfig::default());
        app.initialize();
        assert_eq!(app.current_page(), PageId::About);
        assert_eq!(active_pages(&app), 1);
        let about = app.stage.document.get_by_id("about").unwrap();
        assert!(app.stage.document.has_class(about, "active"));
    }

    #[test]
    fn test_page_cycling_skips_missing_pages() {
        let site = partial_site(&["home", "contact"]);
        let mut app = App::new(&site, &ResolvedConfig::default());
        app.initialize();
        assert_eq!(app.current_page(), PageId::Home);

        assert!(app.next_page());
        assert_eq!(app.current_page(), PageId::Contact);
        assert!(app.next_page());
        assert_eq!(app.current_page(), PageId::Home);
        assert!(app.prev_page());
        assert_eq!(app.current_page(), PageId::Contact);
        assert_eq!(active_pages(&app), 1);
    }

    #[test]
    fn test_single_page_site_has_nowhere_to_step() {
        let site = partial_site(&["contact"]);
        let mut app = App::new(&site, &ResolvedConfig::default());
        app.initialize();
        assert_eq!(app.current_page(), PageId::Contact);
        assert!(!app.next_page());
        assert_eq!(app.current_page(), PageId::Contact);
    }

    #[test]
    fn test_snapshot_names_current_page() {
        let app = initialized();
        let snapshot = app.state_snapshot();
        assert_eq!(snapshot["current_page"], "home");
        assert_eq!(snapshot["animation_state"]["is_animating"], false);
    }
}
