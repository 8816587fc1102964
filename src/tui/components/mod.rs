//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Every component is a props struct built fresh each frame from the core
//! state and rendered through the [`Component`](crate::tui::component::Component)
//! trait:
//!
//! - `NavBar`: title, nav links, menu button (records click targets)
//! - `PageView`: the active page inside a scroll view
//! - `Modal`: centered dialog (records its bounds for click-outside)
//! - `LoadingScreen`: startup cover
//! - `StatusBar`: page, status message, counters
//!
//! Components receive external data as props, not by reaching into `App`.
//! Where a component reads the document directly (`from_document`), it
//! only extracts props from it.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── nav_bar.rs
//! ├── page_view.rs
//! ├── modal.rs
//! ├── loading_screen.rs
//! └── status_bar.rs
//! ```

pub mod loading_screen;
pub mod modal;
pub mod nav_bar;
pub mod page_view;
pub mod status_bar;

pub use loading_screen::LoadingScreen;
pub use modal::Modal;
pub use nav_bar::{NavBar, NavTarget};
pub use page_view::PageView;
pub use status_bar::StatusBar;
