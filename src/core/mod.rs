//! # Core Application Logic
//!
//! This module contains Pageflow's page engine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │  (this module)               │
//!                    │                              │
//!                    │  • Document + timers (Stage) │
//!                    │  • Navigator + scheduler     │
//!                    │  • State / Action / update() │
//!                    │                              │
//!                    │  No terminal I/O.            │
//!                    └──────────────┬───────────────┘
//!                                   │
//!                                   ▼
//!                            ┌────────────┐
//!                            │    TUI     │
//!                            │  Adapter   │
//!                            │ (ratatui)  │
//!                            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`document`], [`timer`], [`stage`]: the host environment model
//! - [`navigator`], [`scheduler`]: page switching and entrance sequencing
//! - [`effects`], [`demo`], [`viewport`], [`layout`]: everything around it
//! - [`site`]: the TOML site description the document is built from
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app

pub mod action;
pub mod config;
pub mod demo;
pub mod document;
pub mod effects;
pub mod layout;
pub mod navigator;
pub mod page;
pub mod scheduler;
pub mod site;
pub mod stage;
pub mod state;
pub mod timer;
pub mod viewport;
