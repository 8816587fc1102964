//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pageflow/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::page::PageId;
use crate::core::scheduler::AnimationTimings;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PageflowConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_page: Option<PageId>,
    pub site_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnimationConfig {
    pub stagger_step_ms: Option<u64>,
    pub stats_delay_ms: Option<u64>,
    pub counter_duration_ms: Option<u64>,
    pub counter_tick_ms: Option<u64>,
    pub cancel_pending_on_navigate: Option<bool>,
}

/// Values given on the command line. `None`/`false` means not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub page: Option<PageId>,
    pub site: Option<PathBuf>,
    pub cancel_pending: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "pageflow.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

pub const ENV_START_PAGE: &str = "PAGEFLOW_START_PAGE";
pub const ENV_SITE_FILE: &str = "PAGEFLOW_SITE_FILE";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_page: PageId,
    /// `None` means the embedded site.
    pub site_file: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub timings: AnimationTimings,
    pub cancel_pending_on_navigate: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            start_page: PageId::default(),
            site_file: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: DEFAULT_LOG_LEVEL,
            timings: AnimationTimings::default(),
            cancel_pending_on_navigate: false,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.pageflow/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pageflow").join("config.toml"))
}

/// Load config from `~/.pageflow/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PageflowConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PageflowConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PageflowConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PageflowConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PageflowConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PageflowConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Pageflow Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_page = "home"              # "home", "about", "what-we-do", "contact"
# site_file = "site.toml"          # Or set PAGEFLOW_SITE_FILE; embedded site if unset
# log_file = "pageflow.log"
# log_level = "debug"              # "off", "error", "warn", "info", "debug", "trace"

# [animation]
# stagger_step_ms = 200
# stats_delay_ms = 500
# counter_duration_ms = 2000
# counter_tick_ms = 16
# cancel_pending_on_navigate = false
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PageflowConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an explicit environment lookup.
pub fn resolve_with_env<F>(config: &PageflowConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Start page: CLI → env → config → default
    let start_page = cli
        .page
        .or_else(|| {
            env(ENV_START_PAGE).and_then(|value| match value.parse::<PageId>() {
                Ok(page) => Some(page),
                Err(e) => {
                    warn!("Ignoring {}: {}", ENV_START_PAGE, e);
                    None
                }
            })
        })
        .or(config.general.start_page)
        .unwrap_or_default();

    // Site file: CLI → env → config → embedded
    let site_file = cli
        .site
        .clone()
        .or_else(|| env(ENV_SITE_FILE).map(PathBuf::from))
        .or_else(|| config.general.site_file.clone());

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse::<LevelFilter>().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    let defaults = AnimationTimings::default();
    let anim = &config.animation;
    let timings = AnimationTimings {
        stagger_step_ms: anim.stagger_step_ms.unwrap_or(defaults.stagger_step_ms),
        stats_delay_ms: anim.stats_delay_ms.unwrap_or(defaults.stats_delay_ms),
        counter_duration_ms: anim.counter_duration_ms.unwrap_or(defaults.counter_duration_ms),
        counter_tick_ms: anim.counter_tick_ms.unwrap_or(defaults.counter_tick_ms).max(1),
    };

    ResolvedConfig {
        start_page,
        site_file,
        log_file: config
            .general
            .log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        log_level,
        timings,
        cancel_pending_on_navigate: cli.cancel_pending || anim.cancel_pending_on_navigate.unwrap_or(false),
    }
}
