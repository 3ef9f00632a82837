//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.orion/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OrionConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
    pub reply_delay_ms: Option<u64>,
    pub toast_duration_ms: Option<u64>,
    pub assistant_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub display_name: Option<String>,
    pub communication_style: Option<CommunicationStyle>,
}

/// Preferred tone, offered by the control center's profile tab.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CommunicationStyle {
    #[serde(rename = "formal")]
    #[default]
    Formal,
    #[serde(rename = "casual")]
    Casual,
    #[serde(rename = "technical")]
    Technical,
}

impl CommunicationStyle {
    pub const ALL: [CommunicationStyle; 3] = [
        CommunicationStyle::Formal,
        CommunicationStyle::Casual,
        CommunicationStyle::Technical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommunicationStyle::Formal => "Formal",
            CommunicationStyle::Casual => "Casual",
            CommunicationStyle::Technical => "Technical",
        }
    }

    pub fn next(self) -> CommunicationStyle {
        match self {
            CommunicationStyle::Formal => CommunicationStyle::Casual,
            CommunicationStyle::Casual => CommunicationStyle::Technical,
            CommunicationStyle::Technical => CommunicationStyle::Formal,
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;
pub const DEFAULT_ASSISTANT_NAME: &str = "ORION";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub display_name: String,
    pub communication_style: CommunicationStyle,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub theme: Theme,
    pub reply_delay: Duration,
    pub toast_duration: Duration,
    pub assistant_name: String,
    pub profile: Profile,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&OrionConfig::default(), &CliOverrides::default())
    }
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub theme: Option<Theme>,
    pub reply_delay_ms: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.orion/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".orion").join("config.toml"))
}

/// Load config from `~/.orion/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `OrionConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<OrionConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(OrionConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<OrionConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(OrionConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: OrionConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# ORION Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "light"                    # "light" or "dark" (env: ORION_THEME)
# reply_delay_ms = 1000              # simulated reply delay (env: ORION_REPLY_DELAY_MS)
# toast_duration_ms = 3000
# assistant_name = "ORION"

# [profile]
# display_name = "Ada"
# communication_style = "formal"     # "formal", "casual" or "technical"
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
pub fn resolve(config: &OrionConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| {
            std::env::var("ORION_THEME")
                .ok()
                .and_then(|name| Theme::parse(&name))
        })
        .or(config.general.theme)
        .unwrap_or_default();

    // Reply delay: CLI → env → config → default
    let reply_delay_ms = cli
        .reply_delay_ms
        .or_else(|| {
            std::env::var("ORION_REPLY_DELAY_MS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
        })
        .or(config.general.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    let assistant_name = config
        .general
        .assistant_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string());

    ResolvedConfig {
        theme,
        reply_delay: Duration::from_millis(reply_delay_ms),
        toast_duration: Duration::from_millis(
            config
                .general
                .toast_duration_ms
                .unwrap_or(DEFAULT_TOAST_DURATION_MS),
        ),
        assistant_name,
        profile: Profile {
            display_name: config.profile.display_name.clone().unwrap_or_default(),
            communication_style: config.profile.communication_style.unwrap_or_default(),
        },
    }
}
