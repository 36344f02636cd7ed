//! # Configuration Module
//!
//! Composes the per-component tuning parameters into one [`EngineConfig`]
//! and handles loading overrides from a JSON config file. Every knob has a
//! default encoding the documented contract constants, so a missing config
//! file is the normal case, not an error.
//!
//! ## Config File Location
//!
//! The CLI looks for overrides in the platform-standard config directory:
//! - Linux: `~/.config/harmonize/config.json`
//! - macOS: `~/Library/Application Support/harmonize/config.json`
//! - Windows: `%APPDATA%\harmonize\config.json`
//!
//! An explicit `--config <path>` flag takes precedence and, unlike the
//! default location, must exist.

use crate::compat::CompatConfig;
use crate::matcher::MatchConfig;
use crate::profile::ProfileCaps;
use crate::recommend::RecommendConfig;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// All engine tuning parameters in one place.
///
/// Passed explicitly into each component call; there is no process-wide
/// configuration state. Partial config files work: any omitted section or
/// field keeps its default.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub matching: MatchConfig,
    pub profile: ProfileCaps,
    pub compat: CompatConfig,
    pub recommend: RecommendConfig,
}

/// Returns the default config file path inside the platform config
/// directory, or `None` when the platform has no such directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("harmonize").join("config.json"))
}

impl EngineConfig {
    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config JSON in {}", path.display()))?;
        info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Resolves the effective configuration for a CLI invocation.
    ///
    /// An explicit path must load successfully; otherwise the default
    /// location is tried and silently skipped when absent.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
            debug!("No config file at {}, using defaults", path.display());
        }

        Ok(Self::default())
    }
}
