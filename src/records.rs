//! JSON records at the CLI boundary.
//!
//! The engine itself owns no wire protocol or file format; the CLI feeds it
//! plain JSON records (track descriptors, candidate lists, platform stats,
//! profiles, friend bundles) and prints plain JSON results. This module is
//! the only place that touches the filesystem.

use crate::matcher::{SearchCandidate, TrackDescriptor};
use crate::profile::{PlatformStats, UnifiedProfile};
use crate::recommend::FriendProfile;
use anyhow::{Context, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads and deserializes one JSON file, with the path in any error.
fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file at {}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid {what} JSON in {}", path.display()))?;
    debug!("Loaded {what} from {}", path.display());
    Ok(value)
}

/// Loads the source track to match.
pub fn load_track(path: &Path) -> Result<TrackDescriptor> {
    load_json(path, "track descriptor")
}

/// Loads a platform's search results for one query.
pub fn load_candidates(path: &Path) -> Result<Vec<SearchCandidate>> {
    load_json(path, "search candidates")
}

/// Loads one platform-stats file per path, in the given order.
pub fn load_stats(paths: &[impl AsRef<Path>]) -> Result<Vec<PlatformStats>> {
    paths
        .iter()
        .map(|p| load_json(p.as_ref(), "platform stats"))
        .collect()
}

/// Loads a previously computed unified profile.
pub fn load_profile(path: &Path) -> Result<UnifiedProfile> {
    load_json(path, "unified profile")
}

/// Loads the friend bundle (profiles with precomputed compatibility).
pub fn load_friends(path: &Path) -> Result<Vec<FriendProfile>> {
    load_json(path, "friend profiles")
}

/// Pretty-prints a result record to stdout, one JSON document per run.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(value).context("Failed to serialize result to JSON")?;
    println!("{rendered}");
    Ok(())
}
