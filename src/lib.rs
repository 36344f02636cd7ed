//! Cross-platform track matching and music-taste compatibility engine.
//!
//! Core modules:
//! - [`normalize`] - Token-set text normalization
//! - [`matcher`] - Fuzzy candidate scoring and best-match selection
//! - [`profile`] - Cross-platform listening-stats aggregation
//! - [`compat`] - Pairwise compatibility scoring and tiers
//! - [`recommend`] - Friend-based artist recommendations
//!
//! ### Supporting Modules
//!
//! - [`config`] - Engine tuning parameters and config-file loading
//! - [`error`] - Typed input-shape errors
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`records`] - JSON record loading for the CLI boundary
//!
//! ## Quick Start Example
//!
//! ```
//! use harmonize::matcher::{find_best_match, MatchConfig, SearchCandidate, TrackDescriptor};
//! use harmonize::profile::{aggregate, PlatformStats, ProfileCaps, WeightedItem};
//! use harmonize::compat::{compatibility, CompatConfig};
//!
//! // Match a source track against another platform's search results.
//! let target = TrackDescriptor {
//!     title: "Blinding Lights".to_string(),
//!     artist: "The Weeknd".to_string(),
//!     album: None,
//! };
//! let candidates = vec![SearchCandidate {
//!     id: "yt123".to_string(),
//!     title: "Blinding Lights (Official Video)".to_string(),
//!     artist: "The Weeknd".to_string(),
//! }];
//! let result = find_best_match(&target, &candidates, &MatchConfig::default());
//! assert!(result.matched);
//!
//! // Build a unified profile and compare a user with themselves.
//! let stats = PlatformStats {
//!     platform: "spotify".to_string(),
//!     period: None,
//!     minutes: 420.0,
//!     tracks: 120,
//!     top_artists: vec![WeightedItem::new("Daft Punk", 180.0)],
//!     top_genres: vec![WeightedItem::new("electronic", 300.0)],
//!     top_tracks: vec![WeightedItem::track("Around the World", "Daft Punk", 60.0)],
//! };
//! let profile = aggregate(&[stats], &ProfileCaps::default())?;
//! let twins = compatibility(&profile, &profile, &CompatConfig::default());
//! assert_eq!(twins.overall, 100.0);
//! # Ok::<(), harmonize::error::InputShapeError>(())
//! ```
//!
//! ## Engine Details
//!
//! The matcher scores a candidate as a weighted token-overlap of its title
//! and artist against the target (`0.4 * title + 0.6 * artist` by default,
//! since artist names are more canonical than titles). A match requires the
//! best score to clear a 0.6 confidence floor strictly. Ties keep the
//! platform's own relevance order.
//!
//! The aggregator sums listening minutes additively across platforms and
//! merges top lists case-insensitively with stable, deterministic ranking.
//! The compatibility engine computes Jaccard overlap of two profiles' top
//! artists and genres, combines them `0.6/0.4` into a 0-100 score, and
//! classifies the pair into a tier from `Twins` down to `WorldsApart`.
//!
//! ## Purity & Concurrency
//!
//! Every engine function is a pure, synchronous function over its inputs:
//! no I/O, no shared mutable state, no global caches. Independent
//! computations (per-candidate scores, per-pair compatibility) fan out
//! across rayon where batching helps; ordering guarantees hold only within
//! a single computation, as documented per function.
//!
//! ## Error Handling
//!
//! Structured inputs fail fast with [`error::InputShapeError`] when they
//! violate the shape contract; degenerate-but-valid inputs (empty candidate
//! lists, empty profiles, zero minutes) produce well-defined zero/empty
//! results. The CLI boundary wraps file and JSON errors in
//! `anyhow::Result` with path context.

pub mod cli;
pub mod compat;
pub mod config;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod profile;
pub mod records;
pub mod recommend;
