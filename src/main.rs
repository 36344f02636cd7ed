//! # Harmonize - Track Matching & Taste Compatibility CLI
//!
//! Harmonize exposes the matching and compatibility engine as a small CLI:
//! every command reads plain JSON record files and prints a single JSON
//! result document, so surrounding services (schedulers, web backends,
//! shell pipelines) can drive the engine without linking the library.
//!
//! ## Architecture
//!
//! - `cli`: Command-line interface definitions
//! - `normalize`: Token-set text normalization
//! - `matcher`: Candidate scoring and best-match selection
//! - `profile`: Cross-platform stats aggregation
//! - `compat`: Pairwise compatibility scoring
//! - `recommend`: Friend-based artist recommendations
//! - `config`: Engine tuning parameters and config-file loading
//! - `records`: JSON file loading and result printing
//!
//! ## Usage
//!
//! ```bash
//! # Match a track against a platform's search results
//! harmonize match-track --target track.json --candidates results.json
//!
//! # Build a unified listening profile
//! harmonize profile spotify.json youtube.json > me.json
//!
//! # Compare two users
//! harmonize compare --left me.json --right you.json
//!
//! # Recommend artists from compatible friends
//! harmonize recommend --profile me.json --friends friends.json
//! ```

use anyhow::Result;
use harmonize::{cli, compat, config, matcher, profile, recommend, records};
use clap::{CommandFactory, Parser};
use log::{info, warn};

/// Main entry point for the Harmonize application.
///
/// Initializes logging, parses command-line arguments, resolves the engine
/// configuration, and routes commands to the appropriate module functions.
/// All operations return Results for consistent error handling throughout
/// the application.
///
/// # Error Handling
///
/// Uses `anyhow::Result` for rich error context. Errors are automatically
/// propagated and displayed to the user with helpful context messages.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug harmonize compare ...` - Enable debug logging
/// - `RUST_LOG=harmonize::matcher=trace harmonize match-track ...` - Module-specific logging
fn main() -> Result<()> {
    // Initialize environment logger for debugging and monitoring
    env_logger::init();

    // Parse command-line arguments using Clap derive macros
    let args = cli::Args::parse();

    // Engine tuning: explicit --config wins, then the platform config
    // directory, then documented defaults.
    let engine = config::EngineConfig::resolve(args.config.as_deref())?;

    // Route commands to appropriate module functions
    match args.command {
        cli::Command::MatchTrack { target, candidates, threshold } => {
            let target = records::load_track(&target)?;
            let candidates = records::load_candidates(&candidates)?;

            let mut match_config = engine.matching;
            if let Some(t) = threshold {
                match_config.threshold = t;
            }

            info!(
                "Matching {:?} - {:?} against {} candidate(s)",
                target.title,
                target.artist,
                candidates.len()
            );
            let result = matcher::find_best_match(&target, &candidates, &match_config);
            records::print_json(&result)?;
        }
        cli::Command::Query { target } => {
            let target = records::load_track(&target)?;
            println!("{}", matcher::build_search_query(&target));
        }
        cli::Command::Profile { stats, period } => {
            let mut all_stats = records::load_stats(&stats)?;
            if let Some(period) = period {
                // Keep matching periods; records without a period are kept
                // too, since old exports predate the period field.
                all_stats.retain(|s| s.period.is_none() || s.period == Some(period));
            }

            let (unified, errors) = profile::aggregate_partial(&all_stats, &engine.profile);
            if !errors.is_empty() {
                warn!("{} platform(s) skipped for malformed stats", errors.len());
            }
            info!(
                "Unified profile: {:.0} minutes over {} platform(s)",
                unified.total_minutes,
                unified.platform_breakdown.len()
            );
            records::print_json(&unified)?;
        }
        cli::Command::Compare { left, right } => {
            let left = records::load_profile(&left)?;
            let right = records::load_profile(&right)?;

            let result = compat::compatibility(&left, &right, &engine.compat);
            if !result.sufficient_data {
                warn!("One or both profiles have no listening data; scores are not meaningful");
            }
            records::print_json(&result)?;
        }
        cli::Command::Recommend { profile, friends, limit } => {
            let user = records::load_profile(&profile)?;
            let friends = records::load_friends(&friends)?;

            let mut recommend_config = engine.recommend;
            if let Some(limit) = limit {
                recommend_config.limit = limit;
            }

            let recommendations = recommend::recommend(&user, &friends, &recommend_config);
            info!(
                "{} recommendation(s) from {} friend(s)",
                recommendations.len(),
                friends.len()
            );
            records::print_json(&recommendations)?;
        }
        cli::Command::Completion { shell } => {
            let mut command = cli::Args::command();
            clap_complete::generate(shell, &mut command, "harmonize", &mut std::io::stdout());
        }
    }

    Ok(())
}
