//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Harmonize using Clap
//! derive macros. Every command reads plain JSON record files and prints a
//! single JSON result document to stdout, so the binary slots into shell
//! pipelines and surrounding services without a wire protocol of its own.
//!
//! ## Commands
//!
//! - `match-track`: score platform search candidates against a source track
//! - `query`: print the normalized search query for a source track
//! - `profile`: merge per-platform stats files into a unified profile
//! - `compare`: compute pairwise compatibility between two profiles
//! - `recommend`: surface new artists from compatible friends
//! - `completion`: generate shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! harmonize match-track --target track.json --candidates results.json
//! harmonize profile spotify.json youtube.json --period monthly
//! harmonize compare --left me.json --right you.json
//! ```

use crate::profile::Period;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main application arguments structure.
///
/// Uses Clap derive macros to automatically generate argument parsing,
/// help text, and validation. All functionality is accessed through
/// subcommands; the only global option is the config-file override.
#[derive(Parser)]
#[command(name = "harmonize")]
#[command(about = "Harmonize: cross-platform track matching & music-taste compatibility")]
#[command(version)]
pub struct Args {
    /// Path to an engine config file (JSON)
    ///
    /// Overrides the default location in the platform config directory.
    /// When omitted, defaults are used and a missing default file is fine.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
///
/// Each variant corresponds to one engine operation. Command arguments are
/// embedded directly in the enum variants for type safety and automatic
/// validation.
#[derive(Subcommand)]
pub enum Command {
    /// Match a source track against platform search candidates
    ///
    /// Re-scores every candidate with the token-overlap similarity and
    /// reports the best one, provided it clears the confidence floor.
    /// Prints a MatchResult JSON document.
    MatchTrack {
        /// JSON file with the source track ({"title", "artist", "album"?})
        #[arg(long, value_name = "FILE")]
        target: PathBuf,

        /// JSON file with the candidate list, in the platform's own
        /// relevance order (used as the tie-break)
        #[arg(long, value_name = "FILE")]
        candidates: PathBuf,

        /// Override the confidence floor (default 0.6)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Print the search query to send to a platform for a track
    ///
    /// "title artist album" with punctuation stripped and word order
    /// preserved, ready for a platform search endpoint.
    Query {
        /// JSON file with the source track
        #[arg(long, value_name = "FILE")]
        target: PathBuf,
    },

    /// Merge per-platform stats files into a unified profile
    ///
    /// Sums minutes and track counts across platforms, merges the top
    /// artist/genre/track lists case-insensitively, and prints the ranked
    /// UnifiedProfile JSON. Malformed platform files are skipped and
    /// reported on stderr; they never abort the merge.
    Profile {
        /// One JSON stats file per platform, in platform priority order
        /// (order is the tie-break for exactly equal weights)
        #[arg(required = true, value_name = "FILE")]
        stats: Vec<PathBuf>,

        /// Only include stats files covering this period
        #[arg(long, value_enum)]
        period: Option<Period>,
    },

    /// Compute compatibility between two unified profiles
    ///
    /// Prints a CompatibilityResult JSON document with component scores,
    /// the overall 0-100 figure, shared artists/genres, and the tier.
    /// Check `sufficient_data` before presenting the scores: a false value
    /// means one side had no listening data at all.
    Compare {
        /// JSON file with the first user's unified profile
        #[arg(long, value_name = "FILE")]
        left: PathBuf,

        /// JSON file with the second user's unified profile
        #[arg(long, value_name = "FILE")]
        right: PathBuf,
    },

    /// Recommend new artists from compatible friends
    ///
    /// Reads the user's profile and a friend bundle (profiles with
    /// precomputed compatibility), and prints recommendations drawn from
    /// the most compatible friends' top artists that the user does not
    /// already listen to.
    Recommend {
        /// JSON file with the user's unified profile
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,

        /// JSON file with the friend bundle
        #[arg(long, value_name = "FILE")]
        friends: PathBuf,

        /// Maximum number of recommendations (default 20)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Generate shell completions
    ///
    /// Usage: harmonize completion bash > ~/.local/share/bash-completion/completions/harmonize
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        // Catches duplicate flags, bad defaults, etc. at test time.
        Args::command().debug_assert();
    }

    #[test]
    fn test_match_track_parses() {
        let args = Args::parse_from([
            "harmonize",
            "match-track",
            "--target",
            "t.json",
            "--candidates",
            "c.json",
            "--threshold",
            "0.7",
        ]);
        match args.command {
            Command::MatchTrack { threshold, .. } => assert_eq!(threshold, Some(0.7)),
            _ => panic!("expected match-track command"),
        }
    }

    #[test]
    fn test_profile_requires_at_least_one_stats_file() {
        assert!(Args::try_parse_from(["harmonize", "profile"]).is_err());
        let args = Args::parse_from(["harmonize", "profile", "a.json", "b.json", "--period", "monthly"]);
        match args.command {
            Command::Profile { stats, period } => {
                assert_eq!(stats.len(), 2);
                assert_eq!(period, Some(Period::Monthly));
            }
            _ => panic!("expected profile command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let args = Args::parse_from([
            "harmonize",
            "compare",
            "--left",
            "a.json",
            "--right",
            "b.json",
            "--config",
            "custom.json",
        ]);
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("custom.json")));
    }
}
