//! # Integration Tests for Harmonize
//!
//! End-to-end tests covering the full pipeline from a user perspective:
//! CLI commands over JSON record files, and the library flow from raw
//! platform stats through aggregation, compatibility, and recommendations.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

use harmonize::compat::{compatibility, CompatConfig, CompatibilityTier};
use harmonize::matcher::{find_best_match, MatchConfig, SearchCandidate, TrackDescriptor};
use harmonize::profile::{aggregate, PlatformStats, ProfileCaps, WeightedItem};
use harmonize::recommend::{recommend, FriendProfile, RecommendConfig};

/// Path to the compiled harmonize binary under test.
fn harmonize_bin() -> &'static str {
    env!("CARGO_BIN_EXE_harmonize")
}

/// Test helper: writes a JSON fixture file into the temp dir.
fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Sample per-platform stats mirroring a two-service listener.
fn sample_stats() -> Vec<PlatformStats> {
    vec![
        PlatformStats {
            platform: "spotify".to_string(),
            period: None,
            minutes: 300.0,
            tracks: 90,
            top_artists: vec![
                WeightedItem::new("Daft Punk", 120.0),
                WeightedItem::new("Drake", 80.0),
            ],
            top_genres: vec![
                WeightedItem::new("electronic", 150.0),
                WeightedItem::new("hip hop", 90.0),
            ],
            top_tracks: vec![WeightedItem::track("One More Time", "Daft Punk", 40.0)],
        },
        PlatformStats {
            platform: "youtube_music".to_string(),
            period: None,
            minutes: 100.0,
            tracks: 30,
            top_artists: vec![
                WeightedItem::new("daft punk", 60.0),
                WeightedItem::new("Kaytranada", 30.0),
            ],
            top_genres: vec![WeightedItem::new("Electronic", 70.0)],
            top_tracks: vec![WeightedItem::track("one more time", "daft punk", 20.0)],
        },
    ]
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help_displays_correctly() {
        let output = Command::new(harmonize_bin())
            .arg("--help")
            .output()
            .expect("Failed to run help command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("harmonize"));
        assert!(stdout.contains("match-track"));
        assert!(stdout.contains("profile"));
        assert!(stdout.contains("compare"));
        assert!(stdout.contains("recommend"));
    }

    #[test]
    fn test_cli_version_flag() {
        let output = Command::new(harmonize_bin())
            .arg("--version")
            .output()
            .expect("Failed to run version command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("harmonize"));
        assert!(stdout.contains("1.2.0"));
    }

    #[test]
    fn test_completion_generation() {
        let output = Command::new(harmonize_bin())
            .args(["completion", "bash"])
            .output()
            .expect("Failed to run completion command");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("harmonize"));
        assert!(stdout.contains("complete"));
    }

    #[test]
    fn test_match_track_command() -> Result<()> {
        let dir = TempDir::new()?;
        let target = write_fixture(
            &dir,
            "target.json",
            r#"{"title": "Blinding Lights", "artist": "The Weeknd"}"#,
        )?;
        let candidates = write_fixture(
            &dir,
            "candidates.json",
            r#"[
                {"id": "yt1", "title": "Blinding Lights (Remix)", "artist": "The Weeknd"},
                {"id": "yt2", "title": "Save Your Tears", "artist": "The Weeknd"}
            ]"#,
        )?;

        let output = Command::new(harmonize_bin())
            .arg("match-track")
            .arg("--target")
            .arg(&target)
            .arg("--candidates")
            .arg(&candidates)
            .output()?;

        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let result: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(result["matched"], true);
        assert_eq!(result["candidate_id"], "yt1");
        Ok(())
    }

    #[test]
    fn test_query_command_strips_punctuation() -> Result<()> {
        let dir = TempDir::new()?;
        let target = write_fixture(
            &dir,
            "target.json",
            r#"{"title": "Don't Stop Believin'", "artist": "Journey", "album": "Escape!"}"#,
        )?;

        let output = Command::new(harmonize_bin())
            .arg("query")
            .arg("--target")
            .arg(&target)
            .output()?;

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.trim(), "Dont Stop Believin Journey Escape");
        Ok(())
    }

    #[test]
    fn test_profile_then_compare_pipeline() -> Result<()> {
        let dir = TempDir::new()?;
        let spotify = write_fixture(
            &dir,
            "spotify.json",
            r#"{
                "platform": "spotify", "minutes": 300.0, "tracks": 90,
                "top_artists": [{"name": "Daft Punk", "weight": 120.0}],
                "top_genres": [{"name": "electronic", "weight": 150.0}]
            }"#,
        )?;
        let youtube = write_fixture(
            &dir,
            "youtube.json",
            r#"{
                "platform": "youtube_music", "minutes": 100.0, "tracks": 30,
                "top_artists": [{"name": "daft punk", "weight": 60.0}],
                "top_genres": [{"name": "Electronic", "weight": 70.0}]
            }"#,
        )?;

        // Build the unified profile via the CLI.
        let output = Command::new(harmonize_bin())
            .arg("profile")
            .arg(&spotify)
            .arg(&youtube)
            .output()?;
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let profile: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(profile["total_minutes"], 400.0);
        assert_eq!(profile["platform_breakdown"]["spotify"]["percentage"], 75.0);
        assert_eq!(profile["top_artists"][0]["name"], "Daft Punk");
        assert_eq!(profile["top_artists"][0]["weight"], 180.0);

        // Feed the profile back in and compare it with itself.
        let me = write_fixture(&dir, "me.json", &String::from_utf8_lossy(&output.stdout))?;
        let output = Command::new(harmonize_bin())
            .arg("compare")
            .arg("--left")
            .arg(&me)
            .arg("--right")
            .arg(&me)
            .output()?;
        assert!(output.status.success());

        let result: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(result["overall"], 100.0);
        assert_eq!(result["tier"], "Twins");
        assert_eq!(result["sufficient_data"], true);
        Ok(())
    }

    #[test]
    fn test_profile_command_skips_malformed_platform() -> Result<()> {
        let dir = TempDir::new()?;
        let good = write_fixture(
            &dir,
            "good.json",
            r#"{"platform": "spotify", "minutes": 100.0, "tracks": 10}"#,
        )?;
        let bad = write_fixture(
            &dir,
            "bad.json",
            r#"{"platform": "broken", "minutes": -5.0, "tracks": 10}"#,
        )?;

        let output = Command::new(harmonize_bin())
            .arg("profile")
            .arg(&good)
            .arg(&bad)
            .output()?;

        assert!(
            output.status.success(),
            "malformed platform must not abort the merge"
        );
        let profile: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(profile["total_minutes"], 100.0);
        assert!(profile["platform_breakdown"]["broken"].is_null());
        Ok(())
    }

    #[test]
    fn test_missing_input_file_fails_with_context() {
        let output = Command::new(harmonize_bin())
            .args([
                "match-track",
                "--target",
                "/nonexistent/target.json",
                "--candidates",
                "/nonexistent/candidates.json",
            ])
            .output()
            .expect("Failed to run match-track command");

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("/nonexistent/target.json"),
            "error should name the path, got: {stderr}"
        );
    }
}

#[cfg(test)]
mod engine_pipeline_tests {
    use super::*;

    #[test]
    fn test_full_pipeline_stats_to_recommendations() -> Result<()> {
        // Aggregate two platforms into one profile.
        let me = aggregate(&sample_stats(), &ProfileCaps::default())?;
        assert_eq!(me.total_minutes, 400.0);
        assert_eq!(me.top_artists[0].name, "Daft Punk");
        assert_eq!(
            me.top_artists[0].weight, 180.0,
            "case-insensitive merge across platforms"
        );
        assert_eq!(me.top_tracks[0].name, "One More Time - Daft Punk");

        // A friend with overlapping taste.
        let friend_stats = PlatformStats {
            platform: "spotify".to_string(),
            period: None,
            minutes: 200.0,
            tracks: 60,
            top_artists: vec![
                WeightedItem::new("Daft Punk", 90.0),
                WeightedItem::new("Drake", 70.0),
                WeightedItem::new("Moderat", 50.0),
            ],
            top_genres: vec![
                WeightedItem::new("electronic", 100.0),
                WeightedItem::new("hip hop", 60.0),
            ],
            top_tracks: vec![],
        };
        let friend_profile = aggregate(&[friend_stats], &ProfileCaps::default())?;

        let compat = compatibility(&me, &friend_profile, &CompatConfig::default());
        assert!(compat.sufficient_data);
        assert!(
            compat.overall >= 40.0,
            "fixture friend should qualify, got {}",
            compat.overall
        );
        assert_eq!(compat.shared_artists[0].name, "Daft Punk");

        // Recommendations surface the friend's artist the user lacks.
        let friends = vec![FriendProfile {
            id: "ana".to_string(),
            profile: friend_profile,
            compatibility: compat,
        }];
        let recs = recommend(&me, &friends, &RecommendConfig::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].artist_name, "Moderat");
        assert_eq!(recs[0].recommended_by, "ana");
        Ok(())
    }

    #[test]
    fn test_spec_scenario_blinding_lights() {
        let target = TrackDescriptor {
            title: "Blinding Lights".to_string(),
            artist: "The Weeknd".to_string(),
            album: None,
        };
        let candidates = vec![
            SearchCandidate {
                id: "c1".to_string(),
                title: "Blinding Lights (Remix)".to_string(),
                artist: "The Weeknd".to_string(),
            },
            SearchCandidate {
                id: "c2".to_string(),
                title: "Save Your Tears".to_string(),
                artist: "The Weeknd".to_string(),
            },
        ];

        let result = find_best_match(&target, &candidates, &MatchConfig::default());
        assert!(result.matched);
        assert_eq!(result.candidate_id.as_deref(), Some("c1"));
        assert!(
            result.confidence > 0.7,
            "near-exact match expected, got {}",
            result.confidence
        );
    }

    #[test]
    fn test_tier_boundary_at_20() -> Result<()> {
        // Artist Jaccard 1/3, empty genres: overall lands exactly on 20.0.
        let profile_for = |artists: &[(&str, f64)]| {
            let stats = PlatformStats {
                platform: "spotify".to_string(),
                period: None,
                minutes: 100.0,
                tracks: 10,
                top_artists: artists.iter().map(|(n, w)| WeightedItem::new(n, *w)).collect(),
                top_genres: vec![],
                top_tracks: vec![],
            };
            aggregate(&[stats], &ProfileCaps::default())
        };
        let a = profile_for(&[("Daft Punk", 300.0), ("Drake", 200.0)])?;
        let b = profile_for(&[("Daft Punk", 150.0), ("Kanye West", 100.0)])?;

        let result = compatibility(&a, &b, &CompatConfig::default());
        assert_eq!(result.artist_score, 33.3);
        assert_eq!(result.overall, 20.0);
        assert_eq!(
            result.tier,
            CompatibilityTier::DifferentVibe,
            "20.0 is an inclusive lower bound"
        );
        Ok(())
    }
}
