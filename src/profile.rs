//! Cross-platform listening profile aggregation.
//!
//! Each connected platform delivers its own pre-analyzed listening stats
//! (total minutes, track count, top artists/genres/tracks with a minutes
//! weight). This module merges those per-platform lists into one unified,
//! deterministically ranked profile. Minutes are additive across platforms:
//! listening time on different services is assumed non-overlapping, so no
//! deduplication of time happens, only of names.

use crate::error::InputShapeError;
use crate::normalize::name_key;
use clap::ValueEnum;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The atomic unit of aggregation: a named thing with a minutes weight.
///
/// Artists and genres carry only a name; track items additionally carry the
/// artist so distinct tracks with the same title stay distinct (the merge
/// key becomes the `"name - artist"` composite).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub name: String,
    /// Listening minutes attributed to this item. Never negative.
    pub weight: f64,
    /// 1-based position after sorting by weight descending. On input this
    /// is the platform's own ranking and is ignored; the aggregator
    /// reassigns it over the merged list.
    #[serde(default)]
    pub rank: u32,
    /// Track items only: the performing artist, forming the composite
    /// identity key. Absent for artists and genres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl WeightedItem {
    /// Convenience constructor for artist/genre items.
    #[must_use]
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
            rank: 0,
            artist: None,
        }
    }

    /// Convenience constructor for track items.
    #[must_use]
    pub fn track(name: &str, artist: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
            rank: 0,
            artist: Some(artist.to_string()),
        }
    }

    /// Display name used for merging: the plain name, or the
    /// `"name - artist"` composite for track items.
    #[must_use]
    pub fn merge_name(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} - {}", self.name, artist),
            None => self.name.clone(),
        }
    }
}

/// Reporting period a platform's stats cover. Carried on the records for
/// callers to select on; the aggregation itself is period-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
    AllTime,
}

/// One platform's pre-aggregated listening stats for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    /// Platform name, e.g. "spotify" or "youtube_music".
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    pub minutes: f64,
    pub tracks: u64,
    #[serde(default)]
    pub top_artists: Vec<WeightedItem>,
    #[serde(default)]
    pub top_genres: Vec<WeightedItem>,
    #[serde(default)]
    pub top_tracks: Vec<WeightedItem>,
}

/// One platform's slice of the unified totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformShare {
    pub minutes: f64,
    pub tracks: u64,
    /// Share of total minutes, in percent, rounded to 1 decimal.
    /// 0.0 across the board when total minutes is zero.
    pub percentage: f64,
}

/// The unified cross-platform listening profile.
///
/// Built fresh per request from platform stats; the engine never persists
/// it. Top lists are sorted by summed weight descending with ranks
/// reassigned 1..N; the breakdown maps platform name to its share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedProfile {
    pub total_minutes: f64,
    pub total_tracks: u64,
    pub top_artists: Vec<WeightedItem>,
    pub top_genres: Vec<WeightedItem>,
    pub top_tracks: Vec<WeightedItem>,
    pub platform_breakdown: BTreeMap<String, PlatformShare>,
}

/// Truncation caps for the unified top lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileCaps {
    pub artists: usize,
    pub genres: usize,
    pub tracks: usize,
}

impl Default for ProfileCaps {
    fn default() -> Self {
        Self {
            artists: 20,
            genres: 15,
            tracks: 50,
        }
    }
}

/// Rounds to one decimal place, the precision of every user-facing figure.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Shape-validates one platform's stats.
///
/// Negative minutes, negative item weights, and unnamed items fail fast
/// with an [`InputShapeError`]; empty lists and zero minutes are valid
/// degenerate inputs.
pub fn validate(stats: &PlatformStats) -> Result<(), InputShapeError> {
    if stats.minutes < 0.0 {
        return Err(InputShapeError::NegativeMinutes {
            platform: stats.platform.clone(),
            minutes: stats.minutes,
        });
    }

    let lists = [&stats.top_artists, &stats.top_genres, &stats.top_tracks];
    for item in lists.into_iter().flatten() {
        if item.name.trim().is_empty() {
            return Err(InputShapeError::EmptyName {
                platform: stats.platform.clone(),
            });
        }
        if item.weight < 0.0 {
            return Err(InputShapeError::NegativeWeight {
                platform: stats.platform.clone(),
                name: item.name.clone(),
                weight: item.weight,
            });
        }
    }

    Ok(())
}

/// Case-insensitive weight-summing merger that remembers insertion order.
///
/// Stable sort over the accumulated entries means exactly-equal weights
/// keep first-seen (platform list) order, so ties break toward earlier platforms.
struct Merger {
    index: HashMap<String, usize>,
    entries: Vec<WeightedItem>,
}

impl Merger {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn add(&mut self, item: &WeightedItem) {
        let display = item.merge_name();
        let key = name_key(&display);
        match self.index.get(&key) {
            Some(&i) => self.entries[i].weight += item.weight,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(WeightedItem {
                    name: display,
                    weight: item.weight,
                    rank: 0,
                    artist: None,
                });
            }
        }
    }

    fn into_ranked(mut self, cap: usize) -> Vec<WeightedItem> {
        // sort_by is stable: equal weights keep insertion order.
        self.entries
            .sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
        self.entries.truncate(cap);
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.rank = i as u32 + 1;
        }
        self.entries
    }
}

/// Merges per-platform stats into one unified profile.
///
/// Fails fast on the first platform that violates the shape contract. Use
/// [`aggregate_partial`] when malformed platforms should be skipped and
/// reported instead.
///
/// # Examples
///
/// ```
/// use harmonize::profile::{aggregate, PlatformStats, ProfileCaps, WeightedItem};
///
/// let spotify = PlatformStats {
///     platform: "spotify".to_string(),
///     period: None,
///     minutes: 300.0,
///     tracks: 90,
///     top_artists: vec![WeightedItem::new("Daft Punk", 120.0)],
///     top_genres: vec![WeightedItem::new("electronic", 200.0)],
///     top_tracks: vec![],
/// };
///
/// let profile = aggregate(&[spotify], &ProfileCaps::default())?;
/// assert_eq!(profile.total_minutes, 300.0);
/// assert_eq!(profile.top_artists[0].rank, 1);
/// # Ok::<(), harmonize::error::InputShapeError>(())
/// ```
pub fn aggregate(
    per_platform: &[PlatformStats],
    caps: &ProfileCaps,
) -> Result<UnifiedProfile, InputShapeError> {
    for stats in per_platform {
        validate(stats)?;
    }
    Ok(aggregate_validated(per_platform, caps))
}

/// Merges the platforms that validate and collects the errors of those that
/// don't, so callers can tell "no qualifying data" apart from "some inputs
/// were malformed".
#[must_use]
pub fn aggregate_partial(
    per_platform: &[PlatformStats],
    caps: &ProfileCaps,
) -> (UnifiedProfile, Vec<InputShapeError>) {
    let mut valid = Vec::with_capacity(per_platform.len());
    let mut errors = Vec::new();

    for stats in per_platform {
        match validate(stats) {
            Ok(()) => valid.push(stats.clone()),
            Err(e) => {
                warn!("Skipping platform {:?}: {e}", stats.platform);
                errors.push(e);
            }
        }
    }

    (aggregate_validated(&valid, caps), errors)
}

fn aggregate_validated(per_platform: &[PlatformStats], caps: &ProfileCaps) -> UnifiedProfile {
    let mut total_minutes = 0.0;
    let mut total_tracks = 0;
    let mut breakdown: BTreeMap<String, PlatformShare> = BTreeMap::new();

    let mut artists = Merger::new();
    let mut genres = Merger::new();
    let mut tracks = Merger::new();

    for stats in per_platform {
        total_minutes += stats.minutes;
        total_tracks += stats.tracks;

        let share = breakdown.entry(stats.platform.clone()).or_insert(PlatformShare {
            minutes: 0.0,
            tracks: 0,
            percentage: 0.0,
        });
        share.minutes += stats.minutes;
        share.tracks += stats.tracks;

        for item in &stats.top_artists {
            artists.add(item);
        }
        for item in &stats.top_genres {
            genres.add(item);
        }
        for item in &stats.top_tracks {
            tracks.add(item);
        }
    }

    // Percentages only make sense against a non-zero total.
    if total_minutes > 0.0 {
        for share in breakdown.values_mut() {
            share.percentage = round1(share.minutes / total_minutes * 100.0);
        }
    }

    debug!(
        "Aggregated {} platform(s): {total_minutes} min, {total_tracks} tracks",
        per_platform.len()
    );

    UnifiedProfile {
        total_minutes,
        total_tracks,
        top_artists: artists.into_ranked(caps.artists),
        top_genres: genres.into_ranked(caps.genres),
        top_tracks: tracks.into_ranked(caps.tracks),
        platform_breakdown: breakdown,
    }
}
