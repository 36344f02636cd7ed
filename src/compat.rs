//! Pairwise music-taste compatibility.
//!
//! Compares two unified profiles by the overlap of their top artists and
//! genres (Jaccard index over case-insensitive name sets), combines the two
//! component scores into one 0-100 figure, surfaces the shared items, and
//! classifies the result into a human-readable tier. Pure functions over
//! immutable profiles: no I/O, no shared state, safe to fan out per pair.

use crate::normalize::name_key;
use crate::profile::{round1, UnifiedProfile, WeightedItem};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Closed set of compatibility classifications, ordered by descending
/// lower bound. Boundaries are inclusive on the lower bound: exactly 80.0
/// is [`Twins`](CompatibilityTier::Twins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityTier {
    /// `overall >= 80`
    Twins,
    /// `overall >= 65`
    VeryCompatible,
    /// `overall >= 50`
    Compatible,
    /// `overall >= 35`
    SomethingInCommon,
    /// `overall >= 20`
    DifferentVibe,
    /// `overall < 20`
    WorldsApart,
}

impl CompatibilityTier {
    /// Classifies an overall score, first matching threshold wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use harmonize::compat::CompatibilityTier;
    ///
    /// assert_eq!(CompatibilityTier::from_score(80.0), CompatibilityTier::Twins);
    /// assert_eq!(CompatibilityTier::from_score(79.9), CompatibilityTier::VeryCompatible);
    /// assert_eq!(CompatibilityTier::from_score(20.0), CompatibilityTier::DifferentVibe);
    /// ```
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Self::Twins,
            s if s >= 65.0 => Self::VeryCompatible,
            s if s >= 50.0 => Self::Compatible,
            s if s >= 35.0 => Self::SomethingInCommon,
            s if s >= 20.0 => Self::DifferentVibe,
            _ => Self::WorldsApart,
        }
    }
}

/// An item both users listen to, with each side's minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedItem {
    pub name: String,
    pub user1_weight: f64,
    pub user2_weight: f64,
}

/// Tuning parameters for the compatibility computation.
///
/// Artist overlap outweighs genre overlap in the overall score; the overall
/// figure is always the convex combination of the two components, never
/// computed independently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatConfig {
    pub artist_weight: f64,
    pub genre_weight: f64,
    /// Caller-facing cap on each shared-item list.
    pub shared_cap: usize,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            artist_weight: 0.6,
            genre_weight: 0.4,
            shared_cap: 10,
        }
    }
}

/// Result of comparing two profiles. All scores are 0-100, rounded to one
/// decimal; shared lists are sorted by combined weight descending and
/// capped; `sufficient_data` is false when either side had nothing to
/// compare, which callers should surface as "insufficient data" rather
/// than a zero-compatibility verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub overall: f64,
    pub artist_score: f64,
    pub genre_score: f64,
    pub shared_artists: Vec<SharedItem>,
    pub shared_genres: Vec<SharedItem>,
    pub tier: CompatibilityTier,
    pub sufficient_data: bool,
}

/// Jaccard overlap of two weighted-item lists by case-insensitive name,
/// scaled to 0-100. Zero when either list (or the union) is empty.
#[must_use]
pub fn overlap_score(a: &[WeightedItem], b: &[WeightedItem]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<String> = a.iter().map(|item| name_key(&item.name)).collect();
    let set_b: HashSet<String> = b.iter().map(|item| name_key(&item.name)).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64 * 100.0
}

/// Items present in both lists, paired with each side's weight and sorted
/// by combined weight descending (exact ties keep first-list order). Not
/// capped here; [`compatibility`] truncates the caller-facing lists.
#[must_use]
pub fn shared_items(a: &[WeightedItem], b: &[WeightedItem]) -> Vec<SharedItem> {
    let by_key: HashMap<String, &WeightedItem> =
        b.iter().map(|item| (name_key(&item.name), item)).collect();

    let mut shared: Vec<SharedItem> = a
        .iter()
        .filter_map(|item| {
            by_key.get(&name_key(&item.name)).map(|other| SharedItem {
                name: item.name.clone(),
                user1_weight: item.weight,
                user2_weight: other.weight,
            })
        })
        .collect();

    shared.sort_by(|x, y| {
        (y.user1_weight + y.user2_weight)
            .partial_cmp(&(x.user1_weight + x.user2_weight))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    shared
}

/// Computes the full pairwise compatibility between two unified profiles.
///
/// # Examples
///
/// ```
/// use harmonize::compat::{compatibility, CompatConfig, CompatibilityTier};
/// use harmonize::profile::{aggregate, PlatformStats, ProfileCaps, WeightedItem};
///
/// let stats = |artist: &str| PlatformStats {
///     platform: "spotify".to_string(),
///     period: None,
///     minutes: 100.0,
///     tracks: 10,
///     top_artists: vec![WeightedItem::new(artist, 100.0)],
///     top_genres: vec![WeightedItem::new("house", 100.0)],
///     top_tracks: vec![],
/// };
/// let a = aggregate(&[stats("Daft Punk")], &ProfileCaps::default()).unwrap();
///
/// let result = compatibility(&a, &a, &CompatConfig::default());
/// assert_eq!(result.overall, 100.0);
/// assert_eq!(result.tier, CompatibilityTier::Twins);
/// ```
#[must_use]
pub fn compatibility(
    a: &UnifiedProfile,
    b: &UnifiedProfile,
    config: &CompatConfig,
) -> CompatibilityResult {
    let sufficient_data = !(a.top_artists.is_empty() && a.top_genres.is_empty())
        && !(b.top_artists.is_empty() && b.top_genres.is_empty());

    let artist_score = round1(overlap_score(&a.top_artists, &b.top_artists));
    let genre_score = round1(overlap_score(&a.top_genres, &b.top_genres));
    // The overall score is always this convex combination of the rounded
    // components, never an independent figure.
    let overall = round1(config.artist_weight * artist_score + config.genre_weight * genre_score);

    let mut shared_artists = shared_items(&a.top_artists, &b.top_artists);
    shared_artists.truncate(config.shared_cap);
    let mut shared_genres = shared_items(&a.top_genres, &b.top_genres);
    shared_genres.truncate(config.shared_cap);

    let tier = CompatibilityTier::from_score(overall);
    debug!(
        "Compatibility: overall {overall:.1} (artists {artist_score:.1}, genres {genre_score:.1}), tier {tier:?}"
    );

    CompatibilityResult {
        overall,
        artist_score,
        genre_score,
        shared_artists,
        shared_genres,
        tier,
        sufficient_data,
    }
}

/// Compares one user against many others in parallel.
///
/// Each pair computation is pure and independent, so they fan out across
/// the rayon pool; results come back in input order.
#[must_use]
pub fn pairwise(
    user: &UnifiedProfile,
    others: &[(String, UnifiedProfile)],
    config: &CompatConfig,
) -> Vec<(String, CompatibilityResult)> {
    others
        .par_iter()
        .map(|(id, profile)| (id.clone(), compatibility(user, profile, config)))
        .collect()
}

/// Genre diversity of a profile as normalized Shannon entropy, 0-100.
///
/// `-Σ p·ln(p)` over the genre weight distribution, divided by `ln(n)` (the
/// maximum entropy over n genres). A single-genre or empty profile scores 0;
/// a perfectly even spread scores 100.
#[must_use]
pub fn diversity_score(top_genres: &[WeightedItem]) -> f64 {
    let positive: Vec<f64> = top_genres
        .iter()
        .map(|g| g.weight)
        .filter(|&w| w > 0.0)
        .collect();
    let total: f64 = positive.iter().sum();
    if positive.len() < 2 || total <= 0.0 {
        return 0.0;
    }

    let entropy: f64 = positive
        .iter()
        .map(|&w| {
            let p = w / total;
            -p * p.ln()
        })
        .sum();
    let max_entropy = (positive.len() as f64).ln();

    round1(entropy / max_entropy * 100.0)
}
