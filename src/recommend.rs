//! Artist recommendations from compatible friends.
//!
//! Surfaces artists a user does not listen to yet, sourced from the top
//! artists of their most musically compatible friends. A friend only
//! qualifies above a compatibility floor, and when several friends surface
//! the same artist, the recommendation from the most compatible friend
//! wins.

use crate::compat::CompatibilityResult;
use crate::normalize::name_key;
use crate::profile::UnifiedProfile;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One friend's profile together with their already-computed compatibility
/// against the requesting user (see [`crate::compat::pairwise`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendProfile {
    pub id: String,
    pub profile: UnifiedProfile,
    pub compatibility: CompatibilityResult,
}

/// A single recommended artist and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub artist_name: String,
    /// The friend's listening minutes for this artist.
    pub weight: f64,
    pub recommended_by: String,
    pub compatibility_score: f64,
    /// Human-readable explanation, e.g. "twin loves this artist (80% compatible)".
    pub reason: String,
}

/// Tuning parameters for recommendation generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Minimum overall compatibility a friend needs to contribute.
    pub min_compatibility: f64,
    /// How many of the best friends to draw from.
    pub max_friends: usize,
    /// How deep into each friend's top artists to look.
    pub artists_per_friend: usize,
    /// Overall cap on emitted recommendations.
    pub limit: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            min_compatibility: 40.0,
            max_friends: 5,
            artists_per_friend: 10,
            limit: 20,
        }
    }
}

/// Generates artist recommendations for a user from their friends' tastes.
///
/// Friends below `min_compatibility` are filtered out; the rest are sorted
/// by compatibility descending (stable, so equally compatible friends keep
/// input order) and the top `max_friends` are scanned in that order. Each
/// contributes artists from their top `artists_per_friend` that the user
/// does not already listen to (case-insensitive against the user's own top
/// artists). Duplicates across friends keep the first occurrence, so the
/// most compatible friend that surfaced the artist gets the credit. The
/// final list is truncated to `limit`.
///
/// Friends with no qualifying compatibility, or whose artists the user all
/// knows already, simply contribute nothing.
#[must_use]
pub fn recommend(
    user: &UnifiedProfile,
    friends: &[FriendProfile],
    config: &RecommendConfig,
) -> Vec<Recommendation> {
    let known: HashSet<String> = user
        .top_artists
        .iter()
        .map(|artist| name_key(&artist.name))
        .collect();

    let mut qualifying: Vec<&FriendProfile> = friends
        .iter()
        .filter(|f| f.compatibility.overall >= config.min_compatibility)
        .collect();
    // Stable sort: equally compatible friends keep caller order.
    qualifying.sort_by(|a, b| {
        b.compatibility
            .overall
            .partial_cmp(&a.compatibility.overall)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    qualifying.truncate(config.max_friends);

    debug!(
        "{} of {} friend(s) qualify above {:.0}% compatibility",
        qualifying.len(),
        friends.len(),
        config.min_compatibility
    );

    let mut seen: HashSet<String> = HashSet::new();
    let mut recommendations = Vec::new();

    'friends: for friend in &qualifying {
        for artist in friend.profile.top_artists.iter().take(config.artists_per_friend) {
            let key = name_key(&artist.name);
            if known.contains(&key) || !seen.insert(key) {
                continue;
            }

            recommendations.push(Recommendation {
                artist_name: artist.name.clone(),
                weight: artist.weight,
                recommended_by: friend.id.clone(),
                compatibility_score: friend.compatibility.overall,
                reason: format!(
                    "{} loves this artist ({}% compatible)",
                    friend.id, friend.compatibility.overall
                ),
            });
            if recommendations.len() == config.limit {
                break 'friends;
            }
        }
    }

    recommendations
}
