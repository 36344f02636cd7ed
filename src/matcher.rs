//! Track matching across platforms.
//!
//! Given a source track (title/artist, optionally album) and the candidate
//! list a destination platform returned for a search query, this module
//! re-scores every candidate with a token-overlap similarity and selects
//! the best one above a confidence floor. The platform's own relevance
//! ordering is only a tie-break hint; the decision is made here.

use crate::normalize::tokenize;
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A source track to find on another platform.
///
/// Identity is the (title, artist) pair, case-insensitive. The album, when
/// known, only sharpens the search query; it does not enter the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

/// A single search result from a platform's search endpoint.
///
/// Title and artist default to empty when absent from the payload: platform
/// responses are uncontrolled upstream data, and a missing field simply
/// contributes zero to the score instead of failing the whole match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
}

/// Outcome of matching one track against one candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Id of the winning candidate, present only when the floor was cleared.
    pub candidate_id: Option<String>,
    /// Best similarity observed, in `[0, 1]`. Reported even on a miss so
    /// callers can see how close the nearest candidate came.
    pub confidence: f64,
    /// True iff a candidate scored strictly above the threshold.
    pub matched: bool,
}

impl MatchResult {
    fn miss(confidence: f64) -> Self {
        Self {
            candidate_id: None,
            confidence,
            matched: false,
        }
    }
}

/// Tuning parameters for the matcher.
///
/// The defaults encode the contract: artist overlap outweighs title overlap
/// because titles accumulate "(feat. X)" / "(Remastered)" noise while artist
/// names are comparatively canonical, and a candidate must score strictly
/// above 0.6 to count as a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Confidence floor; the best candidate must score strictly above it.
    pub threshold: f64,
    /// Weight of the title-overlap term.
    pub title_weight: f64,
    /// Weight of the artist-overlap term.
    pub artist_weight: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            title_weight: 0.4,
            artist_weight: 0.6,
        }
    }
}

/// Token-overlap ratio between two normalized token sets.
///
/// `|a ∩ b| / max(|a|, |b|, 1)`. The max-length denominator means a title
/// that is a strict superset of the target ("Blinding Lights (Remix)" vs
/// "Blinding Lights") is penalized only for its extra tokens, and the
/// guard against zero keeps empty inputs at 0.0 instead of dividing by zero.
fn overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let denom = a.len().max(b.len()).max(1);
    intersection as f64 / denom as f64
}

/// Similarity between two (title, artist) pairs, in `[0, 1]`.
///
/// Normalizes all four strings into token sets, computes per-field overlap
/// ratios, and combines them as `title_weight * title_overlap +
/// artist_weight * artist_overlap`. Symmetric in swapping the two pairs,
/// and `1.0` for any non-empty pair compared with itself.
///
/// # Examples
///
/// ```
/// use harmonize::matcher::{similarity, MatchConfig};
///
/// let config = MatchConfig::default();
/// let score = similarity("Blinding Lights", "The Weeknd",
///                        "Blinding Lights", "The Weeknd", &config);
/// assert!((score - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn similarity(
    title_a: &str,
    artist_a: &str,
    title_b: &str,
    artist_b: &str,
    config: &MatchConfig,
) -> f64 {
    let title_overlap = overlap(&tokenize(title_a), &tokenize(title_b));
    let artist_overlap = overlap(&tokenize(artist_a), &tokenize(artist_b));

    config.title_weight * title_overlap + config.artist_weight * artist_overlap
}

/// Scores every candidate against the target and picks the best one.
///
/// Candidates are scored in input order and the strictly-greater score wins,
/// so exact ties keep the first-encountered candidate: input order carries
/// the source platform's own relevance ranking, which is the intended
/// tie-break. The result is a match only when the best score clears
/// `config.threshold` strictly; otherwise the best score is still reported
/// as `confidence` with no candidate id.
///
/// An empty candidate list is a well-defined miss with confidence 0, not
/// an error.
#[must_use]
pub fn find_best_match(
    target: &TrackDescriptor,
    candidates: &[SearchCandidate],
    config: &MatchConfig,
) -> MatchResult {
    if candidates.is_empty() {
        debug!(
            "No candidates for {:?} - {:?}",
            target.title, target.artist
        );
        return MatchResult::miss(0.0);
    }

    let mut best_score = 0.0;
    let mut best: Option<&SearchCandidate> = None;

    for candidate in candidates {
        let score = similarity(
            &target.title,
            &target.artist,
            &candidate.title,
            &candidate.artist,
            config,
        );
        trace!(
            "Candidate {:?} ({:?} - {:?}) scored {score:.3}",
            candidate.id,
            candidate.title,
            candidate.artist
        );

        // Strictly greater: ties keep the earlier, more relevant candidate.
        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }

    match best {
        Some(candidate) if best_score > config.threshold => {
            debug!(
                "Matched {:?} - {:?} to candidate {:?} with confidence {best_score:.3}",
                target.title, target.artist, candidate.id
            );
            MatchResult {
                candidate_id: Some(candidate.id.clone()),
                confidence: best_score,
                matched: true,
            }
        }
        _ => {
            debug!(
                "No candidate for {:?} - {:?} cleared the {:.2} floor (best {best_score:.3})",
                target.title, target.artist, config.threshold
            );
            MatchResult::miss(best_score)
        }
    }
}

/// Builds the search query a caller should send to a platform for a target.
///
/// "title artist album" with punctuation stripped and whitespace collapsed,
/// word order preserved (search endpoints rank by phrase, so unlike the
/// scoring path this must not reorder tokens). The album is appended only
/// when present.
#[must_use]
pub fn build_search_query(target: &TrackDescriptor) -> String {
    let mut query = format!("{} {}", target.title, target.artist);
    if let Some(album) = &target.album {
        query.push(' ');
        query.push_str(album);
    }
    query
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summary of a batch matching run, e.g. one playlist transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub total: usize,
    pub matched: usize,
    pub failed: usize,
}

impl MatchReport {
    /// Tallies a slice of match results.
    #[must_use]
    pub fn from_results(results: &[MatchResult]) -> Self {
        let matched = results.iter().filter(|r| r.matched).count();
        Self {
            total: results.len(),
            matched,
            failed: results.len() - matched,
        }
    }
}

/// Matches a whole batch of targets, each against its own candidate list.
///
/// Targets and candidate lists are paired by index (a target with no search
/// results gets an empty list and a clean miss). Each pair is independent
/// and pure, so the batch fans out across the rayon thread pool; output
/// order follows input order regardless of scheduling.
#[must_use]
pub fn match_all(
    targets: &[TrackDescriptor],
    candidate_lists: &[Vec<SearchCandidate>],
    config: &MatchConfig,
) -> (Vec<MatchResult>, MatchReport) {
    static EMPTY: Vec<SearchCandidate> = Vec::new();

    let results: Vec<MatchResult> = targets
        .par_iter()
        .enumerate()
        .map(|(i, target)| {
            let candidates = candidate_lists.get(i).unwrap_or(&EMPTY);
            find_best_match(target, candidates, config)
        })
        .collect();

    let report = MatchReport::from_results(&results);
    debug!(
        "Batch match: {}/{} matched, {} failed",
        report.matched, report.total, report.failed
    );
    (results, report)
}
