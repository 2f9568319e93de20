use std::str::FromStr;

use chrono::NaiveDate;

use crate::core::config::MatchingConfig;
use crate::features::claims::services::keyword_score;
use crate::features::reports::models::{Report, ReportKind};

/// How a new report picks a counterpart when several are plausible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Accept the earliest-arrived plausible report and stop scanning
    #[default]
    FirstMatch,
    /// Scan every candidate and keep the highest-scoring one
    BestScoreMatch,
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "first_match" => Ok(MatchStrategy::FirstMatch),
            "best" | "best_score" | "best_score_match" => Ok(MatchStrategy::BestScoreMatch),
            other => Err(format!(
                "MATCH_STRATEGY must be 'first' or 'best', got '{}'",
                other
            )),
        }
    }
}

/// Absolute distance in whole days between two calendar dates
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days().abs()
}

/// Trimmed, lower-cased, non-empty comma-separated fragments
fn location_fragments(location_text: &str) -> impl Iterator<Item = String> + '_ {
    location_text
        .split(',')
        .map(|fragment| fragment.trim().to_lowercase())
        .filter(|fragment| !fragment.is_empty())
}

/// Number of place fragments of one location contained in the other.
///
/// Each fragment of the found location is looked up inside the whole
/// lost location, and each fragment of the lost location inside the whole
/// found location. "near Central Park entrance" therefore overlaps with
/// "Central Park, NYC" through the lost fragment "central park".
pub fn location_overlap(lost_location: &str, found_location: &str) -> usize {
    let lost_lower = lost_location.to_lowercase();
    let found_lower = found_location.to_lowercase();

    let found_in_lost = location_fragments(found_location)
        .filter(|fragment| lost_lower.contains(fragment.as_str()))
        .count();
    let lost_in_found = location_fragments(lost_location)
        .filter(|fragment| found_lower.contains(fragment.as_str()))
        .count();

    found_in_lost + lost_in_found
}

/// Whether a lost report and a found report plausibly describe the same item.
///
/// Gates, checked in order: identical category (case-sensitive), event dates
/// at most `max_days_apart` days apart, overlapping location text.
pub fn is_possible_match(lost: &Report, found: &Report, max_days_apart: i64) -> bool {
    if lost.category != found.category {
        return false;
    }

    if days_between(lost.date_of_event, found.date_of_event) > max_days_apart {
        return false;
    }

    location_overlap(&lost.location_text, &found.location_text) > 0
}

/// Ranking used by [`MatchStrategy::BestScoreMatch`]
pub fn candidate_score(lost: &Report, found: &Report) -> usize {
    location_overlap(&lost.location_text, &found.location_text)
        + keyword_score(&found.description, &lost.description)
}

/// Scans open reports of the opposite kind for a counterpart of a new report
#[derive(Debug, Clone, Copy)]
pub struct CandidateMatcher {
    strategy: MatchStrategy,
    max_days_apart: i64,
}

impl CandidateMatcher {
    pub fn new(strategy: MatchStrategy, max_days_apart: i64) -> Self {
        Self {
            strategy,
            max_days_apart,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.strategy, config.max_days_apart)
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Order a (new report, candidate) pair as (lost, found)
    fn as_pair<'r>(report: &'r Report, candidate: &'r Report) -> (&'r Report, &'r Report) {
        match report.kind {
            ReportKind::Lost => (report, candidate),
            ReportKind::Found => (candidate, report),
        }
    }

    /// Pick the counterpart for `report` among `candidates` (in arrival order).
    ///
    /// Candidates of the same kind or no longer open are skipped.
    pub fn find_match<'a>(&self, report: &Report, candidates: &'a [Report]) -> Option<&'a Report> {
        let opposite = report.kind.opposite();
        let mut plausible = candidates
            .iter()
            .filter(|c| c.kind == opposite && c.status.accepts_matches())
            .filter(|c| {
                let (lost, found) = Self::as_pair(report, c);
                is_possible_match(lost, found, self.max_days_apart)
            });

        match self.strategy {
            MatchStrategy::FirstMatch => plausible.next(),
            MatchStrategy::BestScoreMatch => {
                let mut best: Option<(usize, &'a Report)> = None;
                for candidate in plausible {
                    let (lost, found) = Self::as_pair(report, candidate);
                    let score = candidate_score(lost, found);
                    // Strictly greater keeps the earliest candidate on ties
                    if best.map_or(true, |(best_score, _)| score > best_score) {
                        best = Some((score, candidate));
                    }
                }
                best.map(|(_, candidate)| candidate)
            }
        }
    }
}
