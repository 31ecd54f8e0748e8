//! Match Engine
//!
//! Scores a query's tokens against candidate token sequences and keeps the
//! candidates whose average closest-word distance is within the threshold.

use crate::utils::fuzzy::bounded_distance;
use tracing::debug;

/// Default maximum average distance for a candidate to count as relevant
pub const DEFAULT_THRESHOLD: f64 = 2.5;

/// A relevant candidate together with its average distance
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub index: usize,
    pub score: f64,
}

/// Threshold-based relevance filter over token sequences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchEngine {
    threshold: f64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl MatchEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Average over query tokens of the distance to the closest candidate token
    ///
    /// `f64::INFINITY` when either side is empty.
    pub fn score(&self, query: &[String], candidate: &[String]) -> f64 {
        if query.is_empty() || candidate.is_empty() {
            return f64::INFINITY;
        }

        let total: usize = query
            .iter()
            .map(|word| {
                // Only words that could beat the current best are measured
                let mut best = usize::MAX;
                for other in candidate {
                    if best == 0 {
                        break;
                    }
                    if let Some(distance) = bounded_distance(word, other, best - 1) {
                        best = distance;
                    }
                }
                best
            })
            .sum();

        total as f64 / query.len() as f64
    }

    /// Inclusive threshold check. An infinite score never matches.
    pub fn is_relevant(&self, query: &[String], candidate: &[String]) -> bool {
        self.accepts(self.score(query, candidate))
    }

    fn accepts(&self, score: f64) -> bool {
        score.is_finite() && score <= self.threshold
    }

    /// Indices of relevant candidates, in the order they were given
    pub fn search<'a, I>(&self, query: &[String], candidates: I) -> Vec<usize>
    where
        I: IntoIterator<Item = (usize, &'a [String])>,
    {
        self.matches(query, candidates)
            .into_iter()
            .map(|m| m.index)
            .collect()
    }

    /// Relevant candidates sorted by ascending score
    ///
    /// Equal scores keep their original relative order.
    pub fn search_ranked<'a, I>(&self, query: &[String], candidates: I) -> Vec<Match>
    where
        I: IntoIterator<Item = (usize, &'a [String])>,
    {
        let mut matches = self.matches(query, candidates);
        matches.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches
    }

    fn matches<'a, I>(&self, query: &[String], candidates: I) -> Vec<Match>
    where
        I: IntoIterator<Item = (usize, &'a [String])>,
    {
        if query.is_empty() {
            debug!("Empty query, nothing can match");
            return Vec::new();
        }

        candidates
            .into_iter()
            .filter_map(|(index, tokens)| {
                let score = self.score(query, tokens);
                if self.accepts(score) {
                    debug!("Candidate {} matched with score {:.2}", index, score);
                    Some(Match { index, score })
                } else {
                    None
                }
            })
            .collect()
    }
}
