use log::{debug, warn};
use std::cmp::Ordering;

use crate::query::SearchQuery;
use crate::{Asteroid, Diagnostic, Issue};

/// An asteroid that passed the filters, with its distance from the origin.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ranked {
    pub asteroid: Asteroid,
    pub distance: f64,
    /// Index in the parser's output; breaks distance ties.
    pub row: usize,
}

impl Ranked {
    /// Distance used for ordering: `NaN` sorts after every real distance.
    fn sort_distance(&self) -> f64 {
        if self.distance.is_nan() {
            f64::INFINITY
        } else {
            self.distance
        }
    }

    /// Ascending by distance, then by parser row.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.sort_distance()
            .total_cmp(&other.sort_distance())
            .then(self.row.cmp(&other.row))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub hits: Vec<Ranked>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Does `composition` contain any of `ores` as a case-sensitive substring?
pub fn matches_any_ore(composition: &str, ores: &[String]) -> bool {
    ores.iter().any(|ore| composition.contains(ore.as_str()))
}

/// Within `max_distance`, where `0` means unbounded. `NaN` only passes
/// when unbounded.
pub fn within_bound(distance: f64, max_distance: f64) -> bool {
    max_distance == 0.0 || distance <= max_distance
}

/// Filter, measure, sort and truncate `asteroids` for `query`.
pub fn select(asteroids: &[Asteroid], query: &SearchQuery) -> Selection {
    let mut diagnostics = Vec::new();

    let mut hits: Vec<Ranked> = asteroids
        .iter()
        .enumerate()
        .filter(|(_, asteroid)| {
            if asteroid.composition.is_empty() {
                warn!("Line {}: {}, skipping", asteroid.line, Issue::MissingComposition);
                diagnostics.push(Diagnostic {
                    line: asteroid.line,
                    issue: Issue::MissingComposition,
                });
                return false;
            }
            matches_any_ore(&asteroid.composition, &query.ores)
        })
        .map(|(row, asteroid)| Ranked {
            distance: asteroid.position.distance_to(&query.origin),
            asteroid: asteroid.clone(),
            row,
        })
        .filter(|ranked| within_bound(ranked.distance, query.max_distance))
        .collect();

    hits.sort_by(Ranked::rank_cmp);
    hits.truncate(query.amount);

    debug!(
        "Selected {} of {} asteroids for ores {:?}",
        hits.len(),
        asteroids.len(),
        query.ores
    );
    Selection { hits, diagnostics }
}
