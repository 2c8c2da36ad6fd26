//! One search, from CSV text to rendered blocks.
//!
//! [`search`] is the pure part. [`run_search`] adds the loading step and
//! hands the blocks to a [`ResultSink`], but only if no newer submission
//! has started in the meantime.

use log::{debug, info};
use std::cell::Cell;

use crate::loader::{CsvSource, LoadError};
use crate::parser::parse_asteroids;
use crate::query::SearchQuery;
use crate::render::{render_blocks, ResultBlock};
use crate::selector::{select, Ranked};
use crate::Diagnostic;

/// Receives the blocks of a finished search, replacing whatever it showed.
pub trait ResultSink {
    fn present(&self, blocks: Vec<ResultBlock>);
}

impl<F: Fn(Vec<ResultBlock>)> ResultSink for F {
    fn present(&self, blocks: Vec<ResultBlock>) {
        self(blocks)
    }
}

/// Hands out increasing tickets; only the newest one is current.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    latest: Cell<u64>,
}

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }
}

/// Result of [`search`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutput {
    pub results: Vec<Ranked>,
    pub blocks: Vec<ResultBlock>,
    /// Parser diagnostics followed by selector diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse `csv_content`, select for `query` and format the hits.
pub fn search(csv_content: &str, query: &SearchQuery) -> SearchOutput {
    let parsed = parse_asteroids(csv_content);
    let selection = select(&parsed.asteroids, query);
    let blocks = render_blocks(&selection.hits);

    let mut diagnostics = parsed.diagnostics;
    diagnostics.extend(selection.diagnostics);

    SearchOutput {
        results: selection.hits,
        blocks,
        diagnostics,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The sink now shows this search.
    Applied,
    /// A newer submission started; the sink was left alone.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub result_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Load, search and present one submission.
///
/// Load failures are returned without touching the sink.
pub async fn run_search<S, K>(
    source: &S,
    sink: &K,
    query: &SearchQuery,
    tracker: &SubmissionTracker,
) -> Result<SearchReport, LoadError>
where
    S: CsvSource + ?Sized,
    K: ResultSink + ?Sized,
{
    let ticket = tracker.begin();
    let csv_content = source.fetch().await?;
    let output = search(&csv_content, query);
    let result_count = output.blocks.len();

    let outcome = if tracker.is_current(ticket) {
        sink.present(output.blocks);
        info!("Showing {} asteroids", result_count);
        Outcome::Applied
    } else {
        debug!("Dropping results of superseded submission {:?}", ticket);
        Outcome::Superseded
    };

    Ok(SearchReport {
        outcome,
        result_count,
        diagnostics: output.diagnostics,
    })
}
