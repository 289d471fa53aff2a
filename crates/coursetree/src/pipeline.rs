#![forbid(unsafe_code)]

//! Search orchestration: lookup, grouping, flattening.
//!
//! [`ResultPipeline`] owns the flattened sequence currently on display and
//! replaces it wholesale on every completed search. It never merges results
//! from different searches.
//!
//! # Superseded searches
//!
//! Each [`begin`](ResultPipeline::begin) hands out a [`SearchTicket`] with a
//! fresh generation number. Only the ticket from the most recent `begin` can
//! [`complete`](ResultPipeline::complete); a late answer for an older query
//! is reported as [`SearchOutcome::Stale`] and leaves the display untouched.
//! Tickets are `Send`, so the lookup itself may run on a worker thread.
//!
//! # Failure policy
//!
//! A failed lookup and an empty answer both clear the display, so results
//! from an earlier search are never shown under a newer query. Neither is
//! propagated as an error; both come back as outcomes with a [`Notice`].

use std::fmt;
use std::sync::Arc;

use coursetree_core::{FlattenedNode, Flattener, GroupIndex, ParentId, Record};

use crate::error::LookupError;
use crate::lookup::Lookup;

/// Permission to complete one search.
#[derive(Debug)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    /// The (trimmed) query this ticket was issued for.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to one search.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The query was blank; nothing was looked up and the display is unchanged.
    Ignored,
    /// The display now shows `rows` entries flattened from `records`.
    ///
    /// `rows` may be smaller than `records` (unreachable or duplicate
    /// records), and may be zero when nothing hangs off the root.
    Results {
        query: String,
        records: usize,
        rows: usize,
    },
    /// The lookup succeeded with zero records. The display is cleared.
    NoResults { query: String },
    /// The lookup failed. The display is cleared.
    Failed { query: String, error: LookupError },
    /// A newer search (or a cancel) superseded this one; its result was dropped.
    Stale { query: String },
}

impl SearchOutcome {
    /// The user-facing notice for this outcome, if any.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::NoResults { query } => Some(Notice::NoResults {
                query: query.clone(),
            }),
            Self::Failed { .. } => Some(Notice::Failed),
            Self::Ignored | Self::Results { .. } | Self::Stale { .. } => None,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// User-facing notice emitted at the end of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Informational: the search matched nothing.
    NoResults { query: String },
    /// Error: the search could not be completed; retrying may help.
    Failed,
}

impl Notice {
    /// Whether the notice reports a failure rather than information.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResults { query } => write!(f, "No results found for \"{query}\""),
            Self::Failed => f.write_str("Something went wrong, please try again later"),
        }
    }
}

/// Turns lookup answers into the flattened sequence on display.
#[derive(Debug)]
pub struct ResultPipeline {
    root: ParentId,
    flattener: Flattener,
    nodes: Arc<[FlattenedNode]>,
    generation: u64,
    in_flight: Option<u64>,
}

impl ResultPipeline {
    /// Create a pipeline whose roots are the records parented by `root`.
    #[must_use]
    pub fn new(root: ParentId) -> Self {
        Self {
            root,
            flattener: Flattener::new(),
            nodes: Arc::from(Vec::new()),
            generation: 0,
            in_flight: None,
        }
    }

    /// Root sentinel used for flattening.
    #[must_use]
    pub fn root(&self) -> ParentId {
        self.root
    }

    /// The flattened sequence currently on display.
    #[must_use]
    pub fn nodes(&self) -> &[FlattenedNode] {
        &self.nodes
    }

    /// Immutable snapshot of the display, cheap to hand to another thread.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[FlattenedNode]> {
        Arc::clone(&self.nodes)
    }

    /// Whether a search has begun and not yet completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a search. Returns `None` for a blank query.
    ///
    /// Any search still in flight is superseded.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if let Some(previous) = self.in_flight {
            tracing::debug!(previous, "superseding in-flight search");
        }
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = Some(self.generation);
        tracing::debug!(generation = self.generation, query, "search started");
        Some(SearchTicket {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Drop whatever search is in flight; its result will come back `Stale`.
    pub fn cancel(&mut self) {
        if let Some(generation) = self.in_flight.take() {
            tracing::debug!(generation, "search cancelled");
        }
    }

    /// Clear the display without touching any in-flight search.
    pub fn clear(&mut self) {
        self.nodes = Arc::from(Vec::new());
    }

    /// Apply the lookup result for `ticket`.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Record>, LookupError>,
    ) -> SearchOutcome {
        let SearchTicket { generation, query } = ticket;
        if self.in_flight != Some(generation) {
            tracing::debug!(generation, current = ?self.in_flight, "discarding stale result");
            return SearchOutcome::Stale { query };
        }
        self.in_flight = None;

        match result {
            Err(error) => {
                tracing::warn!(query = %query, kind = error.kind(), error = %error, "search failed");
                self.clear();
                SearchOutcome::Failed { query, error }
            }
            Ok(records) if records.is_empty() => {
                tracing::info!(query = %query, "search returned no records");
                self.clear();
                SearchOutcome::NoResults { query }
            }
            Ok(records) => {
                let index = GroupIndex::build(records);
                let nodes = self.flattener.flatten(&index, self.root);
                let (records, rows) = (index.record_count(), nodes.len());
                if rows < records {
                    tracing::debug!(
                        query = %query,
                        omitted = records - rows,
                        "records unreachable from root were omitted"
                    );
                }
                tracing::info!(query = %query, records, rows, "search complete");
                self.nodes = Arc::from(nodes);
                SearchOutcome::Results {
                    query,
                    records,
                    rows,
                }
            }
        }
    }

    /// Run a whole search synchronously against `lookup`.
    pub fn search<L>(&mut self, lookup: &L, query: &str) -> SearchOutcome
    where
        L: Lookup + ?Sized,
    {
        let Some(ticket) = self.begin(query) else {
            return SearchOutcome::Ignored;
        };
        let span = tracing::info_span!("search", query = ticket.query());
        let _guard = span.enter();
        let result = lookup.lookup(ticket.query());
        self.complete(ticket, result)
    }
}

impl Default for ResultPipeline {
    fn default() -> Self {
        Self::new(coursetree_core::ROOT_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type LookupResult = Result<Vec<Record>, LookupError>;

    fn course_records() -> Vec<Record> {
        vec![
            Record::new(1, "Math", 0),
            Record::new(2, "Algebra", 1),
            Record::new(3, "Geometry", 1),
            Record::new(4, "CS", 0),
        ]
    }

    fn names(pipeline: &ResultPipeline) -> Vec<(&str, usize)> {
        pipeline.nodes().iter().map(|n| (n.name(), n.depth())).collect()
    }

    #[test]
    fn successful_search_flattens() {
        let mut pipeline = ResultPipeline::new(0);
        let outcome = pipeline.search(&|_: &str| -> LookupResult { Ok(course_records()) }, "math");
        assert!(matches!(
            outcome,
            SearchOutcome::Results {
                records: 4,
                rows: 4,
                ..
            }
        ));
        assert!(outcome.notice().is_none());
        assert_eq!(
            names(&pipeline),
            vec![("Math", 0), ("Algebra", 1), ("Geometry", 1), ("CS", 0)]
        );
        assert!(!pipeline.is_loading());
    }

    #[test]
    fn empty_result_is_no_results_not_failure() {
        let mut pipeline = ResultPipeline::new(0);
        let outcome = pipeline.search(&|_: &str| -> LookupResult { Ok(Vec::new()) }, "zzz");
        assert!(!outcome.is_failure());
        assert_eq!(
            outcome.notice(),
            Some(Notice::NoResults {
                query: "zzz".into()
            })
        );
        assert_eq!(
            outcome.notice().map(|n| n.to_string()).as_deref(),
            Some("No results found for \"zzz\"")
        );
        assert!(pipeline.nodes().is_empty());
    }

    #[test]
    fn status_error_clears_previous_results() {
        let mut pipeline = ResultPipeline::new(0);
        pipeline.search(&|_: &str| -> LookupResult { Ok(course_records()) }, "math");
        assert_eq!(pipeline.nodes().len(), 4);

        let outcome = pipeline.search(&|_: &str| -> LookupResult { Err(LookupError::Status(500)) }, "math");
        assert!(matches!(
            outcome,
            SearchOutcome::Failed {
                error: LookupError::Status(500),
                ..
            }
        ));
        assert_eq!(outcome.notice(), Some(Notice::Failed));
        assert!(outcome.notice().is_some_and(|n| n.is_error()));
        assert!(pipeline.nodes().is_empty());
    }

    #[test]
    fn transport_error_is_failure() {
        let mut pipeline = ResultPipeline::new(0);
        let outcome = pipeline.search(
            &|_: &str| -> LookupResult { Err(LookupError::transport("connection refused")) },
            "math",
        );
        assert!(outcome.is_failure());
        assert_eq!(
            outcome.notice().map(|n| n.to_string()).as_deref(),
            Some("Something went wrong, please try again later")
        );
    }

    #[test]
    fn blank_query_does_not_call_lookup() {
        let calls = Cell::new(0);
        let lookup = |_: &str| -> LookupResult {
            calls.set(calls.get() + 1);
            Ok(course_records())
        };
        let mut pipeline = ResultPipeline::new(0);
        pipeline.search(&lookup, "math");
        assert!(matches!(pipeline.search(&lookup, "   "), SearchOutcome::Ignored));
        assert_eq!(calls.get(), 1);
        // Display from the previous search is untouched.
        assert_eq!(pipeline.nodes().len(), 4);
    }

    #[test]
    fn query_is_trimmed_before_lookup() {
        let seen = std::cell::RefCell::new(String::new());
        let lookup = |q: &str| -> LookupResult {
            *seen.borrow_mut() = q.to_string();
            Ok(Vec::new())
        };
        ResultPipeline::new(0).search(&lookup, "  algebra \n");
        assert_eq!(seen.borrow().as_str(), "algebra");
    }

    #[test]
    fn unreachable_records_yield_empty_results_without_notice() {
        let mut pipeline = ResultPipeline::new(0);
        let outcome = pipeline.search(
            &|_: &str| -> LookupResult { Ok(vec![Record::new(1, "X", 2), Record::new(2, "Y", 1)]) },
            "cycle",
        );
        assert!(matches!(
            outcome,
            SearchOutcome::Results {
                records: 2,
                rows: 0,
                ..
            }
        ));
        assert!(outcome.notice().is_none());
        assert!(pipeline.nodes().is_empty());
    }

    #[test]
    fn loading_flag_tracks_ticket() {
        let mut pipeline = ResultPipeline::new(0);
        assert!(!pipeline.is_loading());
        let ticket = pipeline.begin("math").unwrap();
        assert!(pipeline.is_loading());
        pipeline.complete(ticket, Ok(course_records()));
        assert!(!pipeline.is_loading());
    }

    #[test]
    fn superseded_result_is_discarded() {
        let mut pipeline = ResultPipeline::new(0);
        let old = pipeline.begin("ma").unwrap();
        let new = pipeline.begin("math").unwrap();
        assert!(new.generation() > old.generation());

        let outcome = pipeline.complete(new, Ok(vec![Record::new(9, "Newest", 0)]));
        assert!(matches!(outcome, SearchOutcome::Results { rows: 1, .. }));

        let outcome = pipeline.complete(old, Ok(course_records()));
        assert!(matches!(outcome, SearchOutcome::Stale { ref query } if query == "ma"));
        assert_eq!(names(&pipeline), vec![("Newest", 0)]);
    }

    #[test]
    fn stale_failure_does_not_clear_display() {
        let mut pipeline = ResultPipeline::new(0);
        let old = pipeline.begin("a").unwrap();
        let new = pipeline.begin("ab").unwrap();
        pipeline.complete(new, Ok(course_records()));
        let outcome = pipeline.complete(old, Err(LookupError::Status(503)));
        assert!(matches!(outcome, SearchOutcome::Stale { .. }));
        assert!(outcome.notice().is_none());
        assert_eq!(pipeline.nodes().len(), 4);
    }

    #[test]
    fn cancelled_search_is_stale() {
        let mut pipeline = ResultPipeline::new(0);
        let ticket = pipeline.begin("math").unwrap();
        pipeline.cancel();
        assert!(!pipeline.is_loading());
        let outcome = pipeline.complete(ticket, Ok(course_records()));
        assert!(matches!(outcome, SearchOutcome::Stale { .. }));
        assert!(pipeline.nodes().is_empty());
    }

    #[test]
    fn snapshot_survives_next_search() {
        let mut pipeline = ResultPipeline::new(0);
        pipeline.search(&|_: &str| -> LookupResult { Ok(course_records()) }, "math");
        let snapshot = pipeline.snapshot();
        pipeline.search(&|_: &str| -> LookupResult { Err(LookupError::Status(500)) }, "math");
        assert_eq!(snapshot.len(), 4);
        assert!(pipeline.nodes().is_empty());
    }

    #[test]
    fn custom_root_sentinel() {
        let mut pipeline = ResultPipeline::new(-1);
        pipeline.search(
            &|_: &str| -> LookupResult {
                Ok(vec![Record::new(1, "top", -1), Record::new(2, "zero-parented", 0)])
            },
            "q",
        );
        assert_eq!(names(&pipeline), vec![("top", 0)]);
        assert_eq!(pipeline.root(), -1);
    }

    #[test]
    fn lookup_on_worker_thread() {
        let mut pipeline = ResultPipeline::default();
        let ticket = pipeline.begin("math").unwrap();
        let (ticket, result) = std::thread::spawn(move || {
            let result: LookupResult = Ok(course_records());
            (ticket, result)
        })
        .join()
        .unwrap();
        let outcome = pipeline.complete(ticket, result);
        assert!(matches!(outcome, SearchOutcome::Results { rows: 4, .. }));
    }
}
