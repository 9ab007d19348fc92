//! Search session state machine
//!
//! `SearchController` owns the term, the search type and the latest results.
//! It performs no I/O itself: every change returns an [`Effect`] telling the
//! caller to (re)start or cancel the debounce timer, and an elapsed timer is
//! turned into a [`FetchRequest`] tagged with a sequence number. Only the
//! response carrying the latest sequence number is ever applied.
//!
//! ```text
//! Idle --term--> Pending --timer--> Loading --ok--> Ready | Empty
//!                   ^                  |     \--err--> Failed --retry--> Loading
//!                   +--- any term/type change from any state
//! ```

use std::time::Duration;

use crate::backend::api::SearchError;
use crate::backend::types::{SearchKind, SearchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Empty term, nothing to show
    Idle,
    /// Debounce timer running
    Pending,
    /// Request in flight
    Loading,
    Ready,
    Empty,
    Failed(SearchError),
}

/// Timer instruction for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drop any running timer and start one that reports `ticket` after `delay`
    Schedule { ticket: u64, delay: Duration },
    /// Drop any running timer
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub kind: SearchKind,
    pub term: String,
}

/// What the search view should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDisplay<'a> {
    Prompt,
    Loading,
    NoResults { term: &'a str },
    Failed { term: &'a str, error: &'a SearchError },
    Results { term: &'a str, items: &'a [SearchResult] },
}

impl SearchDisplay<'_> {
    pub fn message(&self) -> String {
        match self {
            SearchDisplay::Prompt => "Search for something!".to_string(),
            SearchDisplay::Loading => "Loading...".to_string(),
            SearchDisplay::NoResults { term } => format!("No Results for \"{}\"", term),
            SearchDisplay::Failed { term, error } => {
                format!("Search for \"{}\" failed: {}", term, error)
            }
            SearchDisplay::Results { term, .. } => format!("Search results for \"{}\"", term),
        }
    }
}

#[derive(Debug)]
pub struct SearchController {
    term: String,
    kind: SearchKind,
    results: Vec<SearchResult>,
    phase: Phase,
    debounce: Duration,
    /// Identifies the most recently scheduled timer
    ticket: u64,
    /// Sequence number of the most recently issued request
    latest_seq: u64,
}

impl SearchController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            term: String::new(),
            kind: SearchKind::default(),
            results: Vec::new(),
            phase: Phase::Idle,
            debounce,
            ticket: 0,
            latest_seq: 0,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn find(&self, id: u64) -> Option<&SearchResult> {
        self.results.iter().find(|r| r.id() == id)
    }

    pub fn set_term(&mut self, term: impl Into<String>) -> Effect {
        self.term = term.into();
        self.restart()
    }

    pub fn set_kind(&mut self, kind: SearchKind) -> Effect {
        self.kind = kind;
        self.restart()
    }

    /// Start a fresh session (empty term, default type). Counters keep
    /// increasing so responses from the previous session stay stale.
    pub fn reset(&mut self) -> Effect {
        self.term.clear();
        self.kind = SearchKind::default();
        self.restart()
    }

    /// Every change supersedes the previous timer and any request in flight.
    fn restart(&mut self) -> Effect {
        self.ticket += 1;
        self.latest_seq += 1;
        self.results.clear();

        if self.term.is_empty() {
            self.phase = Phase::Idle;
            Effect::Cancel
        } else {
            self.phase = Phase::Pending;
            Effect::Schedule {
                ticket: self.ticket,
                delay: self.debounce,
            }
        }
    }

    /// The timer for `ticket` fired. Returns the request to send, if the
    /// ticket is still current.
    pub fn debounce_elapsed(&mut self, ticket: u64) -> Option<FetchRequest> {
        if ticket != self.ticket || self.phase != Phase::Pending {
            tracing::debug!("Ignoring superseded debounce ticket {}", ticket);
            return None;
        }
        Some(self.begin_fetch())
    }

    /// Re-issue the last search after a failure, without waiting.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        match self.phase {
            Phase::Failed(_) => Some(self.begin_fetch()),
            _ => None,
        }
    }

    fn begin_fetch(&mut self) -> FetchRequest {
        self.latest_seq += 1;
        self.phase = Phase::Loading;
        tracing::info!("Searching {} for {:?} (#{})", self.kind, self.term, self.latest_seq);
        FetchRequest {
            seq: self.latest_seq,
            kind: self.kind,
            term: self.term.clone(),
        }
    }

    /// Apply the outcome of request `seq`. Returns false when the response
    /// was stale and got dropped.
    pub fn fetch_finished(
        &mut self,
        seq: u64,
        outcome: Result<Vec<SearchResult>, SearchError>,
    ) -> bool {
        if seq != self.latest_seq || self.phase != Phase::Loading {
            tracing::debug!("Discarding stale response #{} (latest #{})", seq, self.latest_seq);
            return false;
        }

        match outcome {
            Ok(items) => {
                self.results = items;
                self.phase = if self.results.is_empty() {
                    Phase::Empty
                } else {
                    Phase::Ready
                };
            }
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", self.term, e);
                self.results.clear();
                self.phase = Phase::Failed(e);
            }
        }
        true
    }

    pub fn display(&self) -> SearchDisplay<'_> {
        match &self.phase {
            Phase::Idle => SearchDisplay::Prompt,
            Phase::Pending | Phase::Loading => SearchDisplay::Loading,
            Phase::Empty => SearchDisplay::NoResults { term: &self.term },
            Phase::Failed(error) => SearchDisplay::Failed {
                term: &self.term,
                error,
            },
            Phase::Ready => SearchDisplay::Results {
                term: &self.term,
                items: &self.results,
            },
        }
    }
}
