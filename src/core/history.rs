//! State transition history tracking.
//!
//! Each machine may keep an in-memory log of the transitions it committed.
//! The log is for inspection only; it is never used to restore a machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "open".to_string(),
///     to: "closed".to_string(),
///     event: "close".to_string(),
///     transition: "closing".to_string(),
///     order: 0,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "closed");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left
    pub from: String,
    /// The state being entered
    pub to: String,
    /// The event that caused the transition
    pub event: String,
    /// Name of the transition taken
    pub transition: String,
    /// Declaration order of the transition taken
    pub order: usize,
    /// When the state change was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions, optionally bounded.
///
/// When a limit is set the oldest records are dropped first.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// for (from, to) in [("heads", "tails"), ("tails", "heads")] {
///     history = history.record(TransitionRecord {
///         from: from.to_string(),
///         to: to.to_string(),
///         event: "toss".to_string(),
///         transition: "toss".to_string(),
///         order: 0,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.get_path(), vec!["heads", "tails", "heads"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    records: Vec<TransitionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Return a new history with `record` appended; `self` is left unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        if let Some(limit) = self.limit {
            let excess = records.len().saturating_sub(limit);
            records.drain(..excess);
        }
        Self {
            records,
            limit: self.limit,
        }
    }

    /// Names of the states traversed: the first retained record's source,
    /// then the target of every record.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        path.extend(self.records.iter().map(|r| r.to.as_str()));
        path
    }

    /// Time between the first and last retained records.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
