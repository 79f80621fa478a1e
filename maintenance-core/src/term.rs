//! Maintenance terms and merging of overlapping terms.

use std::fmt;

use chrono::{DateTime, Utc};

/// Half-open interval `[start, end)` of one maintenance occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Term {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(end > start, "term must end after it starts");
        Term { start, end }
    }

    /// Open-interval overlap: terms that only touch do not overlap.
    pub fn overlaps(&self, other: &Term) -> bool {
        other.start < self.end && other.end > self.start
    }

    /// Widen this term to also cover `other`.
    pub fn extend_to(&mut self, other: &Term) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Merge `incoming` terms into `existing`.
///
/// e.g. 10:00-11:00 and 10:30-11:30 become 10:00-11:30.
///
/// Each incoming term widens the first existing term it overlaps and is
/// otherwise appended. Only one pass is made: an entry widened here is not
/// re-checked against the entries after it.
pub fn merge_terms(mut existing: Vec<Term>, incoming: Vec<Term>) -> Vec<Term> {
    for term in incoming {
        match existing.iter_mut().find(|e| e.overlaps(&term)) {
            Some(entry) => entry.extend_to(&term),
            None => existing.push(term),
        }
    }
    existing
}
