//! Scoring clock — owns the as-of date every recency calculation uses.
//!
//! RULE: Nothing in the engine may read the wall clock directly.
//! All "days since" arithmetic flows through a Clock, so tests and
//! replay tooling pin the reference date explicitly.

use crate::types::Days;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    as_of: NaiveDate,
}

impl Clock {
    /// Pin the clock to a specific date. Used by tests and replay tooling.
    pub fn fixed(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// Clock anchored at the current UTC date.
    pub fn today() -> Self {
        Self {
            as_of: chrono::Utc::now().date_naive(),
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Whole days between `date` and the as-of date.
    ///
    /// Returns None when there is no date, or when the date lies in the
    /// future. A future-dated purchase is malformed input and takes the
    /// no-history branch rather than erroring.
    pub fn days_since(&self, date: Option<NaiveDate>) -> Option<Days> {
        let date = date?;
        let days = (self.as_of - date).num_days();
        if days < 0 {
            return None;
        }
        Some(days)
    }
}
