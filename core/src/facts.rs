//! Raw transactional facts — the engine's only input.
//!
//! Facts are plain data. The caller aggregates them from wherever the
//! authoritative records live (CrmStore here, any other backend elsewhere)
//! and the engine never reaches past them.

use crate::types::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Positive,
    Negative,
    Neutral,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub kind:     FeedbackKind,
    pub date:     NaiveDate,
    pub comment:  String,
    pub category: String,
}

/// One customer's transactional history, immutable per scoring call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerFacts {
    pub purchase_count:  u32,
    pub last_purchase:   Option<NaiveDate>,
    pub total_revenue:   Money,
    pub avg_order_value: Money,
    /// Insertion order is meaningful: the first entry is the primary
    /// pain point the narrative keys off.
    pub pain_points:     Vec<String>,
    pub feedback:        Vec<FeedbackEntry>,
}

impl CustomerFacts {
    /// Map malformed magnitudes onto their no-data branch. Negative money
    /// becomes zero; the engine never rejects a record outright.
    pub fn sanitized(&self) -> CustomerFacts {
        let mut facts = self.clone();
        if !facts.total_revenue.is_finite() || facts.total_revenue < 0.0 {
            facts.total_revenue = 0.0;
        }
        if !facts.avg_order_value.is_finite() || facts.avg_order_value < 0.0 {
            facts.avg_order_value = 0.0;
        }
        facts
    }

    /// Share of feedback entries that are positive, or None with no feedback.
    pub fn positive_feedback_ratio(&self) -> Option<f64> {
        if self.feedback.is_empty() {
            return None;
        }
        let positive = self
            .feedback
            .iter()
            .filter(|f| f.kind == FeedbackKind::Positive)
            .count();
        Some(positive as f64 / self.feedback.len() as f64)
    }

    /// Share of feedback entries that are negative, or None with no feedback.
    pub fn negative_feedback_ratio(&self) -> Option<f64> {
        if self.feedback.is_empty() {
            return None;
        }
        let negative = self
            .feedback
            .iter()
            .filter(|f| f.kind == FeedbackKind::Negative)
            .count();
        Some(negative as f64 / self.feedback.len() as f64)
    }

    pub fn primary_pain_point(&self) -> Option<&str> {
        self.pain_points.first().map(String::as_str)
    }
}
