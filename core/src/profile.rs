//! The derived customer profile — a pure projection of CustomerFacts.
//!
//! RULE: a DerivedProfile has no identity or lifecycle of its own. It is
//! recomputed on every read; the authoritative record stays in the store.

use serde::{Deserialize, Serialize};

/// Engagement classification. Ranges overlap, so evaluation order matters:
/// the vip check always runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerType {
    Lead,
    Active,
    Vip,
    AtRisk,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Active => "active",
            Self::Vip => "vip",
            Self::AtRisk => "at-risk",
        }
    }
}

/// Revenue-based classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Everything the engine derives for one customer in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedProfile {
    pub health_score:     u8,
    pub churn_risk:       u8,
    pub upsell_potential: u8,
    pub customer_type:    CustomerType,
    pub tier:             Tier,
    pub sentiment:        Sentiment,
    pub jtbd:             String,
    pub next_purchase_timeframe:       String,
    pub suggested_next_product:        String,
    pub estimated_next_purchase_value: i64,
    pub cross_sell_suggestion:         String,
    pub acceptance_probability:        u8,
}
