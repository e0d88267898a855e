//! Scoring configuration — every threshold the engine consults, as data.
//!
//! The `Default` impls carry the shipped behavior. A deployment that
//! operates in a different currency overrides the band tables through a
//! JSON file; the formulas themselves never change shape.

use crate::{
    error::CrmResult,
    types::{Days, Money},
};
use serde::{Deserialize, Serialize};

/// A step-function band granting `points` when the observed count is ≥ `min`.
/// Tables are consulted first-match-wins and must be sorted descending by `min`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountBand {
    pub min:    u32,
    pub points: i64,
}

/// Grants `points` when days-since is ≤ `max_days`. Sorted ascending by `max_days`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecencyBand {
    pub max_days: Days,
    pub points:   i64,
}

/// Grants `points` when days-since is > `min_days`. Sorted descending by `min_days`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InactivityBand {
    pub min_days: Days,
    pub points:   i64,
}

/// Grants `points` when the observed amount is ≥ `min`. Sorted descending by `min`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoneyBand {
    pub min:    Money,
    pub points: i64,
}

/// Grants `penalty` when the observed score is < `below`. Sorted ascending by `below`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScorePenaltyBand {
    pub below:   i64,
    pub penalty: i64,
}

/// Grants `points` when the observed score is ≥ `min`. Sorted descending by `min`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min:    i64,
    pub points: i64,
}

// ── Health ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Score a customer with zero history lands on before any contribution.
    pub base_offset:     i64,
    pub frequency_bands: Vec<CountBand>,
    pub recency_bands:   Vec<RecencyBand>,
    /// Consulted only when revenue > 0; zero revenue contributes nothing.
    pub revenue_bands:   Vec<MoneyBand>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            base_offset: 50,
            frequency_bands: vec![
                CountBand { min: 10, points: 30 },
                CountBand { min: 5, points: 20 },
                CountBand { min: 2, points: 10 },
                CountBand { min: 1, points: 5 },
            ],
            recency_bands: vec![
                RecencyBand { max_days: 7, points: 40 },
                RecencyBand { max_days: 30, points: 30 },
                RecencyBand { max_days: 90, points: 20 },
                RecencyBand { max_days: 180, points: 10 },
            ],
            revenue_bands: vec![
                MoneyBand { min: 50_000_000.0, points: 30 },
                MoneyBand { min: 10_000_000.0, points: 25 },
                MoneyBand { min: 5_000_000.0, points: 20 },
                MoneyBand { min: 1_000_000.0, points: 15 },
                MoneyBand { min: 500_000.0, points: 10 },
                MoneyBand { min: 0.0, points: 5 },
            ],
        }
    }
}

// ── Churn ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnConfig {
    pub health_penalties:        Vec<ScorePenaltyBand>,
    /// Flat penalty for a customer who has never purchased. Stacks with the
    /// zero-purchase volume penalty below; both fire for a fresh lead.
    pub never_purchased_penalty: i64,
    pub inactivity_bands:        Vec<InactivityBand>,
    pub no_purchase_penalty:     i64,
    pub single_purchase_penalty: i64,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            health_penalties: vec![
                ScorePenaltyBand { below: 30, penalty: 50 },
                ScorePenaltyBand { below: 50, penalty: 30 },
                ScorePenaltyBand { below: 70, penalty: 10 },
            ],
            never_purchased_penalty: 50,
            inactivity_bands: vec![
                InactivityBand { min_days: 180, points: 40 },
                InactivityBand { min_days: 90, points: 25 },
                InactivityBand { min_days: 60, points: 15 },
            ],
            no_purchase_penalty: 10,
            single_purchase_penalty: 5,
        }
    }
}

// ── Upsell ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsellConfig {
    pub health_bands:      Vec<ScoreBand>,
    pub frequency_bands:   Vec<CountBand>,
    pub order_value_bands: Vec<MoneyBand>,
}

impl Default for UpsellConfig {
    fn default() -> Self {
        Self {
            health_bands: vec![
                ScoreBand { min: 80, points: 40 },
                ScoreBand { min: 60, points: 30 },
                ScoreBand { min: 40, points: 15 },
            ],
            frequency_bands: vec![
                CountBand { min: 5, points: 30 },
                CountBand { min: 3, points: 20 },
                CountBand { min: 2, points: 10 },
            ],
            order_value_bands: vec![
                MoneyBand { min: 10_000_000.0, points: 30 },
                MoneyBand { min: 5_000_000.0, points: 20 },
                MoneyBand { min: 1_000_000.0, points: 10 },
            ],
        }
    }
}

// ── Classification ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Vip requires BOTH thresholds; checked before the active range because
    /// the ranges overlap.
    pub vip_min_health:     i64,
    pub vip_min_revenue:    Money,
    pub active_min_health:  i64,
    pub at_risk_max_health: i64,
    pub platinum_min_revenue: Money,
    pub gold_min_revenue:     Money,
    pub silver_min_revenue:   Money,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            vip_min_health: 80,
            vip_min_revenue: 10_000_000.0,
            active_min_health: 60,
            at_risk_max_health: 30,
            platinum_min_revenue: 50_000_000.0,
            gold_min_revenue: 10_000_000.0,
            silver_min_revenue: 5_000_000.0,
        }
    }
}

// ── Sentiment ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    pub positive_ratio_weight: f64,
    pub negative_ratio_weight: f64,
    pub pain_point_weight:     f64,
    pub health_weight:         f64,
    pub health_midpoint:       f64,
    pub churn_weight:          f64,
    pub positive_threshold:    f64,
    pub negative_threshold:    f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive_ratio_weight: 50.0,
            negative_ratio_weight: 30.0,
            pain_point_weight: 10.0,
            health_weight: 0.5,
            health_midpoint: 50.0,
            churn_weight: 0.3,
            positive_threshold: 20.0,
            negative_threshold: -10.0,
        }
    }
}

// ── Recommendations ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Fraction of the upsell score applied as order-value uplift.
    pub upsell_uplift:          f64,
    pub loyal_min_purchases:    u32,
    pub loyal_multiplier:       f64,
    pub repeat_min_purchases:   u32,
    pub repeat_multiplier:      f64,
    /// Average order value above which a customer counts as a high spender.
    pub high_spend_order_value:   Money,
    pub medium_spend_order_value: Money,
    /// Total revenue above which cross-sell short-circuits to premium
    /// suggestions regardless of tier.
    pub premium_revenue:        Money,
    /// Churn-risk cut-offs for the purchase-timeframe bands, highest first.
    pub churn_band_high:        i64,
    pub churn_band_elevated:    i64,
    pub churn_band_moderate:    i64,
    /// Recency branches inside the lowest churn band.
    pub recent_purchase_days:   Days,
    pub lapsing_purchase_days:  Days,
    pub acceptance_health_weight: f64,
    pub acceptance_upsell_weight: f64,
    pub acceptance_count_bands:   Vec<CountBand>,
    pub acceptance_floor:         i64,
    pub acceptance_ceiling:       i64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            upsell_uplift: 0.5,
            loyal_min_purchases: 10,
            loyal_multiplier: 1.15,
            repeat_min_purchases: 5,
            repeat_multiplier: 1.08,
            high_spend_order_value: 1_000_000.0,
            medium_spend_order_value: 500_000.0,
            premium_revenue: 10_000_000.0,
            churn_band_high: 70,
            churn_band_elevated: 50,
            churn_band_moderate: 30,
            recent_purchase_days: 30,
            lapsing_purchase_days: 90,
            acceptance_health_weight: 0.5,
            acceptance_upsell_weight: 0.3,
            acceptance_count_bands: vec![
                CountBand { min: 10, points: 20 },
                CountBand { min: 5, points: 15 },
                CountBand { min: 3, points: 10 },
                CountBand { min: 1, points: 5 },
            ],
            acceptance_floor: 10,
            acceptance_ceiling: 95,
        }
    }
}

// ── Top level ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub health:         HealthConfig,
    pub churn:          ChurnConfig,
    pub upsell:         UpsellConfig,
    pub classification: ClassificationConfig,
    pub sentiment:      SentimentConfig,
    pub recommendation: RecommendationConfig,
}

impl ScoringConfig {
    /// Load overrides from a JSON file. Sections left out of the file keep
    /// their defaults.
    pub fn load(path: &str) -> CrmResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ScoringConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
