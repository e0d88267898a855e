//! Composite score computation — health, churn risk, upsell potential.
//!
//! Each score is an additive stack of step-function contributions, recorded
//! component by component so callers can explain a number, then clamped to
//! its declared range. Clamping is unconditional and always applied last.

use crate::{
    config::{ChurnConfig, CountBand, HealthConfig, MoneyBand, UpsellConfig},
    facts::CustomerFacts,
    types::{Days, Money},
};
use serde::{Deserialize, Serialize};

// ── Band lookups ─────────────────────────────────────────────────────────────

fn count_points(bands: &[CountBand], count: u32) -> i64 {
    bands
        .iter()
        .find(|b| count >= b.min)
        .map(|b| b.points)
        .unwrap_or(0)
}

fn money_points(bands: &[MoneyBand], amount: Money) -> i64 {
    if amount <= 0.0 {
        return 0;
    }
    bands
        .iter()
        .find(|b| amount >= b.min)
        .map(|b| b.points)
        .unwrap_or(0)
}

fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

// ── Health ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: u8,
    // Components
    pub base_offset:      i64,
    pub frequency_points: i64,
    pub recency_points:   i64,
    pub revenue_points:   i64,
}

/// Health = base offset + frequency + recency + revenue, clamped to [0,100].
///
/// `days_since_purchase` is None when there is no usable last-purchase date;
/// recency then contributes nothing.
pub fn health_score(
    facts: &CustomerFacts,
    days_since_purchase: Option<Days>,
    config: &HealthConfig,
) -> HealthScore {
    let frequency_points = count_points(&config.frequency_bands, facts.purchase_count);

    let recency_points = match days_since_purchase {
        Some(days) => config
            .recency_bands
            .iter()
            .find(|b| days <= b.max_days)
            .map(|b| b.points)
            .unwrap_or(0),
        None => 0,
    };

    let revenue_points = money_points(&config.revenue_bands, facts.total_revenue);

    let raw = config.base_offset + frequency_points + recency_points + revenue_points;

    HealthScore {
        score: clamp_score(raw),
        base_offset: config.base_offset,
        frequency_points,
        recency_points,
        revenue_points,
    }
}

// ── Churn risk ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnScore {
    pub score: u8,
    // Components
    pub health_penalty:     i64,
    pub inactivity_penalty: i64,
    pub low_volume_penalty: i64,
}

/// Churn risk = health penalty + inactivity penalty + low-volume penalty,
/// clamped to [0,100].
///
/// A customer who has never purchased takes BOTH the never-purchased
/// inactivity penalty and the zero-volume penalty. The penalties are
/// additive, not mutually exclusive.
pub fn churn_risk(
    health: u8,
    facts: &CustomerFacts,
    days_since_purchase: Option<Days>,
    config: &ChurnConfig,
) -> ChurnScore {
    let health_penalty = config
        .health_penalties
        .iter()
        .find(|b| i64::from(health) < b.below)
        .map(|b| b.penalty)
        .unwrap_or(0);

    let inactivity_penalty = if facts.purchase_count == 0 {
        config.never_purchased_penalty
    } else {
        match days_since_purchase {
            Some(days) => config
                .inactivity_bands
                .iter()
                .find(|b| days > b.min_days)
                .map(|b| b.points)
                .unwrap_or(0),
            // Purchases exist but no usable date: inactivity is unmeasurable.
            None => 0,
        }
    };

    let low_volume_penalty = match facts.purchase_count {
        0 => config.no_purchase_penalty,
        1 => config.single_purchase_penalty,
        _ => 0,
    };

    let raw = health_penalty + inactivity_penalty + low_volume_penalty;

    ChurnScore {
        score: clamp_score(raw),
        health_penalty,
        inactivity_penalty,
        low_volume_penalty,
    }
}

// ── Upsell potential ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsellScore {
    pub score: u8,
    // Components
    pub health_points:      i64,
    pub frequency_points:   i64,
    pub order_value_points: i64,
}

/// Upsell potential = health tier + purchase-volume tier + order-value tier,
/// clamped to [0,100].
pub fn upsell_potential(health: u8, facts: &CustomerFacts, config: &UpsellConfig) -> UpsellScore {
    let health_points = config
        .health_bands
        .iter()
        .find(|b| i64::from(health) >= b.min)
        .map(|b| b.points)
        .unwrap_or(0);

    let frequency_points = count_points(&config.frequency_bands, facts.purchase_count);
    let order_value_points = money_points(&config.order_value_bands, facts.avg_order_value);

    let raw = health_points + frequency_points + order_value_points;

    UpsellScore {
        score: clamp_score(raw),
        health_points,
        frequency_points,
        order_value_points,
    }
}
