//! Next-action recommendations.
//!
//! Independent step-function lookups over the derived scores and raw facts.
//! None depends on another's output; the engine may call them in any order.
//! Absent history (no purchases, no usable date) always takes a sensible
//! branch rather than erroring.

use crate::{
    config::RecommendationConfig,
    profile::Tier,
    types::{Days, Money},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub next_purchase_timeframe:       String,
    pub suggested_next_product:        String,
    pub estimated_next_purchase_value: i64,
    pub cross_sell_suggestion:         String,
    pub acceptance_probability:        u8,
}

/// Expected window for the next purchase. Churn risk buckets into four
/// bands; only the lowest band branches further on purchase recency.
pub fn next_purchase_timeframe(
    purchase_count: u32,
    days_since_purchase: Option<Days>,
    churn: u8,
    config: &RecommendationConfig,
) -> String {
    let churn = i64::from(churn);

    let timeframe = if churn > config.churn_band_high {
        "re-engagement required before any purchase is likely"
    } else if churn > config.churn_band_elevated {
        "90+ days, at risk of stalling"
    } else if churn > config.churn_band_moderate {
        "within 60-90 days"
    } else if purchase_count == 0 {
        "first purchase pending qualification"
    } else {
        match days_since_purchase {
            Some(days) if days <= config.recent_purchase_days => "within 30 days",
            Some(days) if days <= config.lapsing_purchase_days => "within 30-60 days",
            _ => "within 60-90 days",
        }
    };

    timeframe.to_string()
}

/// Catalog lookup keyed primarily by tier, then by spend level and volume.
pub fn suggested_next_product(
    tier: Tier,
    purchase_count: u32,
    avg_order_value: Money,
    config: &RecommendationConfig,
) -> String {
    let high_spender = avg_order_value >= config.high_spend_order_value;
    let medium_spender = avg_order_value >= config.medium_spend_order_value;

    let product = match tier {
        Tier::Platinum => {
            if high_spender {
                "Multi-year Enterprise Agreement"
            } else if purchase_count >= 5 {
                "Enterprise Suite expansion"
            } else {
                "Dedicated Success Manager"
            }
        }
        Tier::Gold => {
            if high_spender {
                "Enterprise Suite"
            } else if medium_spender {
                "Premium Support Plan"
            } else {
                "Analytics Add-on"
            }
        }
        Tier::Silver => {
            if purchase_count >= 3 {
                "Growth Package"
            } else if medium_spender {
                "Premium Support Plan"
            } else {
                "Analytics Add-on"
            }
        }
        Tier::Bronze => {
            if purchase_count >= 2 {
                "Growth Package"
            } else {
                "Starter Bundle"
            }
        }
    };

    product.to_string()
}

/// Order-value estimate: avg order value, uplifted by upsell potential,
/// scaled by a loyalty multiplier, rounded to the nearest whole unit.
pub fn estimated_next_purchase_value(
    avg_order_value: Money,
    upsell: u8,
    purchase_count: u32,
    config: &RecommendationConfig,
) -> i64 {
    let uplift = 1.0 + f64::from(upsell) / 100.0 * config.upsell_uplift;

    let loyalty = if purchase_count >= config.loyal_min_purchases {
        config.loyal_multiplier
    } else if purchase_count >= config.repeat_min_purchases {
        config.repeat_multiplier
    } else {
        1.0
    };

    (avg_order_value * uplift * loyalty).round() as i64
}

/// Cross-sell decision table. Revenue at or above the premium threshold
/// short-circuits to premium suggestions regardless of tier.
pub fn cross_sell_suggestion(
    tier: Tier,
    purchase_count: u32,
    health: u8,
    total_revenue: Money,
    config: &RecommendationConfig,
) -> String {
    if total_revenue >= config.premium_revenue {
        return "Dedicated Success Manager with quarterly business reviews".to_string();
    }

    let suggestion = match tier {
        Tier::Platinum | Tier::Gold => {
            if health >= 70 {
                "API Integration Package"
            } else {
                "Premium Support Plan"
            }
        }
        Tier::Silver => {
            if purchase_count >= 3 {
                "Team Training Workshop"
            } else {
                "Analytics Add-on"
            }
        }
        Tier::Bronze => {
            if health >= 60 {
                "Analytics Add-on"
            } else {
                "Team Training Workshop"
            }
        }
    };

    suggestion.to_string()
}

/// Probability the customer accepts the suggested offer. Note the
/// asymmetric clamp: the floor is 10 and the ceiling 95, never [0,100].
pub fn acceptance_probability(
    health: u8,
    upsell: u8,
    purchase_count: u32,
    config: &RecommendationConfig,
) -> u8 {
    let count_points = config
        .acceptance_count_bands
        .iter()
        .find(|b| purchase_count >= b.min)
        .map(|b| b.points)
        .unwrap_or(0);

    let raw = f64::from(health) * config.acceptance_health_weight
        + f64::from(upsell) * config.acceptance_upsell_weight
        + count_points as f64;

    (raw.round() as i64).clamp(config.acceptance_floor, config.acceptance_ceiling) as u8
}

/// Compute the full recommendation set in one pass.
#[allow(clippy::too_many_arguments)]
pub fn recommendations(
    tier: Tier,
    health: u8,
    churn: u8,
    upsell: u8,
    purchase_count: u32,
    days_since_purchase: Option<Days>,
    avg_order_value: Money,
    total_revenue: Money,
    config: &RecommendationConfig,
) -> Recommendations {
    Recommendations {
        next_purchase_timeframe: next_purchase_timeframe(
            purchase_count,
            days_since_purchase,
            churn,
            config,
        ),
        suggested_next_product: suggested_next_product(
            tier,
            purchase_count,
            avg_order_value,
            config,
        ),
        estimated_next_purchase_value: estimated_next_purchase_value(
            avg_order_value,
            upsell,
            purchase_count,
            config,
        ),
        cross_sell_suggestion: cross_sell_suggestion(
            tier,
            purchase_count,
            health,
            total_revenue,
            config,
        ),
        acceptance_probability: acceptance_probability(health, upsell, purchase_count, config),
    }
}
