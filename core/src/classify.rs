//! Classification — customer type, revenue tier, and sentiment.
//!
//! Type and tier are pure functions of (health, revenue) and revenue; no
//! hidden state. Sentiment folds health and churn back in, so it is always
//! evaluated after both scores exist.

use crate::{
    config::{ClassificationConfig, SentimentConfig},
    facts::CustomerFacts,
    profile::{CustomerType, Sentiment, Tier},
    types::Money,
};

/// Engagement classification. The vip check runs first because the vip and
/// active health ranges overlap.
pub fn customer_type(
    health: u8,
    total_revenue: Money,
    config: &ClassificationConfig,
) -> CustomerType {
    let health = i64::from(health);
    if health >= config.vip_min_health && total_revenue > config.vip_min_revenue {
        CustomerType::Vip
    } else if health >= config.active_min_health {
        CustomerType::Active
    } else if health <= config.at_risk_max_health {
        CustomerType::AtRisk
    } else {
        CustomerType::Lead
    }
}

/// Revenue tier. Lower bounds are inclusive.
pub fn tier(total_revenue: Money, config: &ClassificationConfig) -> Tier {
    if total_revenue >= config.platinum_min_revenue {
        Tier::Platinum
    } else if total_revenue >= config.gold_min_revenue {
        Tier::Gold
    } else if total_revenue >= config.silver_min_revenue {
        Tier::Silver
    } else {
        Tier::Bronze
    }
}

/// Sentiment blends feedback ratios, pain-point load, and the two composite
/// scores into one signed value, then thresholds it.
pub fn sentiment(
    facts: &CustomerFacts,
    health: u8,
    churn: u8,
    config: &SentimentConfig,
) -> Sentiment {
    let positive_ratio = facts.positive_feedback_ratio().unwrap_or(0.0);
    let negative_ratio = facts.negative_feedback_ratio().unwrap_or(0.0);

    let score = config.positive_ratio_weight * positive_ratio
        - config.negative_ratio_weight * negative_ratio
        - config.pain_point_weight * facts.pain_points.len() as f64
        + config.health_weight * (f64::from(health) - config.health_midpoint)
        - config.churn_weight * f64::from(churn);

    if score > config.positive_threshold {
        Sentiment::Positive
    } else if score < config.negative_threshold {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
