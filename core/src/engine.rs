//! The profile engine — the one operation this crate exposes to callers.
//!
//! EVALUATION ORDER (fixed, documented, never reordered):
//!   1. Sanitize facts
//!   2. Health score
//!   3. Churn risk          (reads health)
//!   4. Upsell potential    (reads health)
//!   5. Customer type, tier
//!   6. Sentiment           (reads health AND churn)
//!   7. Narrative, recommendations
//!
//! RULES:
//!   - No I/O, no randomness, no mutable state. Same facts, same profile.
//!   - The engine never throws for business-level input; malformed values
//!     take their no-data branch.

use crate::{
    classify,
    clock::Clock,
    config::ScoringConfig,
    facts::CustomerFacts,
    narrative,
    profile::DerivedProfile,
    recommend,
    scoring::{self, ChurnScore, HealthScore, UpsellScore},
};

pub struct ProfileEngine {
    config: ScoringConfig,
    clock:  Clock,
}

/// A derivation with its component breakdowns, for callers that need to
/// explain a score rather than just display it.
#[derive(Debug, Clone)]
pub struct ProfileBreakdown {
    pub profile: DerivedProfile,
    pub health:  HealthScore,
    pub churn:   ChurnScore,
    pub upsell:  UpsellScore,
}

impl ProfileEngine {
    pub fn new(config: ScoringConfig, clock: Clock) -> Self {
        Self { config, clock }
    }

    /// Engine with the shipped threshold tables.
    pub fn with_defaults(clock: Clock) -> Self {
        Self::new(ScoringConfig::default(), clock)
    }

    /// Derive the full profile for one customer.
    pub fn derive_profile(&self, facts: &CustomerFacts) -> DerivedProfile {
        self.derive_breakdown(facts).profile
    }

    /// Derive the profile along with every component contribution.
    pub fn derive_breakdown(&self, facts: &CustomerFacts) -> ProfileBreakdown {
        let facts = facts.sanitized();
        let days_since = self.clock.days_since(facts.last_purchase);

        let health = scoring::health_score(&facts, days_since, &self.config.health);
        let churn = scoring::churn_risk(health.score, &facts, days_since, &self.config.churn);
        let upsell = scoring::upsell_potential(health.score, &facts, &self.config.upsell);

        let customer_type =
            classify::customer_type(health.score, facts.total_revenue, &self.config.classification);
        let tier = classify::tier(facts.total_revenue, &self.config.classification);
        let sentiment =
            classify::sentiment(&facts, health.score, churn.score, &self.config.sentiment);

        let jtbd = narrative::jtbd(customer_type, tier, &facts);

        let rec = recommend::recommendations(
            tier,
            health.score,
            churn.score,
            upsell.score,
            facts.purchase_count,
            days_since,
            facts.avg_order_value,
            facts.total_revenue,
            &self.config.recommendation,
        );

        log::debug!(
            "derived profile: health={} churn={} upsell={} type={} tier={}",
            health.score,
            churn.score,
            upsell.score,
            customer_type.as_str(),
            tier.as_str(),
        );

        ProfileBreakdown {
            profile: DerivedProfile {
                health_score: health.score,
                churn_risk: churn.score,
                upsell_potential: upsell.score,
                customer_type,
                tier,
                sentiment,
                jtbd,
                next_purchase_timeframe: rec.next_purchase_timeframe,
                suggested_next_product: rec.suggested_next_product,
                estimated_next_purchase_value: rec.estimated_next_purchase_value,
                cross_sell_suggestion: rec.cross_sell_suggestion,
                acceptance_probability: rec.acceptance_probability,
            },
            health,
            churn,
            upsell,
        }
    }
}
