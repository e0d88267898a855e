//! Churn risk penalties, the zero-purchase double penalty, and monotonicity.

use chrono::{Duration, NaiveDate};
use crm_core::{
    clock::Clock,
    config::ChurnConfig,
    facts::CustomerFacts,
    scoring::churn_risk,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn facts(purchase_count: u32, days_ago: Option<i64>) -> CustomerFacts {
    CustomerFacts {
        purchase_count,
        last_purchase: days_ago.map(|d| as_of() - Duration::days(d)),
        ..CustomerFacts::default()
    }
}

fn risk(health: u8, f: &CustomerFacts) -> u8 {
    let clock = Clock::fixed(as_of());
    churn_risk(
        health,
        f,
        clock.days_since(f.last_purchase),
        &ChurnConfig::default(),
    )
    .score
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Health penalty steps at the 30, 50 and 70 health thresholds.
#[test]
fn health_penalty_bands() {
    let f = facts(3, Some(10)); // no inactivity or volume penalty
    assert_eq!(risk(29, &f), 50);
    assert_eq!(risk(30, &f), 30);
    assert_eq!(risk(49, &f), 30);
    assert_eq!(risk(50, &f), 10);
    assert_eq!(risk(69, &f), 10);
    assert_eq!(risk(70, &f), 0);
}

/// Inactivity penalty steps at 60, 90 and 180 days since last purchase.
#[test]
fn inactivity_penalty_bands() {
    assert_eq!(risk(80, &facts(3, Some(60))), 0);
    assert_eq!(risk(80, &facts(3, Some(61))), 15);
    assert_eq!(risk(80, &facts(3, Some(91))), 25);
    assert_eq!(risk(80, &facts(3, Some(181))), 40);
}

/// A customer who has never purchased takes BOTH the never-purchased
/// penalty (50) and the zero-volume penalty (10). The penalties stack.
#[test]
fn never_purchased_takes_both_penalties() {
    let breakdown = churn_risk(
        80,
        &facts(0, None),
        None,
        &ChurnConfig::default(),
    );
    assert_eq!(breakdown.inactivity_penalty, 50);
    assert_eq!(breakdown.low_volume_penalty, 10);
    assert_eq!(breakdown.score, 60);
}

/// A single purchase carries a smaller volume penalty.
#[test]
fn single_purchase_volume_penalty() {
    assert_eq!(risk(80, &facts(1, Some(10))), 5);
    assert_eq!(risk(80, &facts(2, Some(10))), 0);
}

/// Purchases exist but the date is unusable: inactivity is unmeasurable
/// and contributes nothing rather than erroring.
#[test]
fn missing_date_with_purchases_contributes_nothing() {
    assert_eq!(risk(80, &facts(3, None)), 0);
}

/// The sum of penalties is clamped to 100.
#[test]
fn churn_clamps_at_100() {
    // 50 (health < 30) + 50 (never purchased) + 10 (zero volume) = 110.
    assert_eq!(risk(10, &facts(0, None)), 100);
}

/// More days since the last purchase never lowers churn risk.
#[test]
fn churn_is_monotone_in_days_since_purchase() {
    let mut previous = 0;
    for days in 0..400 {
        let current = risk(80, &facts(3, Some(days)));
        assert!(
            current >= previous,
            "churn dropped from {previous} to {current} at days={days}"
        );
        previous = current;
    }
}
