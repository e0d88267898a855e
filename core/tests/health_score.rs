//! Health score bands, the base offset, clamping, and monotonicity.

use chrono::{Duration, NaiveDate};
use crm_core::{
    clock::Clock,
    config::HealthConfig,
    facts::CustomerFacts,
    scoring::health_score,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn facts(purchase_count: u32, days_ago: Option<i64>, total_revenue: f64) -> CustomerFacts {
    CustomerFacts {
        purchase_count,
        last_purchase: days_ago.map(|d| as_of() - Duration::days(d)),
        total_revenue,
        avg_order_value: 0.0,
        pain_points: vec![],
        feedback: vec![],
    }
}

fn score(f: &CustomerFacts) -> u8 {
    let clock = Clock::fixed(as_of());
    health_score(f, clock.days_since(f.last_purchase), &HealthConfig::default()).score
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// A customer with zero history lands exactly on the base offset.
#[test]
fn zero_history_lands_on_base_offset() {
    assert_eq!(score(&facts(0, None, 0.0)), 50);
}

/// Frequency points step at 1, 2, 5 and 10 purchases.
#[test]
fn frequency_bands_step_correctly() {
    assert_eq!(score(&facts(1, None, 0.0)), 55);
    assert_eq!(score(&facts(2, None, 0.0)), 60);
    assert_eq!(score(&facts(4, None, 0.0)), 60);
    assert_eq!(score(&facts(5, None, 0.0)), 70);
    assert_eq!(score(&facts(9, None, 0.0)), 70);
    assert_eq!(score(&facts(10, None, 0.0)), 80);
}

/// Recency points step at 7, 30, 90 and 180 days, then fall to zero.
#[test]
fn recency_bands_step_correctly() {
    assert_eq!(score(&facts(0, Some(7), 0.0)), 90);
    assert_eq!(score(&facts(0, Some(8), 0.0)), 80);
    assert_eq!(score(&facts(0, Some(30), 0.0)), 80);
    assert_eq!(score(&facts(0, Some(90), 0.0)), 70);
    assert_eq!(score(&facts(0, Some(180), 0.0)), 60);
    assert_eq!(score(&facts(0, Some(181), 0.0)), 50);
}

/// Revenue points: zero revenue contributes nothing; any positive revenue
/// contributes at least 5; the breakpoints step up to 30.
#[test]
fn revenue_bands_step_correctly() {
    assert_eq!(score(&facts(0, None, 0.0)), 50);
    assert_eq!(score(&facts(0, None, 100_000.0)), 55);
    assert_eq!(score(&facts(0, None, 500_000.0)), 60);
    assert_eq!(score(&facts(0, None, 1_000_000.0)), 65);
    assert_eq!(score(&facts(0, None, 5_000_000.0)), 70);
    assert_eq!(score(&facts(0, None, 10_000_000.0)), 75);
    assert_eq!(score(&facts(0, None, 50_000_000.0)), 80);
}

/// The sum is clamped to 100 after all contributions.
#[test]
fn health_clamps_at_100() {
    // 50 + 30 + 40 + 30 = 150 before the clamp.
    assert_eq!(score(&facts(12, Some(3), 60_000_000.0)), 100);
}

/// A future-dated purchase is malformed input and takes the no-date branch.
#[test]
fn future_purchase_date_contributes_nothing() {
    assert_eq!(score(&facts(0, Some(-10), 0.0)), 50);
}

/// Negative revenue is sanitized to the no-data branch by the engine's
/// sanitize step; the raw scoring function treats it as zero too.
#[test]
fn negative_revenue_contributes_nothing() {
    assert_eq!(score(&facts(0, None, -500.0)), 50);
}

/// More purchases never lowers the health score, everything else fixed.
#[test]
fn health_is_monotone_in_purchase_count() {
    let mut previous = 0;
    for count in 0..20 {
        let current = score(&facts(count, Some(45), 2_000_000.0));
        assert!(
            current >= previous,
            "health dropped from {previous} to {current} at count={count}"
        );
        previous = current;
    }
}

/// Component breakdown sums to the clamped score.
#[test]
fn breakdown_components_sum_to_score() {
    let f = facts(5, Some(20), 2_000_000.0);
    let clock = Clock::fixed(as_of());
    let health = health_score(&f, clock.days_since(f.last_purchase), &HealthConfig::default());

    let raw =
        health.base_offset + health.frequency_points + health.recency_points + health.revenue_points;
    assert_eq!(i64::from(health.score), raw.clamp(0, 100));
    assert_eq!(health.frequency_points, 20);
    assert_eq!(health.recency_points, 30);
    assert_eq!(health.revenue_points, 15);
}
