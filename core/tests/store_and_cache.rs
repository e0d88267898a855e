//! Record store round trips, facts aggregation, narrative write-back, and
//! read-through cache behavior.

use chrono::NaiveDate;
use crm_core::{
    cache::FactsCache,
    clock::Clock,
    engine::ProfileEngine,
    error::CrmError,
    facts::{FeedbackEntry, FeedbackKind},
    sample,
    store::{CrmStore, CustomerRecord},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store() -> CrmStore {
    let store = CrmStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

fn customer(id: &str) -> CustomerRecord {
    CustomerRecord {
        customer_id: id.to_string(),
        name: "Maria Chen".to_string(),
        company: "Coastal Foods Group".to_string(),
        created_date: date(2024, 1, 15),
        jtbd: None,
        sentiment: None,
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

/// Facts aggregation: count, most recent date, sum and mean of amounts,
/// ordered pain points, feedback rows.
#[test]
fn facts_aggregate_purchase_history() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();
    store
        .insert_purchase("p-1", "c-1", date(2026, 1, 10), 1_000_000.0)
        .unwrap();
    store
        .insert_purchase("p-2", "c-1", date(2026, 4, 2), 3_000_000.0)
        .unwrap();
    store
        .set_pain_points(
            "c-1",
            &["integration gaps".to_string(), "support delays".to_string()],
        )
        .unwrap();
    store
        .insert_feedback(
            "f-1",
            "c-1",
            &FeedbackEntry {
                kind: FeedbackKind::Positive,
                date: date(2026, 4, 5),
                comment: "smooth rollout".to_string(),
                category: "product".to_string(),
            },
        )
        .unwrap();

    let facts = store.customer_facts("c-1").unwrap();
    assert_eq!(facts.purchase_count, 2);
    assert_eq!(facts.last_purchase, Some(date(2026, 4, 2)));
    assert_eq!(facts.total_revenue, 4_000_000.0);
    assert_eq!(facts.avg_order_value, 2_000_000.0);
    assert_eq!(facts.pain_points[0], "integration gaps");
    assert_eq!(facts.feedback.len(), 1);
    assert_eq!(facts.feedback[0].kind, FeedbackKind::Positive);
}

/// A customer with no purchases aggregates to the empty fact set, not an
/// error.
#[test]
fn facts_for_customer_without_purchases() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();

    let facts = store.customer_facts("c-1").unwrap();
    assert_eq!(facts.purchase_count, 0);
    assert!(facts.last_purchase.is_none());
    assert_eq!(facts.total_revenue, 0.0);
    assert_eq!(facts.avg_order_value, 0.0);
}

/// An unknown customer is CustomerNotFound, not an empty fact set.
#[test]
fn unknown_customer_is_not_found() {
    let err = store().customer_facts("missing").unwrap_err();
    assert!(matches!(err, CrmError::CustomerNotFound { .. }));
}

/// Narrative write-back lands on the customer row.
#[test]
fn narrative_write_back_round_trips() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();
    store
        .update_customer_narrative("c-1", "Needs a dependable partner.", "positive")
        .unwrap();

    let record = store.get_customer("c-1").unwrap();
    assert_eq!(record.jtbd.as_deref(), Some("Needs a dependable partner."));
    assert_eq!(record.sentiment.as_deref(), Some("positive"));
}

/// Profile history rows accumulate per batch.
#[test]
fn profile_history_accumulates() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();

    let engine = ProfileEngine::with_defaults(Clock::fixed(as_of()));
    let facts = store.customer_facts("c-1").unwrap();
    let profile = engine.derive_profile(&facts);

    store
        .insert_profile("batch-a", "c-1", as_of(), &profile)
        .unwrap();
    store
        .insert_profile("batch-b", "c-1", as_of(), &profile)
        .unwrap();

    assert_eq!(store.profile_count().unwrap(), 2);
    assert_eq!(store.profile_count_for_batch("batch-a").unwrap(), 1);
}

/// Seeding a generated population round-trips through facts aggregation.
#[test]
fn seeded_population_round_trips() {
    let store = store();
    let population = sample::generate(42, 25, Clock::fixed(as_of()));
    sample::seed_store(&store, &population).unwrap();

    assert_eq!(store.customer_count().unwrap(), 25);

    for customer in &population {
        let facts = store.customer_facts(&customer.record.customer_id).unwrap();
        assert_eq!(facts.purchase_count, customer.facts.purchase_count);
        assert_eq!(facts.last_purchase, customer.facts.last_purchase);
        assert_eq!(facts.pain_points, customer.facts.pain_points);
        assert_eq!(facts.feedback.len(), customer.facts.feedback.len());
    }
}

// ── Cache ────────────────────────────────────────────────────────────────────

/// First read misses and loads from the store; the second read hits.
#[test]
fn cache_reads_through_once() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();

    let mut cache = FactsCache::new(store);
    cache.facts("c-1").unwrap();
    cache.facts("c-1").unwrap();

    assert_eq!(cache.stats(), (1, 1));
    assert_eq!(cache.cached_len(), 1);
}

/// Invalidation forces the next read back to the store.
#[test]
fn invalidation_forces_reload() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();

    let mut cache = FactsCache::new(store);
    cache.facts("c-1").unwrap();
    cache.invalidate("c-1");
    cache.facts("c-1").unwrap();

    assert_eq!(cache.stats(), (0, 2));
}

/// A cached entry does not see new purchases until invalidated; the cache
/// is explicit, not magically coherent.
#[test]
fn stale_until_invalidated() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();

    let mut cache = FactsCache::new(store);
    assert_eq!(cache.facts("c-1").unwrap().purchase_count, 0);

    cache
        .store()
        .insert_purchase("p-1", "c-1", date(2026, 5, 1), 500_000.0)
        .unwrap();

    assert_eq!(cache.facts("c-1").unwrap().purchase_count, 0);
    cache.invalidate("c-1");
    assert_eq!(cache.facts("c-1").unwrap().purchase_count, 1);
}

/// invalidate_all drops every entry at once.
#[test]
fn invalidate_all_drops_everything() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();
    store.insert_customer(&customer("c-2")).unwrap();

    let mut cache = FactsCache::new(store);
    cache.facts("c-1").unwrap();
    cache.facts("c-2").unwrap();
    assert_eq!(cache.cached_len(), 2);

    cache.invalidate_all();
    assert_eq!(cache.cached_len(), 0);
}

/// Narrative write-back through the cache invalidates the entry.
#[test]
fn write_narrative_invalidates_entry() {
    let store = store();
    store.insert_customer(&customer("c-1")).unwrap();

    let mut cache = FactsCache::new(store);
    cache.facts("c-1").unwrap();
    cache
        .write_narrative("c-1", "Wants fewer surprises.", "neutral")
        .unwrap();

    assert_eq!(cache.cached_len(), 0);
    let record = cache.store().get_customer("c-1").unwrap();
    assert_eq!(record.sentiment.as_deref(), Some("neutral"));
}
