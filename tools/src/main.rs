//! profile-runner: headless batch scorer for the CRM profile engine.
//!
//! Usage:
//!   profile-runner --seed 12345 --customers 200 --db crm.db
//!   profile-runner --db crm.db --as-of 2026-06-01 --config scoring.json
//!
//! With --seed the database is populated with a deterministic synthetic
//! population first; without it an existing database is scored as-is.

use anyhow::Result;
use chrono::NaiveDate;
use crm_core::{
    cache::FactsCache,
    clock::Clock,
    config::ScoringConfig,
    engine::ProfileEngine,
    profile::{CustomerType, Tier},
    sample,
    store::CrmStore,
};
use std::collections::BTreeMap;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let customers = parse_arg(&args, "--customers", 100usize);
    let seed = args
        .windows(2)
        .find(|w| w[0] == "--seed")
        .and_then(|w| w[1].parse::<u64>().ok());
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let as_of = args
        .windows(2)
        .find(|w| w[0] == "--as-of")
        .map(|w| w[1].parse::<NaiveDate>())
        .transpose()?;
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let clock = match as_of {
        Some(date) => Clock::fixed(date),
        None => Clock::today(),
    };

    let config = match config_path {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };

    let store = CrmStore::open(db)?;
    store.migrate()?;

    if let Some(seed) = seed {
        let population = sample::generate(seed, customers, clock);
        sample::seed_store(&store, &population)?;
        log::info!("seeded {customers} customers with seed {seed} into {db}");
    }

    let engine = ProfileEngine::new(config, clock);
    let batch_id = uuid::Uuid::new_v4().to_string();
    let ids = store.customer_ids()?;
    let mut cache = FactsCache::new(store);

    let mut type_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut tier_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut health_sum = 0u64;
    let mut churn_sum = 0u64;
    let mut at_risk: Vec<(String, u8)> = Vec::new();

    for customer_id in &ids {
        let facts = cache.facts(customer_id)?;
        let profile = engine.derive_profile(&facts);

        cache.write_narrative(customer_id, &profile.jtbd, profile.sentiment.as_str())?;
        cache
            .store()
            .insert_profile(&batch_id, customer_id, clock.as_of(), &profile)?;

        *type_counts.entry(profile.customer_type.as_str()).or_default() += 1;
        *tier_counts.entry(profile.tier.as_str()).or_default() += 1;
        health_sum += u64::from(profile.health_score);
        churn_sum += u64::from(profile.churn_risk);
        if profile.customer_type == CustomerType::AtRisk || profile.churn_risk >= 70 {
            at_risk.push((customer_id.clone(), profile.churn_risk));
        }

        log::debug!(
            "{customer_id}: health={} churn={} type={} tier={}",
            profile.health_score,
            profile.churn_risk,
            profile.customer_type.as_str(),
            profile.tier.as_str(),
        );
    }

    let scored = ids.len();
    log::info!("batch {batch_id}: scored {scored} customers");

    println!("batch:        {batch_id}");
    println!("as of:        {}", clock.as_of());
    println!("customers:    {scored}");
    if scored > 0 {
        println!("avg health:   {:.1}", health_sum as f64 / scored as f64);
        println!("avg churn:    {:.1}", churn_sum as f64 / scored as f64);
    }

    println!("\nby type:");
    for t in [
        CustomerType::Vip,
        CustomerType::Active,
        CustomerType::Lead,
        CustomerType::AtRisk,
    ] {
        println!(
            "  {:<10} {}",
            t.as_str(),
            type_counts.get(t.as_str()).copied().unwrap_or(0)
        );
    }

    println!("\nby tier:");
    for t in [Tier::Platinum, Tier::Gold, Tier::Silver, Tier::Bronze] {
        println!(
            "  {:<10} {}",
            t.as_str(),
            tier_counts.get(t.as_str()).copied().unwrap_or(0)
        );
    }

    if !at_risk.is_empty() {
        at_risk.sort_by(|a, b| b.1.cmp(&a.1));
        println!("\nhighest churn risk:");
        for (customer_id, churn) in at_risk.iter().take(10) {
            println!("  {customer_id}  churn={churn}");
        }
    }

    let (hits, misses) = cache.stats();
    log::debug!("facts cache: {hits} hits, {misses} misses");

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
