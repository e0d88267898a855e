//! Deterministic synthetic customer population.
//!
//! RULE: sample generation never touches a platform RNG. Everything flows
//! through a single seeded PCG stream, so the same seed always produces the
//! same population — tests and demo runs are fully reproducible.

use crate::{
    clock::Clock,
    error::CrmResult,
    facts::{CustomerFacts, FeedbackEntry, FeedbackKind},
    store::{CrmStore, CustomerRecord},
};
use chrono::Duration;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Seeded RNG with the handful of draws population generation needs.
pub struct SampleRng {
    inner: Pcg64Mcg,
}

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Sample from a simplified Pareto distribution.
    pub fn pareto(&mut self, x_min: f64, alpha: f64) -> f64 {
        let u = self.next_f64().max(1e-10);
        x_min * u.powf(-1.0 / alpha)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.next_u64_below(items.len() as u64) as usize]
    }
}

/// One generated customer: the record plus each raw fact row, ready to be
/// inserted or scored directly.
#[derive(Debug, Clone)]
pub struct SampleCustomer {
    pub record:    CustomerRecord,
    pub purchases: Vec<(String, chrono::NaiveDate, f64)>,
    pub facts:     CustomerFacts,
}

const FIRST_NAMES: &[&str] = &[
    "James", "Maria", "Wei", "Aisha", "Daniel", "Sofia", "Raj", "Elena", "Tomas", "Yuki",
    "Ahmed", "Linda", "Carlos", "Priya", "Jonas", "Fatima", "Viktor", "Hana", "Diego", "Ingrid",
    "Kofi", "Nadia", "Pavel", "Rosa", "Omar", "Grace", "Lucas", "Mei", "Stefan", "Amara",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Garcia", "Chen", "Okafor", "Johnson", "Rossi", "Patel", "Novak", "Silva", "Tanaka",
    "Hassan", "Brown", "Lopez", "Sharma", "Berg", "Rahman", "Petrov", "Kim", "Morales", "Larsen",
    "Mensah", "Haddad", "Kovac", "Ferreira", "Ali", "Wilson", "Costa", "Liu", "Weber", "Diallo",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Premier", "Metro", "Coastal", "United", "Prime", "Global", "Central", "Apex", "Summit",
    "Vertex",
];

const COMPANY_INDUSTRIES: &[&str] = &[
    "Logistics", "Retail", "Manufacturing", "Hospitality", "Construction", "Media", "Textiles",
    "Foods", "Electronics", "Pharma",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Group", "Holdings", "Partners", "Industries", "Trading", "Solutions", "Co",
];

/// Pain points are phrased so some hit the narrative keyword categories and
/// some deliberately miss all of them.
const PAIN_POINTS: &[&str] = &[
    "Integration with our ERP keeps breaking",
    "Hard to connect the product to our data warehouse",
    "Support tickets take too long to resolve",
    "Need help onboarding new team members",
    "Too much time spent on manual reconciliation",
    "Efficiency of the reporting workflow is poor",
    "Cost per seat is hard to justify to finance",
    "Budget reviews flag the renewal every quarter",
    "Feature requests disappear into a black hole",
    "Mobile experience lags behind the desktop app",
];

const POSITIVE_COMMENTS: &[&str] = &[
    "Rollout went smoother than expected",
    "The account team is responsive and sharp",
    "Latest release fixed our biggest blocker",
];

const NEGATIVE_COMMENTS: &[&str] = &[
    "Still waiting on the fix promised last quarter",
    "Renewal pricing caught us off guard",
    "Downtime last month hurt our close process",
];

const NEUTRAL_COMMENTS: &[&str] = &[
    "Evaluating how the new module fits our workflow",
    "No major issues, no major wins either",
];

const FEEDBACK_CATEGORIES: &[&str] = &["product", "support", "billing", "onboarding"];

/// Generate `count` synthetic customers anchored at the clock's as-of date.
pub fn generate(seed: u64, count: usize, clock: Clock) -> Vec<SampleCustomer> {
    let mut rng = SampleRng::new(seed);
    let as_of = clock.as_of();

    (0..count)
        .map(|i| {
            let customer_id = format!("c-{i:06}");
            let name = format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES));
            let company = format!(
                "{} {} {}",
                rng.pick(COMPANY_PREFIXES),
                rng.pick(COMPANY_INDUSTRIES),
                rng.pick(COMPANY_SUFFIXES),
            );
            let created_date = as_of - Duration::days(30 + rng.next_u64_below(1000) as i64);

            // Purchase history: a slice of the population never converted,
            // the rest follow a long-tailed order-value distribution.
            let purchase_count = if rng.chance(0.15) {
                0
            } else {
                1 + rng.next_u64_below(14) as u32
            };

            let mut purchases = Vec::with_capacity(purchase_count as usize);
            let mut last_purchase = None;
            let mut total_revenue = 0.0;
            for p in 0..purchase_count {
                let days_ago = rng.next_u64_below(400) as i64;
                let date = as_of - Duration::days(days_ago);
                let amount = rng.pareto(250_000.0, 1.1).min(40_000_000.0).round();
                total_revenue += amount;
                if last_purchase.map_or(true, |d| date > d) {
                    last_purchase = Some(date);
                }
                purchases.push((format!("{customer_id}-p{p:03}"), date, amount));
            }

            let avg_order_value = if purchase_count > 0 {
                total_revenue / f64::from(purchase_count)
            } else {
                0.0
            };

            let pain_point_count = rng.next_u64_below(3) as usize;
            let mut pain_points = Vec::with_capacity(pain_point_count);
            for _ in 0..pain_point_count {
                let candidate = rng.pick(PAIN_POINTS).to_string();
                if !pain_points.contains(&candidate) {
                    pain_points.push(candidate);
                }
            }

            let feedback_count = rng.next_u64_below(6) as usize;
            let feedback = (0..feedback_count)
                .map(|_| {
                    let roll = rng.next_f64();
                    let (kind, comment) = if roll < 0.5 {
                        (FeedbackKind::Positive, rng.pick(POSITIVE_COMMENTS))
                    } else if roll < 0.8 {
                        (FeedbackKind::Negative, rng.pick(NEGATIVE_COMMENTS))
                    } else {
                        (FeedbackKind::Neutral, rng.pick(NEUTRAL_COMMENTS))
                    };
                    FeedbackEntry {
                        kind,
                        date: as_of - Duration::days(rng.next_u64_below(365) as i64),
                        comment: comment.to_string(),
                        category: rng.pick(FEEDBACK_CATEGORIES).to_string(),
                    }
                })
                .collect();

            SampleCustomer {
                record: CustomerRecord {
                    customer_id,
                    name,
                    company,
                    created_date,
                    jtbd: None,
                    sentiment: None,
                },
                purchases,
                facts: CustomerFacts {
                    purchase_count,
                    last_purchase,
                    total_revenue,
                    avg_order_value,
                    pain_points,
                    feedback,
                },
            }
        })
        .collect()
}

/// Insert a generated population into a migrated store.
pub fn seed_store(store: &CrmStore, population: &[SampleCustomer]) -> CrmResult<()> {
    for customer in population {
        store.insert_customer(&customer.record)?;
        for (purchase_id, date, amount) in &customer.purchases {
            store.insert_purchase(purchase_id, &customer.record.customer_id, *date, *amount)?;
        }
        store.set_pain_points(&customer.record.customer_id, &customer.facts.pain_points)?;
        for (i, entry) in customer.facts.feedback.iter().enumerate() {
            let feedback_id = format!("{}-f{i:03}", customer.record.customer_id);
            store.insert_feedback(&feedback_id, &customer.record.customer_id, entry)?;
        }
    }
    log::info!("seeded {} synthetic customers", population.len());
    Ok(())
}
