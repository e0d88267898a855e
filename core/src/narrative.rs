//! JTBD narrative assembly.
//!
//! Three stages, composed in order and never reordered:
//!   1. base sentence keyed by (customer type, tier)
//!   2. optional pain-point clause — first matching keyword category wins
//!   3. optional satisfaction sentence from the positive-feedback share
//!
//! The copy is template text; the composition policy is the contract.

use crate::{
    facts::CustomerFacts,
    profile::{CustomerType, Tier},
};

/// Keyword categories probed against the PRIMARY pain point only, in this
/// order. Matching is case-insensitive substring search.
const PAIN_CLAUSES: &[(&[&str], &str)] = &[
    (
        &["integration", "connect"],
        "while struggling to connect us with the rest of their tooling",
    ),
    (
        &["support", "help"],
        "while needing faster, more reliable support when things break",
    ),
    (
        &["efficiency", "time"],
        "while trying to claw back time lost to manual work",
    ),
    (
        &["cost", "budget"],
        "while under pressure to justify every unit of spend",
    ),
];

fn base_sentence(customer_type: CustomerType, tier: Tier) -> &'static str {
    match (customer_type, tier) {
        (CustomerType::Vip, Tier::Platinum) => {
            "Runs mission-critical operations on us and expects a strategic partner, not a vendor"
        }
        (CustomerType::Vip, _) => {
            "Has made us central to how they operate and expects priority treatment in return"
        }
        (CustomerType::Active, Tier::Platinum | Tier::Gold) => {
            "Buys consistently at meaningful volume and wants that momentum protected"
        }
        (CustomerType::Active, _) => {
            "Purchases regularly and is looking for reasons to deepen the relationship"
        }
        (CustomerType::AtRisk, Tier::Platinum | Tier::Gold) => {
            "Once bought heavily but is drifting away and needs a concrete reason to stay"
        }
        (CustomerType::AtRisk, _) => {
            "Is disengaging and will quietly leave unless something changes"
        }
        (CustomerType::Lead, Tier::Silver | Tier::Gold | Tier::Platinum) => {
            "Has real spend history but no settled buying rhythm yet"
        }
        (CustomerType::Lead, Tier::Bronze) => {
            "Is still deciding whether we solve their problem at all"
        }
    }
}

fn pain_clause(facts: &CustomerFacts) -> Option<&'static str> {
    let primary = facts.primary_pain_point()?.to_lowercase();
    PAIN_CLAUSES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| primary.contains(k)))
        .map(|(_, clause)| *clause)
}

fn satisfaction_sentence(facts: &CustomerFacts) -> Option<&'static str> {
    let ratio = facts.positive_feedback_ratio()?;
    Some(if ratio > 0.8 {
        "Recent feedback is strongly positive."
    } else if ratio > 0.6 {
        "Recent feedback leans positive."
    } else {
        "Recent feedback signals unresolved friction."
    })
}

/// Assemble the narrative: base, then pain clause, then satisfaction.
/// Unmatched pain points and empty feedback histories add no clause.
pub fn jtbd(customer_type: CustomerType, tier: Tier, facts: &CustomerFacts) -> String {
    let mut narrative = base_sentence(customer_type, tier).to_string();

    if let Some(clause) = pain_clause(facts) {
        narrative.push(' ');
        narrative.push_str(clause);
    }
    narrative.push('.');

    if let Some(sentence) = satisfaction_sentence(facts) {
        narrative.push(' ');
        narrative.push_str(sentence);
    }

    narrative
}
