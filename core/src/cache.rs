//! Read-through facts cache.
//!
//! Sits in front of CrmStore so repeated derivations for the same customer
//! do not re-aggregate purchase history. Invalidation is explicit: writers
//! call invalidate() (or go through write_narrative(), which does it for
//! them). There is no TTL — a stale entry lives until someone invalidates.

use crate::{error::CrmResult, facts::CustomerFacts, store::CrmStore, types::CustomerId};
use std::collections::HashMap;

pub struct FactsCache {
    store:   CrmStore,
    entries: HashMap<CustomerId, CustomerFacts>,
    hits:    u64,
    misses:  u64,
}

impl FactsCache {
    pub fn new(store: CrmStore) -> Self {
        Self {
            store,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn store(&self) -> &CrmStore {
        &self.store
    }

    /// Facts for one customer, loading from the store on a miss.
    pub fn facts(&mut self, customer_id: &str) -> CrmResult<CustomerFacts> {
        if let Some(facts) = self.entries.get(customer_id) {
            self.hits += 1;
            log::debug!("facts cache hit: {customer_id}");
            return Ok(facts.clone());
        }

        self.misses += 1;
        log::debug!("facts cache miss: {customer_id}");
        let facts = self.store.customer_facts(customer_id)?;
        self.entries
            .insert(customer_id.to_string(), facts.clone());
        Ok(facts)
    }

    /// Persist derived narrative fields and drop the cached entry for that
    /// customer so the next read reflects the write.
    pub fn write_narrative(
        &mut self,
        customer_id: &str,
        jtbd: &str,
        sentiment: &str,
    ) -> CrmResult<()> {
        self.store
            .update_customer_narrative(customer_id, jtbd, sentiment)?;
        self.invalidate(customer_id);
        Ok(())
    }

    pub fn invalidate(&mut self, customer_id: &str) {
        self.entries.remove(customer_id);
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.entries.len()
    }

    /// (hits, misses) since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
