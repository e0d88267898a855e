use super::CrmStore;
use crate::{error::CrmResult, profile::DerivedProfile};
use chrono::NaiveDate;
use rusqlite::params;

impl CrmStore {
    // ── Profile history ───────────────────────────────────────────

    /// Record one derivation. History rows are audit output only; they are
    /// never read back into scoring.
    pub fn insert_profile(
        &self,
        batch_id: &str,
        customer_id: &str,
        as_of: NaiveDate,
        profile: &DerivedProfile,
    ) -> CrmResult<()> {
        self.conn.execute(
            "INSERT INTO profile_history (
                batch_id, customer_id, as_of, health_score, churn_risk,
                upsell_potential, customer_type, tier, sentiment,
                acceptance_probability, estimated_next_purchase_value
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                batch_id,
                customer_id,
                as_of.to_string(),
                i64::from(profile.health_score),
                i64::from(profile.churn_risk),
                i64::from(profile.upsell_potential),
                profile.customer_type.as_str(),
                profile.tier.as_str(),
                profile.sentiment.as_str(),
                i64::from(profile.acceptance_probability),
                profile.estimated_next_purchase_value,
            ],
        )?;
        Ok(())
    }

    pub fn profile_count(&self) -> CrmResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM profile_history", [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn profile_count_for_batch(&self, batch_id: &str) -> CrmResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM profile_history WHERE batch_id = ?1",
                params![batch_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}
