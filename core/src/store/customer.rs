use super::CrmStore;
use crate::{
    error::{CrmError, CrmResult},
    facts::{CustomerFacts, FeedbackEntry, FeedbackKind},
    types::Money,
};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

/// The authoritative customer row. Derived fields written back onto it
/// (jtbd, sentiment) are convenience copies, refreshed on each rescore.
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub customer_id:  String,
    pub name:         String,
    pub company:      String,
    pub created_date: NaiveDate,
    pub jtbd:         Option<String>,
    pub sentiment:    Option<String>,
}

impl CrmStore {
    // ── Customer ──────────────────────────────────────────────────

    pub fn insert_customer(&self, c: &CustomerRecord) -> CrmResult<()> {
        self.conn.execute(
            "INSERT INTO customer (customer_id, name, company, created_date, jtbd, sentiment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &c.customer_id,
                &c.name,
                &c.company,
                c.created_date.to_string(),
                &c.jtbd,
                &c.sentiment,
            ],
        )?;
        Ok(())
    }

    pub fn get_customer(&self, customer_id: &str) -> CrmResult<CustomerRecord> {
        self.conn
            .query_row(
                "SELECT customer_id, name, company, created_date, jtbd, sentiment
                 FROM customer WHERE customer_id = ?1",
                params![customer_id],
                |row| {
                    Ok(CustomerRecord {
                        customer_id: row.get(0)?,
                        name: row.get(1)?,
                        company: row.get(2)?,
                        created_date: parse_date(&row.get::<_, String>(3)?),
                        jtbd: row.get(4)?,
                        sentiment: row.get(5)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| CrmError::CustomerNotFound {
                id: customer_id.to_string(),
            })
    }

    pub fn customer_ids(&self) -> CrmResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT customer_id FROM customer ORDER BY customer_id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn customer_count(&self) -> CrmResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// Write the derived narrative fields back onto the customer row.
    /// This is the only derived state the customer record carries.
    pub fn update_customer_narrative(
        &self,
        customer_id: &str,
        jtbd: &str,
        sentiment: &str,
    ) -> CrmResult<()> {
        let updated = self.conn.execute(
            "UPDATE customer SET jtbd = ?1, sentiment = ?2 WHERE customer_id = ?3",
            params![jtbd, sentiment, customer_id],
        )?;
        if updated == 0 {
            return Err(CrmError::CustomerNotFound {
                id: customer_id.to_string(),
            });
        }
        Ok(())
    }

    // ── Purchases ─────────────────────────────────────────────────

    pub fn insert_purchase(
        &self,
        purchase_id: &str,
        customer_id: &str,
        purchase_date: NaiveDate,
        amount: Money,
    ) -> CrmResult<()> {
        self.conn.execute(
            "INSERT INTO purchase (purchase_id, customer_id, purchase_date, amount)
             VALUES (?1, ?2, ?3, ?4)",
            params![purchase_id, customer_id, purchase_date.to_string(), amount],
        )?;
        Ok(())
    }

    // ── Feedback ──────────────────────────────────────────────────

    pub fn insert_feedback(
        &self,
        feedback_id: &str,
        customer_id: &str,
        entry: &FeedbackEntry,
    ) -> CrmResult<()> {
        self.conn.execute(
            "INSERT INTO feedback (feedback_id, customer_id, kind, feedback_date, comment, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                feedback_id,
                customer_id,
                entry.kind.as_str(),
                entry.date.to_string(),
                &entry.comment,
                &entry.category,
            ],
        )?;
        Ok(())
    }

    // ── Pain points ───────────────────────────────────────────────

    /// Replace the customer's pain-point list. Position 0 is primary.
    pub fn set_pain_points(&self, customer_id: &str, pain_points: &[String]) -> CrmResult<()> {
        self.conn.execute(
            "DELETE FROM pain_point WHERE customer_id = ?1",
            params![customer_id],
        )?;
        for (position, description) in pain_points.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO pain_point (customer_id, position, description)
                 VALUES (?1, ?2, ?3)",
                params![customer_id, position as i64, description],
            )?;
        }
        Ok(())
    }

    // ── Facts aggregation ─────────────────────────────────────────

    /// Aggregate everything the scoring engine needs for one customer.
    pub fn customer_facts(&self, customer_id: &str) -> CrmResult<CustomerFacts> {
        // Existence check first so a missing customer is an error, not
        // an empty fact set.
        self.get_customer(customer_id)?;

        let (purchase_count, last_purchase, total_revenue) = self.conn.query_row(
            "SELECT COUNT(*), MAX(purchase_date), COALESCE(SUM(amount), 0)
             FROM purchase WHERE customer_id = ?1",
            params![customer_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            },
        )?;

        let purchase_count = purchase_count.max(0) as u32;
        let avg_order_value = if purchase_count > 0 {
            total_revenue / f64::from(purchase_count)
        } else {
            0.0
        };

        let mut stmt = self.conn.prepare(
            "SELECT description FROM pain_point
             WHERE customer_id = ?1 ORDER BY position",
        )?;
        let pain_points = stmt
            .query_map(params![customer_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT kind, feedback_date, comment, category FROM feedback
             WHERE customer_id = ?1 ORDER BY feedback_date",
        )?;
        let feedback = stmt
            .query_map(params![customer_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(kind, date, comment, category)| FeedbackEntry {
                // CHECK constraint keeps kinds valid; Neutral is the
                // defensive fallback, not a reachable branch.
                kind: FeedbackKind::parse(&kind).unwrap_or(FeedbackKind::Neutral),
                date: parse_date(&date),
                comment,
                category,
            })
            .collect();

        Ok(CustomerFacts {
            purchase_count,
            last_purchase: last_purchase.and_then(|d| d.parse().ok()),
            total_revenue,
            avg_order_value,
            pain_points,
            feedback,
        })
    }
}

/// Dates are stored as ISO-8601 text by this store. A row that fails to
/// parse is malformed input, mapped to the epoch rather than failing the
/// whole read; the nullable last-purchase date maps to None instead.
fn parse_date(s: &str) -> NaiveDate {
    s.parse().unwrap_or_default()
}
