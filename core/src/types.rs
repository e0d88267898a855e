//! Shared primitive types used across the entire crate.

/// A stable, unique identifier for a customer record.
pub type CustomerId = String;

/// A monetary magnitude in minor units of the operating currency.
/// The engine treats money as a plain magnitude; it never formats it.
pub type Money = f64;

/// A whole number of calendar days.
pub type Days = i64;
