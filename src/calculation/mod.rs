//! Calculation logic for the payroll engine.
//!
//! This module contains the pure computational components: partial-period
//! proration, pay-frequency conversion, multi-source compensation
//! aggregation, and statutory deduction calculation. All functions here
//! operate on already-fetched in-memory data and perform no I/O.

mod aggregation;
mod frequency;
mod proration;
mod statutory;

pub use aggregation::{AggregationResult, aggregate_compensation};
pub use frequency::{annualize, convert_amount};
pub use proration::{ProrationResult, apply_proration, calculate_proration};
pub use statutory::{StatutoryResult, calculate_statutory_deductions};
