//! Payroll Calculation and Posting Core
//!
//! This crate turns raw compensation records, work records, and configured
//! statutory rules into an auditable pay result and a balanced general-ledger
//! journal. It covers proration of partial-period pay, multi-source
//! compensation aggregation across pay frequencies, statutory deduction
//! calculation (including cumulative progressive tax with year-to-date
//! carry-forward), and GL posting-rule resolution over a configurable
//! dimensional chart of accounts.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;
