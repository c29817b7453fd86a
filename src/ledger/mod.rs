//! General-ledger posting engine.
//!
//! This module turns the named totals of a completed pay calculation into
//! a balanced journal batch: mapping resolution with per-type fallback
//! chains, prioritized override rules, and dimensional GL string
//! composition over the configured chart of accounts.

mod composition;
mod overrides;
mod posting;

pub use composition::compose_gl_string;
pub use overrides::{PostingContext, find_matching_rule};
pub use posting::{PostingTotals, post_journal};
