//! General-ledger configuration and journal models.
//!
//! These types describe the chart-of-accounts side of a payroll run: the
//! accounts themselves, the mappings from payroll concepts to accounts, the
//! dimensional segments that compose full GL strings, the prioritized
//! override rules that can redirect entries, and the journal batch the
//! posting engine emits.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ledger account in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GLAccount {
    /// Unique identifier for the account.
    pub id: String,
    /// The posting code (e.g. "5010").
    pub code: String,
    /// Human-readable account name.
    pub name: String,
}

/// Links a payroll concept (mapping type) to debit/credit accounts.
///
/// Either side may be unmapped; an entry whose direction has no account
/// configured is skipped rather than failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GLMapping {
    /// The payroll concept this mapping covers (e.g. "gross_pay").
    pub mapping_type: String,
    /// Account to debit for this concept, if configured.
    #[serde(default)]
    pub debit_account_id: Option<String>,
    /// Account to credit for this concept, if configured.
    #[serde(default)]
    pub credit_account_id: Option<String>,
    /// Rank among mappings of the same type; highest wins.
    #[serde(default)]
    pub priority: i32,
}

/// One dimension of the composed GL string (e.g. company, department).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GLSegment {
    /// Stable code identifying the segment (e.g. "department").
    pub code: String,
    /// Human-readable segment name.
    pub name: String,
    /// Position of this segment within the composed string.
    pub segment_order: u32,
    /// Inactive segments are excluded from composition.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Comparison operator for an override-rule condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// Always matches, regardless of the dimension value.
    Any,
    /// Matches when the context dimension equals the condition value.
    Equals,
    /// Matches when the context dimension differs from the condition value.
    NotEquals,
}

/// A single AND-condition of an override rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideCondition {
    /// The context dimension inspected (e.g. "mapping_type", "department").
    pub dimension: String,
    /// How the dimension is compared.
    pub operator: ConditionOperator,
    /// The value compared against; unused for the `any` operator.
    #[serde(default)]
    pub value: Option<String>,
}

/// What a matching override rule does to the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum OverrideTarget {
    /// Post to a different account entirely.
    ReplaceAccount {
        /// The replacement account's id.
        account_id: String,
    },
    /// Use the given GL string verbatim, skipping composition.
    ReplaceFullString {
        /// The literal GL string to emit.
        gl_string: String,
    },
    /// Overlay segment values onto the dimensional template before composing.
    SegmentOverrides {
        /// Segment code to replacement value.
        segments: BTreeMap<String, String>,
    },
}

/// A prioritized, conditional redirect for journal entries.
///
/// Rules are evaluated highest priority first among candidates whose
/// direction flag matches the entry; the first rule whose conditions all
/// match wins, and unmatched entries fall back to the unmodified mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GLOverrideRule {
    /// Unique identifier for the rule.
    pub id: String,
    /// Evaluation rank; highest first.
    pub priority: i32,
    /// Whether the rule applies to debit entries.
    pub applies_to_debit: bool,
    /// Whether the rule applies to credit entries.
    pub applies_to_credit: bool,
    /// AND-conditions that must all match.
    pub conditions: Vec<OverrideCondition>,
    /// The effect applied when the rule matches.
    pub target: OverrideTarget,
}

/// Which side of the ledger an entry posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryDirection {
    /// A debit entry.
    Debit,
    /// A credit entry.
    Credit,
}

/// One line of the emitted journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Sequential entry number, 1-based within the run.
    pub entry_number: u32,
    /// The payroll concept that produced this entry.
    pub mapping_type: String,
    /// The resolved account code.
    pub account_code: String,
    /// The fully composed dimensional GL string.
    pub gl_string: String,
    /// Debit or credit.
    pub direction: EntryDirection,
    /// The posted amount; always positive.
    pub amount: Decimal,
    /// Human-readable description of the entry.
    pub description: String,
}

/// The complete journal output of one posting run.
///
/// An imbalance is reported through `balanced` and `warnings`; it never
/// blocks entry creation, so the batch always carries whatever entries
/// could be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalBatch {
    /// Unique identifier for the batch.
    pub batch_id: Uuid,
    /// The ordered journal entries.
    pub entries: Vec<JournalEntry>,
    /// Sum of all debit amounts.
    pub total_debits: Decimal,
    /// Sum of all credit amounts.
    pub total_credits: Decimal,
    /// True when |debits - credits| is below the 0.01 epsilon.
    pub balanced: bool,
    /// Data-integrity warnings accumulated during posting.
    pub warnings: Vec<String>,
}

/// The full GL configuration for a company, fetched once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The chart of accounts.
    #[serde(default)]
    pub accounts: Vec<GLAccount>,
    /// Mapping-type to account assignments.
    #[serde(default)]
    pub mappings: Vec<GLMapping>,
    /// Dimensional segments, ordered by `segment_order`.
    #[serde(default)]
    pub segments: Vec<GLSegment>,
    /// Prioritized override rules.
    #[serde(default)]
    pub override_rules: Vec<GLOverrideRule>,
}

impl LedgerConfig {
    /// Looks up an account by id.
    pub fn account_by_id(&self, id: &str) -> Option<&GLAccount> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Normalizes ordering so evaluation order matches the configured
    /// priorities: mappings and rules highest priority first, segments by
    /// segment order ascending.
    pub fn normalize(&mut self) {
        self.mappings.sort_by(|a, b| b.priority.cmp(&a.priority));
        self.override_rules
            .sort_by(|a, b| b.priority.cmp(&a.priority));
        self.segments.sort_by_key(|s| s.segment_order);
    }
}
