//! Journal posting engine.
//!
//! Converts a fixed set of named payroll totals into a balanced set of
//! debit/credit journal entries: mapping lookup with per-type fallback
//! chains, override-rule evaluation, dimensional GL string composition,
//! and a run-scoped accumulator for entry numbers and running totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::composition::compose_gl_string;
use crate::ledger::overrides::{PostingContext, find_matching_rule};
use crate::models::{
    EntryDirection, GLMapping, JournalBatch, JournalEntry, LedgerConfig, OverrideTarget,
};

/// Journal balance tolerance, in currency units.
const BALANCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// The named monetary totals the posting engine consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingTotals {
    /// Total gross earnings.
    pub gross_pay: Decimal,
    /// Net pay due to the employee.
    pub net_pay: Decimal,
    /// Tax withheld from the employee.
    pub employee_tax: Decimal,
    /// Employer-side statutory amounts.
    pub employer_tax: Decimal,
    /// Non-statutory amounts withheld from the employee.
    pub benefit_deductions: Decimal,
    /// Employer benefit contributions.
    pub employer_benefits: Decimal,
    /// Employer retirement contributions.
    pub employer_retirement: Decimal,
    /// Employer savings-plan contributions.
    pub employer_savings: Decimal,
}

/// Mutable accumulator for one posting run.
///
/// Entry numbers and running totals live here, scoped to a single
/// calculation, so concurrent per-employee runs stay isolated.
struct PostingRun {
    next_entry_number: u32,
    entries: Vec<JournalEntry>,
    total_debits: Decimal,
    total_credits: Decimal,
    warnings: Vec<String>,
}

impl PostingRun {
    fn new() -> Self {
        PostingRun {
            next_entry_number: 1,
            entries: Vec::new(),
            total_debits: Decimal::ZERO,
            total_credits: Decimal::ZERO,
            warnings: Vec::new(),
        }
    }

    fn push(&mut self, mut entry: JournalEntry) {
        entry.entry_number = self.next_entry_number;
        self.next_entry_number += 1;
        match entry.direction {
            EntryDirection::Debit => self.total_debits += entry.amount,
            EntryDirection::Credit => self.total_credits += entry.amount,
        }
        self.entries.push(entry);
    }
}

/// Fallback chain for a mapping type, most specific first.
///
/// Downstream chart-of-accounts setups rely on these exact chains: a
/// company that never configures "gross_pay" but has "wages_expense"
/// still posts gross pay there.
fn fallback_chain(mapping_type: &str) -> &'static [&'static str] {
    match mapping_type {
        "gross_pay" => &["gross_pay", "salaries_expense", "wages_expense"],
        "net_pay" => &["net_pay", "wages_payable", "payroll_payable"],
        "employee_tax" => &["employee_tax", "tax_payable"],
        "employer_tax" => &["employer_tax", "payroll_tax"],
        "benefit_deductions" => &["benefit_deductions", "benefits_payable"],
        "employer_benefits" => &["employer_benefits", "benefits_expense"],
        "employer_retirement" => &["employer_retirement", "pension_expense"],
        "employer_savings" => &["employer_savings", "savings_expense"],
        _ => &[],
    }
}

/// Resolves the mapping for a type by walking its fallback chain.
///
/// `mappings` are pre-sorted by priority descending, so within one chain
/// element the highest-priority configured mapping wins.
fn resolve_mapping<'a>(mappings: &'a [GLMapping], mapping_type: &str) -> Option<&'a GLMapping> {
    fallback_chain(mapping_type)
        .iter()
        .find_map(|candidate| mappings.iter().find(|m| m.mapping_type == *candidate))
}

/// One line of the fixed posting plan.
struct PlannedEntry {
    mapping_type: &'static str,
    direction: EntryDirection,
    amount: Decimal,
    description: &'static str,
}

/// The fixed, ordered posting plan for a set of totals.
///
/// Debit side carries the expenses (gross pay and every employer
/// contribution); credit side carries the liabilities (net pay, amounts
/// withheld, and the matching contribution payables). With a fully mapped
/// chart this set balances exactly, since gross equals net plus employee
/// withholdings.
fn posting_plan(totals: &PostingTotals) -> Vec<PlannedEntry> {
    vec![
        PlannedEntry {
            mapping_type: "gross_pay",
            direction: EntryDirection::Debit,
            amount: totals.gross_pay,
            description: "Gross pay expense",
        },
        PlannedEntry {
            mapping_type: "employer_tax",
            direction: EntryDirection::Debit,
            amount: totals.employer_tax,
            description: "Employer statutory expense",
        },
        PlannedEntry {
            mapping_type: "employer_benefits",
            direction: EntryDirection::Debit,
            amount: totals.employer_benefits,
            description: "Employer benefit contributions",
        },
        PlannedEntry {
            mapping_type: "employer_retirement",
            direction: EntryDirection::Debit,
            amount: totals.employer_retirement,
            description: "Employer retirement contributions",
        },
        PlannedEntry {
            mapping_type: "employer_savings",
            direction: EntryDirection::Debit,
            amount: totals.employer_savings,
            description: "Employer savings contributions",
        },
        PlannedEntry {
            mapping_type: "net_pay",
            direction: EntryDirection::Credit,
            amount: totals.net_pay,
            description: "Net pay payable",
        },
        PlannedEntry {
            mapping_type: "employee_tax",
            direction: EntryDirection::Credit,
            amount: totals.employee_tax,
            description: "Employee tax withheld",
        },
        PlannedEntry {
            mapping_type: "employer_tax",
            direction: EntryDirection::Credit,
            amount: totals.employer_tax,
            description: "Employer statutory payable",
        },
        PlannedEntry {
            mapping_type: "benefit_deductions",
            direction: EntryDirection::Credit,
            amount: totals.benefit_deductions,
            description: "Benefit deductions payable",
        },
        PlannedEntry {
            mapping_type: "employer_benefits",
            direction: EntryDirection::Credit,
            amount: totals.employer_benefits,
            description: "Employer benefit contributions payable",
        },
        PlannedEntry {
            mapping_type: "employer_retirement",
            direction: EntryDirection::Credit,
            amount: totals.employer_retirement,
            description: "Employer retirement contributions payable",
        },
        PlannedEntry {
            mapping_type: "employer_savings",
            direction: EntryDirection::Credit,
            amount: totals.employer_savings,
            description: "Employer savings contributions payable",
        },
    ]
}

/// Posts a set of payroll totals as a journal batch.
///
/// For each planned entry: skip non-positive amounts and unmapped types,
/// resolve the account via the fallback chain, apply the winning override
/// rule (if any), compose the dimensional GL string, and emit the entry
/// with the next sequential number. Missing account references and journal
/// imbalance are reported as warnings; the batch always returns whatever
/// entries could be constructed. `ledger` must be normalized (see
/// [`LedgerConfig::normalize`]).
pub fn post_journal(
    totals: &PostingTotals,
    ledger: &LedgerConfig,
    segment_defaults: &BTreeMap<String, String>,
) -> JournalBatch {
    let mut run = PostingRun::new();

    for planned in posting_plan(totals) {
        if planned.amount <= Decimal::ZERO {
            continue;
        }

        let Some(mapping) = resolve_mapping(&ledger.mappings, planned.mapping_type) else {
            continue;
        };
        let account_id = match planned.direction {
            EntryDirection::Debit => mapping.debit_account_id.as_deref(),
            EntryDirection::Credit => mapping.credit_account_id.as_deref(),
        };
        let Some(account_id) = account_id else {
            continue;
        };

        let Some(account) = ledger.account_by_id(account_id) else {
            run.warnings.push(format!(
                "account '{}' referenced by mapping '{}' not found",
                account_id, mapping.mapping_type
            ));
            continue;
        };
        let mut account_code = account.code.clone();

        let context = PostingContext::for_mapping_type(planned.mapping_type);
        let rule = find_matching_rule(&ledger.override_rules, planned.direction, &context);

        let mut overlay: BTreeMap<String, String> = BTreeMap::new();
        let mut literal_gl_string: Option<String> = None;
        if let Some(rule) = rule {
            match &rule.target {
                OverrideTarget::ReplaceAccount { account_id } => {
                    match ledger.account_by_id(account_id) {
                        Some(replacement) => account_code = replacement.code.clone(),
                        None => run.warnings.push(format!(
                            "override rule '{}' targets unknown account '{}'",
                            rule.id, account_id
                        )),
                    }
                }
                OverrideTarget::ReplaceFullString { gl_string } => {
                    literal_gl_string = Some(gl_string.clone());
                }
                OverrideTarget::SegmentOverrides { segments } => {
                    overlay = segments.clone();
                }
            }
        }

        let gl_string = literal_gl_string.unwrap_or_else(|| {
            compose_gl_string(&ledger.segments, segment_defaults, &overlay, &account_code)
        });

        run.push(JournalEntry {
            entry_number: 0, // assigned by the run
            mapping_type: planned.mapping_type.to_string(),
            account_code,
            gl_string,
            direction: planned.direction,
            amount: planned.amount,
            description: planned.description.to_string(),
        });
    }

    let imbalance = (run.total_debits - run.total_credits).abs();
    let balanced = imbalance < BALANCE_EPSILON;
    if !balanced {
        run.warnings.push(format!(
            "journal out of balance: debits {} vs credits {}",
            run.total_debits.normalize(),
            run.total_credits.normalize()
        ));
    }

    JournalBatch {
        batch_id: Uuid::new_v4(),
        entries: run.entries,
        total_debits: run.total_debits,
        total_credits: run.total_credits,
        balanced,
        warnings: run.warnings,
    }
}
