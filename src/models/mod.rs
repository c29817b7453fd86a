//! Core data models for the payroll engine.
//!
//! This module contains all the domain records the engine consumes and the
//! result structures it produces. Everything here is a plain serde type;
//! how these records are fetched or stored is a caller concern.

mod compensation;
mod employee;
mod ledger;
mod pay_period;
mod simulation;
mod statutory;

pub use compensation::{
    Allowance, CompensationSource, ContributionCategory, EmployerContribution, OtherDeduction,
    ProrationMethod, WorkRecord,
};
pub use employee::EmployeeProfile;
pub use ledger::{
    ConditionOperator, EntryDirection, GLAccount, GLMapping, GLOverrideRule, GLSegment,
    JournalBatch, JournalEntry, LedgerConfig, OverrideCondition, OverrideTarget,
};
pub use pay_period::{PayFrequency, PayPeriod};
pub use simulation::{
    AdditionalPay, AuditStep, AuditTrace, AuditWarning, EarningsBreakdown, PayrollCalculation,
    PayrollSimulation,
};
pub use statutory::{
    CalculationMethod, DeductionRecord, OpeningBalance, RateBand, StatutoryScheme, YtdSnapshot,
};
