//! Override-rule evaluation for journal entries.
//!
//! Rules redirect or recompose a journal entry's account or GL string.
//! Only rules whose direction flag matches the entry are candidates; among
//! candidates the highest priority rule whose conditions all match wins.

use std::collections::BTreeMap;

use crate::models::{
    ConditionOperator, EntryDirection, GLOverrideRule, OverrideCondition,
};

/// The dimension values an entry is evaluated against.
///
/// Most dimensions (department, division, location, job, cost center) are
/// not yet wired from upstream and stay unset, so in practice only
/// `mapping_type` conditions and `any` operators are active. Unset
/// dimensions fail `equals` and satisfy `not_equals`.
#[derive(Debug, Clone, Default)]
pub struct PostingContext {
    /// The mapping type of the entry being posted.
    pub mapping_type: String,
    /// Additional dimension values, keyed by dimension name.
    pub dimensions: BTreeMap<String, String>,
}

impl PostingContext {
    /// Creates a context carrying only the mapping type.
    pub fn for_mapping_type(mapping_type: &str) -> Self {
        PostingContext {
            mapping_type: mapping_type.to_string(),
            dimensions: BTreeMap::new(),
        }
    }

    fn dimension_value(&self, dimension: &str) -> Option<&str> {
        if dimension == "mapping_type" {
            Some(&self.mapping_type)
        } else {
            self.dimensions.get(dimension).map(String::as_str)
        }
    }
}

fn condition_matches(condition: &OverrideCondition, context: &PostingContext) -> bool {
    let actual = context.dimension_value(&condition.dimension);
    match condition.operator {
        ConditionOperator::Any => true,
        ConditionOperator::Equals => match (&condition.value, actual) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        },
        ConditionOperator::NotEquals => match (&condition.value, actual) {
            (Some(expected), Some(actual)) => expected != actual,
            // an unset dimension is never equal to a concrete value
            (Some(_), None) => true,
            (None, _) => false,
        },
    }
}

/// Finds the winning override rule for an entry, if any.
///
/// `rules` must already be sorted highest priority first (the ledger
/// configuration normalizes this at load time). First full AND-match wins;
/// unmatched entries fall back to the unmodified mapping.
pub fn find_matching_rule<'a>(
    rules: &'a [GLOverrideRule],
    direction: EntryDirection,
    context: &PostingContext,
) -> Option<&'a GLOverrideRule> {
    rules
        .iter()
        .filter(|rule| match direction {
            EntryDirection::Debit => rule.applies_to_debit,
            EntryDirection::Credit => rule.applies_to_credit,
        })
        .find(|rule| rule.conditions.iter().all(|c| condition_matches(c, context)))
}
