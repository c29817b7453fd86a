//! Dimensional GL string composition.
//!
//! A full GL string is the company's active segments, in segment order,
//! joined with `-` and terminated by the account code, e.g.
//! `"1000-4500-SALARY"`. Segment values come from an overlay (override
//! rules) falling back to caller-provided defaults, which are commonly
//! empty; empty values are dropped from the composed string.

use std::collections::BTreeMap;

use crate::models::GLSegment;

/// Composes the full GL string for an account.
///
/// For each active segment, ordered by `segment_order`, the overlay value
/// is taken if present, else the default for that segment code. Non-empty
/// values are joined with `-` and the account code is appended. With no
/// segments configured the GL string is simply the account code.
pub fn compose_gl_string(
    segments: &[GLSegment],
    defaults: &BTreeMap<String, String>,
    overlay: &BTreeMap<String, String>,
    account_code: &str,
) -> String {
    let mut parts: Vec<&str> = segments
        .iter()
        .filter(|s| s.active)
        .map(|s| {
            overlay
                .get(&s.code)
                .or_else(|| defaults.get(&s.code))
                .map(String::as_str)
                .unwrap_or("")
        })
        .filter(|v| !v.is_empty())
        .collect();
    parts.push(account_code);
    parts.join("-")
}
