//! Destination string to tariff row matching.
//!
//! Resolution order: exact label match, then the keyword rules below in
//! order, then the default "rest of India" row. The same rules run against
//! every tariff class, each on its own rows.

use super::TariffRow;

/// A keyword group mapping free-text destinations onto a zone row
#[derive(Debug, Clone, Copy)]
pub struct RegionRule {
    /// Any of these substrings in the normalized destination triggers the rule
    pub keywords: &'static [&'static str],
    /// First row whose label contains any of these wins
    pub targets: &'static [&'static str],
    /// Continue to the default row when no target row exists
    pub fall_through: bool,
}

pub const REGION_RULES: &[RegionRule] = &[
    RegionRule {
        keywords: &["TAMIL", "PONDY", "PONDICHERRY", "PUDUCHERRY"],
        targets: &["TAMILNADU"],
        fall_through: false,
    },
    RegionRule {
        keywords: &["KERALA", "KARNATAKA"],
        targets: &["KERALA"],
        fall_through: false,
    },
    RegionRule {
        keywords: &["ANDHRA", "TELANGANA", "TELEGANA"],
        targets: &["ANDHRA"],
        fall_through: false,
    },
    RegionRule {
        keywords: &["MUMBAI", "DELHI", "KOLKATA", "HYDERABAD"],
        targets: &["MUMBAI", "DELHI"],
        fall_through: true,
    },
];

/// Labels of the catch-all row
pub const DEFAULT_TARGETS: &[&str] = &["NORTH INDIA", "OTHER PLACE"];

/// How a row was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMatch {
    Exact,
    /// Index into [`REGION_RULES`]
    Rule(usize),
    Default,
}

pub fn normalize_destination(destination: &str) -> String {
    destination.trim().to_uppercase()
}

/// Resolve a destination to its tariff row
pub fn resolve_region<'a>(destination: &str, rows: &'a [TariffRow]) -> Option<&'a TariffRow> {
    resolve_region_with_match(destination, rows).map(|(row, _)| row)
}

/// Same as [`resolve_region`], also reporting which stage matched
pub fn resolve_region_with_match<'a>(
    destination: &str,
    rows: &'a [TariffRow],
) -> Option<(&'a TariffRow, RegionMatch)> {
    let dest = normalize_destination(destination);

    // Rows without a label never take part in the exact match
    if let Some(row) = rows
        .iter()
        .find(|r| !r.destination.is_empty() && r.destination.to_uppercase() == dest)
    {
        return Some((row, RegionMatch::Exact));
    }

    for (idx, rule) in REGION_RULES.iter().enumerate() {
        if !rule.keywords.iter().any(|k| dest.contains(k)) {
            continue;
        }

        match find_labelled(rows, rule.targets) {
            Some(row) => return Some((row, RegionMatch::Rule(idx))),
            None if rule.fall_through => break,
            None => return None,
        }
    }

    find_labelled(rows, DEFAULT_TARGETS).map(|row| (row, RegionMatch::Default))
}

/// First row whose label contains any of `targets` (case-sensitive)
fn find_labelled<'a>(rows: &'a [TariffRow], targets: &[&str]) -> Option<&'a TariffRow> {
    rows.iter()
        .find(|r| targets.iter().any(|t| r.destination.contains(t)))
}
