use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Consignment, Operator};
use crate::config::DeskConfig;

/// Sentinel branch filter meaning "no filter"
pub const ALL_BRANCHES: &str = "All Branches";

const RECENT_BOOKINGS: usize = 5;

/// Effective branch filter for a report
///
/// The requested branch applies unless it is [`ALL_BRANCHES`]. Operators
/// outside head office are always pinned to their own branch.
pub fn branch_scope(
    requested: Option<&str>,
    operator: Option<&Operator>,
    desk: &DeskConfig,
) -> Option<String> {
    let mut scope = requested
        .filter(|b| !b.is_empty() && *b != ALL_BRANCHES)
        .map(str::to_string);

    if let Some(branch) = operator.and_then(|op| op.branch.as_deref()) {
        if !branch.is_empty() && !desk.is_head_office(branch) {
            scope = Some(branch.to_string());
        }
    }

    scope
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub branch: Option<String>,
    pub total_bookings: usize,
    pub total_revenue: f64,
    pub recent_bookings: Vec<Consignment>,
}

pub fn dashboard_stats(consignments: &[Consignment], branch: Option<&str>) -> DashboardStats {
    let mut scoped: Vec<&Consignment> = consignments
        .iter()
        .filter(|c| branch.map_or(true, |b| c.branch == b))
        .collect();

    let total_revenue: f64 = scoped.iter().map(|c| c.cost.amount).sum();
    scoped.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));

    DashboardStats {
        branch: branch.map(str::to_string),
        total_bookings: scoped.len(),
        total_revenue,
        recent_bookings: scoped
            .into_iter()
            .take(RECENT_BOOKINGS)
            .cloned()
            .collect(),
    }
}

/// End-of-day collection summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub booking_count: usize,
    pub total_revenue: f64,
    /// Collection per operator username; "Unknown" when nobody is recorded
    pub by_operator: BTreeMap<String, f64>,
}

/// Bookings made on `date` (local calendar day)
pub fn daily_report(consignments: &[Consignment], date: NaiveDate) -> DailyReport {
    let today: Vec<&Consignment> = consignments
        .iter()
        .filter(|c| c.booking_date.with_timezone(&Local).date_naive() == date)
        .collect();

    let mut by_operator = BTreeMap::new();
    for c in &today {
        let name = c.processed_by.clone().unwrap_or_else(|| "Unknown".to_string());
        *by_operator.entry(name).or_insert(0.0) += c.cost.amount;
    }

    DailyReport {
        date,
        booking_count: today.len(),
        total_revenue: today.iter().map(|c| c.cost.amount).sum(),
        by_operator,
    }
}
