use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Consignment, ConsignmentStatus};

/// Where shipments sit between origin and destination
pub const HUB_LOCATION: &str = "Hub";

const TIMELINE: [ConsignmentStatus; 4] = [
    ConsignmentStatus::Booked,
    ConsignmentStatus::InTransit,
    ConsignmentStatus::OutForDelivery,
    ConsignmentStatus::Delivered,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub status: ConsignmentStatus,
    /// Only the booking step carries a date; no per-step history is kept
    pub date: Option<DateTime<Utc>>,
    pub location: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    pub consignment: Consignment,
    pub history: Vec<TimelineStep>,
    pub origin_location: String,
    pub destination_location: String,
    pub current_location: String,
}

/// Build the tracking timeline for a consignment from its current status
pub fn build_tracking(consignment: &Consignment) -> TrackingView {
    let origin = if consignment.branch.is_empty() {
        crate::config::DEFAULT_BRANCH.to_string()
    } else {
        consignment.branch.clone()
    };
    let destination = if consignment.receiver.destination.is_empty() {
        HUB_LOCATION.to_string()
    } else {
        consignment.receiver.destination.clone()
    };

    // A cancelled booking only ever completed the booking step
    let reached = consignment.status.progress().unwrap_or(0);

    let history = TIMELINE
        .iter()
        .enumerate()
        .map(|(idx, status)| {
            let (date, location) = match status {
                ConsignmentStatus::Booked => (Some(consignment.booking_date), origin.clone()),
                ConsignmentStatus::InTransit => (None, HUB_LOCATION.to_string()),
                _ => (None, destination.clone()),
            };
            TimelineStep {
                status: *status,
                date,
                location,
                completed: idx <= reached,
            }
        })
        .collect();

    let current_location = match consignment.status {
        ConsignmentStatus::Delivered => destination.clone(),
        ConsignmentStatus::Booked => origin.clone(),
        _ => HUB_LOCATION.to_string(),
    };

    TrackingView {
        consignment: consignment.clone(),
        history,
        origin_location: origin,
        destination_location: destination,
        current_location,
    }
}
