use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;
use crate::tariff::{PackageType, ServiceType, CURRENCY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Free-text destination, e.g. "COIMBATORE" or "MUMBAI"; priced via the region resolver
    pub destination: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    /// kg
    pub weight: f64,
    #[serde(default, rename = "type")]
    pub package_type: PackageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_value: Option<f64>,
}

/// Consignment series code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConsignmentType {
    C,
    #[default]
    D,
    V,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub amount: f64,
    pub currency: String,
}

impl Cost {
    pub fn inr(amount: f64) -> Self {
        Self {
            amount,
            currency: CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConsignmentStatus {
    #[default]
    Booked,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl ConsignmentStatus {
    /// Position on the delivery timeline; cancelled shipments are off it
    pub fn progress(&self) -> Option<usize> {
        match self {
            ConsignmentStatus::Booked => Some(0),
            ConsignmentStatus::InTransit => Some(1),
            ConsignmentStatus::OutForDelivery => Some(2),
            ConsignmentStatus::Delivered => Some(3),
            ConsignmentStatus::Cancelled => None,
        }
    }
}

impl fmt::Display for ConsignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConsignmentStatus::Booked => "Booked",
            ConsignmentStatus::InTransit => "In Transit",
            ConsignmentStatus::OutForDelivery => "Out for Delivery",
            ConsignmentStatus::Delivered => "Delivered",
            ConsignmentStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

impl FromStr for ConsignmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "booked" => Ok(ConsignmentStatus::Booked),
            "intransit" => Ok(ConsignmentStatus::InTransit),
            "outfordelivery" => Ok(ConsignmentStatus::OutForDelivery),
            "delivered" => Ok(ConsignmentStatus::Delivered),
            "cancelled" | "canceled" => Ok(ConsignmentStatus::Cancelled),
            _ => Err(Error::unknown("consignment status", s)),
        }
    }
}

/// A single shipment booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consignment {
    pub id: Uuid,
    pub sender: Sender,
    pub receiver: Receiver,
    pub package_details: PackageDetails,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub consignment_type: ConsignmentType,
    pub cost: Cost,
    #[serde(default)]
    pub status: ConsignmentStatus,
    #[serde(default)]
    pub otp_verified: bool,
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<String>,
    pub booking_date: DateTime<Utc>,
}

/// Booking as submitted by the desk or a customer
///
/// `cost` is whatever the client believes the price is. It is only used for
/// the audit line; the stored cost always comes from the rate calculator.
/// There is no client-side verification flag: unknown fields such as
/// `otpVerified` are dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub sender: Sender,
    pub receiver: Receiver,
    pub package_details: PackageDetails,
    #[serde(default)]
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub consignment_type: ConsignmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Employee processing a booking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Operator {
    pub fn new(username: impl Into<String>, branch: Option<String>) -> Self {
        Self {
            username: username.into(),
            branch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    pub consignment_id: Uuid,
    pub verified_cost: f64,
    pub currency: String,
}
