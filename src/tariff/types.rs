use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Tier keys, matched literally against the tariff dataset
pub mod tier {
    pub const UPTO_250G: &str = "0.250_kg";
    pub const UPTO_500G: &str = "0.500_kg";
    pub const UPTO_1KG: &str = "1.00_kg";
    pub const AIR_6_TO_25KG: &str = "6_to_25_kgs";
    pub const LAPTOP_UPTO_3KG: &str = "upto_3_kgs";
    pub const SURFACE_PER_25KG: &str = "above_5kg_per_25kg_d_series";
    pub const SURFACE_PER_100KG: &str = "above_26kg_per_100kg_d_series";
}

/// One destination zone's prices within a tariff class
///
/// In the dataset a row is a flat JSON object: a `destination` label plus one
/// field per weight tier. Fields that aren't numbers (or numeric strings) are
/// dropped on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTariffRow", into = "RawTariffRow")]
pub struct TariffRow {
    pub destination: String,
    pub tiers: BTreeMap<String, f64>,
}

impl TariffRow {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            tiers: BTreeMap::new(),
        }
    }

    /// Builder used by tests and seeding code
    pub fn with_tier(mut self, key: &str, price: f64) -> Self {
        self.tiers.insert(key.to_string(), price);
        self
    }

    /// Price for a tier key, if the row carries it
    pub fn tier(&self, key: &str) -> Option<f64> {
        self.tiers.get(key).copied()
    }
}

#[derive(Serialize, Deserialize)]
struct RawTariffRow {
    #[serde(default)]
    destination: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl From<RawTariffRow> for TariffRow {
    fn from(raw: RawTariffRow) -> Self {
        let tiers = raw
            .fields
            .into_iter()
            .filter_map(|(key, value)| {
                let price = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }?;
                Some((key, price))
            })
            .collect();

        TariffRow {
            destination: raw.destination.unwrap_or_default(),
            tiers,
        }
    }
}

impl From<TariffRow> for RawTariffRow {
    fn from(row: TariffRow) -> Self {
        RawTariffRow {
            destination: Some(row.destination),
            fields: row
                .tiers
                .into_iter()
                .map(|(key, price)| (key, Value::from(price)))
                .collect(),
        }
    }
}

/// The four pricing rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TariffClass {
    DomesticSlab,
    AirCargoAbove5kg,
    SurfaceAbove5kg,
    LaptopBooking,
}

impl TariffClass {
    pub const ALL: [TariffClass; 4] = [
        TariffClass::DomesticSlab,
        TariffClass::AirCargoAbove5kg,
        TariffClass::SurfaceAbove5kg,
        TariffClass::LaptopBooking,
    ];

    /// Top-level key of this class in the tariff dataset
    pub fn dataset_key(&self) -> &'static str {
        match self {
            TariffClass::DomesticSlab => "domestic_rate_tariff",
            TariffClass::AirCargoAbove5kg => "air_cargo_above_5kgs_all_types",
            TariffClass::SurfaceAbove5kg => "surface_cargo_above_5kgs_all_types",
            TariffClass::LaptopBooking => "laptop_booking_rates",
        }
    }
}

impl fmt::Display for TariffClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataset_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PackageType {
    Document,
    #[default]
    #[serde(rename = "Non-Document")]
    NonDocument,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageType::Document => f.write_str("Document"),
            PackageType::NonDocument => f.write_str("Non-Document"),
        }
    }
}

impl FromStr for PackageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "DOCUMENT" | "DOC" => Ok(PackageType::Document),
            "NONDOCUMENT" | "NONDOC" | "PARCEL" => Ok(PackageType::NonDocument),
            _ => Err(Error::unknown("package type", s)),
        }
    }
}

/// Service requested for a shipment; `None` at call sites means the domestic default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    Domestic,
    #[serde(rename = "Air Cargo")]
    AirCargo,
    Surface,
    Laptop,
    /// Accepted on bookings but has no tariff of its own
    #[serde(rename = "DTDC Plus")]
    DtdcPlus,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceType::Domestic => "Domestic",
            ServiceType::AirCargo => "Air Cargo",
            ServiceType::Surface => "Surface",
            ServiceType::Laptop => "Laptop",
            ServiceType::DtdcPlus => "DTDC Plus",
        };
        f.write_str(label)
    }
}

impl FromStr for ServiceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "DOMESTIC" => Ok(ServiceType::Domestic),
            "AIRCARGO" | "AIR" => Ok(ServiceType::AirCargo),
            "SURFACE" => Ok(ServiceType::Surface),
            "LAPTOP" => Ok(ServiceType::Laptop),
            "DTDCPLUS" => Ok(ServiceType::DtdcPlus),
            _ => Err(Error::unknown("service type", s)),
        }
    }
}

/// Uppercase and drop separators so "air-cargo", "Air Cargo" and "AIR_CARGO" agree
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Inputs of a rate quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub weight: f64,
    pub destination: String,
    #[serde(default, rename = "type")]
    pub package_type: PackageType,
    #[serde(default)]
    pub service_type: Option<ServiceType>,
}

/// Priced quote as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub weight: f64,
    pub destination: String,
    pub service_type: Option<ServiceType>,
    pub cost: f64,
    pub currency: String,
}
