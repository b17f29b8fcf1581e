use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::{TariffClass, TariffRow};
use crate::error::{Error, Result};

/// Tariff dataset shipped with the binary
const BUILTIN_RATES_JSON: &str = include_str!("../../assets/rates.json");

/// Parsed once, on first use, and shared for the life of the process
static BUILTIN_TABLE: Lazy<Arc<RateTable>> = Lazy::new(|| {
    Arc::new(
        RateTable::from_json_str(BUILTIN_RATES_JSON).expect("builtin tariff dataset is valid"),
    )
});

/// Rows of one tariff class, as laid out in the dataset (`{ "rates": [...] }`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TariffSheet {
    #[serde(default)]
    pub rates: Vec<TariffRow>,
}

/// The full tariff dataset: four classes of rows, read-only after load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    #[serde(rename = "domestic_rate_tariff", default)]
    pub domestic: TariffSheet,
    #[serde(rename = "air_cargo_above_5kgs_all_types", default)]
    pub air_cargo: TariffSheet,
    #[serde(rename = "surface_cargo_above_5kgs_all_types", default)]
    pub surface: TariffSheet,
    #[serde(rename = "laptop_booking_rates", default)]
    pub laptop: TariffSheet,
}

impl RateTable {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a tariff dataset from a JSON file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)
            .map_err(|e| Error::RateTable(format!("{}: {}", path.display(), e)))?;
        crate::debug_println!(
            "Loaded tariff dataset from {} ({} rows)",
            path.display(),
            table.row_count()
        );
        Ok(table)
    }

    /// Shared handle to the builtin dataset
    pub fn builtin() -> Arc<RateTable> {
        BUILTIN_TABLE.clone()
    }

    /// Load from `path` when given, falling back to the builtin dataset on any failure
    pub fn load_with_fallback(path: Option<&Path>) -> Arc<RateTable> {
        let Some(path) = path else {
            return Self::builtin();
        };

        match Self::load_from_path(path) {
            Ok(table) => Arc::new(table),
            Err(e) => {
                crate::warn_println!("Failed to load tariff dataset: {}", e);
                crate::warn_println!("Using builtin tariff dataset");
                Self::builtin()
            }
        }
    }

    pub fn rows(&self, class: TariffClass) -> &[TariffRow] {
        match class {
            TariffClass::DomesticSlab => &self.domestic.rates,
            TariffClass::AirCargoAbove5kg => &self.air_cargo.rates,
            TariffClass::SurfaceAbove5kg => &self.surface.rates,
            TariffClass::LaptopBooking => &self.laptop.rates,
        }
    }

    pub fn row_count(&self) -> usize {
        TariffClass::ALL.iter().map(|c| self.rows(*c).len()).sum()
    }

    /// Structural checks: every class has rows and every row has a label
    pub fn check(&self) -> Result<()> {
        for class in TariffClass::ALL {
            let rows = self.rows(class);
            if rows.is_empty() {
                return Err(Error::RateTable(format!("{} has no rates", class)));
            }
            if let Some(pos) = rows.iter().position(|r| r.destination.trim().is_empty()) {
                return Err(Error::RateTable(format!(
                    "{} row {} has no destination",
                    class,
                    pos + 1
                )));
            }
        }
        Ok(())
    }
}
