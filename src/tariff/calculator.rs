use std::sync::Arc;

use super::region::{resolve_region, resolve_region_with_match};
use super::{tier, PackageType, Quote, RateRequest, RateTable, ServiceType, TariffClass, TariffRow};
use crate::error::RateError;

/// Flat laptop charge when no per-zone tier applies
pub const LAPTOP_BASE_PRICE: f64 = 1600.0;
/// Laptop surcharge per whole kg above [`LAPTOP_SURCHARGE_FROM_KG`]
pub const LAPTOP_PER_KG_SURCHARGE: f64 = 200.0;
pub const LAPTOP_SURCHARGE_FROM_KG: f64 = 5.0;
pub const LAPTOP_TIER_MAX_KG: f64 = 3.0;

/// Quoting currency, no conversion is ever applied
pub const CURRENCY: &str = "INR";

/// Price a shipment against a tariff table
///
/// `service_type` of `None` means the domestic default. Exactly one tariff
/// branch runs per call. Only the domestic branch treats an unresolved
/// destination as an error; the others price it at 0.
pub fn calculate_rate(
    table: &RateTable,
    weight: f64,
    destination: &str,
    package_type: PackageType,
    service_type: Option<ServiceType>,
) -> Result<f64, RateError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(RateError::InvalidWeight(weight));
    }

    crate::debug_println!(
        "Quoting {}kg {} to {:?} via {}",
        weight,
        package_type,
        destination,
        service_type.unwrap_or_default()
    );

    let price = match service_type.unwrap_or_default() {
        ServiceType::Domestic => domestic_price(table, weight, destination)?,
        ServiceType::AirCargo => air_cargo_price(table, weight, destination).unwrap_or_else(|| {
            warn_unresolved(TariffClass::AirCargoAbove5kg, destination);
            0.0
        }),
        ServiceType::Surface => surface_price(table, weight, destination),
        ServiceType::Laptop => laptop_price(table, weight, destination),
        ServiceType::DtdcPlus => {
            crate::warn_println!("No tariff for DTDC Plus, quoting 0 for {:?}", destination);
            0.0
        }
    };

    Ok(price)
}

/// Domestic slab: sub-kg tiers, linear 1kg pricing up to 5kg, air cargo rate above
fn domestic_price(table: &RateTable, weight: f64, destination: &str) -> Result<f64, RateError> {
    let (row, how) = resolve_region_with_match(destination, table.rows(TariffClass::DomesticSlab))
        .ok_or_else(|| RateError::DestinationNotFound(destination.trim().to_string()))?;
    crate::debug_println!("  domestic row {:?} ({:?})", row.destination, how);

    if weight <= 0.250 {
        if let Some(price) = priced_tier(row, tier::UPTO_250G) {
            return Ok(price);
        }
    }
    if weight <= 0.500 {
        return Ok(tier_or_zero(row, tier::UPTO_500G));
    }
    if weight <= 1.000 {
        return Ok(tier_or_zero(row, tier::UPTO_1KG));
    }
    if weight <= 5.000 {
        return Ok(tier_or_zero(row, tier::UPTO_1KG) * weight.ceil());
    }

    Ok(air_cargo_price(table, weight, destination).unwrap_or_else(|| {
        warn_unresolved(TariffClass::AirCargoAbove5kg, destination);
        0.0
    }))
}

/// `None` when the destination has no air cargo row
fn air_cargo_price(table: &RateTable, weight: f64, destination: &str) -> Option<f64> {
    let row = resolve_region(destination, table.rows(TariffClass::AirCargoAbove5kg))?;
    Some(tier_or_zero(row, tier::AIR_6_TO_25KG) * weight.ceil())
}

fn surface_price(table: &RateTable, weight: f64, destination: &str) -> f64 {
    let Some(row) = resolve_region(destination, table.rows(TariffClass::SurfaceAbove5kg)) else {
        warn_unresolved(TariffClass::SurfaceAbove5kg, destination);
        return 0.0;
    };

    match priced_tier(row, tier::SURFACE_PER_25KG)
        .or_else(|| priced_tier(row, tier::SURFACE_PER_100KG))
    {
        Some(rate) => rate * weight.ceil(),
        None => {
            crate::warn_println!(
                "Surface row {:?} has no per-kg rate, quoting 0",
                row.destination
            );
            0.0
        }
    }
}

fn laptop_price(table: &RateTable, weight: f64, destination: &str) -> f64 {
    let row = resolve_region(destination, table.rows(TariffClass::LaptopBooking));

    match row {
        Some(row) if weight <= LAPTOP_TIER_MAX_KG => tier_or_zero(row, tier::LAPTOP_UPTO_3KG),
        _ => {
            if row.is_none() {
                warn_unresolved(TariffClass::LaptopBooking, destination);
            }
            let mut price = LAPTOP_BASE_PRICE;
            if weight > LAPTOP_SURCHARGE_FROM_KG {
                price += (weight.ceil() - LAPTOP_SURCHARGE_FROM_KG) * LAPTOP_PER_KG_SURCHARGE;
            }
            price
        }
    }
}

/// A tier that is present and non-zero; a zero price defers to the next tier
fn priced_tier(row: &TariffRow, key: &str) -> Option<f64> {
    row.tier(key).filter(|price| *price != 0.0)
}

fn tier_or_zero(row: &TariffRow, key: &str) -> f64 {
    row.tier(key).unwrap_or_else(|| {
        crate::warn_println!("Row {:?} has no {} price, quoting 0", row.destination, key);
        0.0
    })
}

fn warn_unresolved(class: TariffClass, destination: &str) {
    crate::warn_println!("No {} row for {:?}", class, destination);
}

/// Stateless quoting service over a shared, immutable tariff table
#[derive(Debug, Clone)]
pub struct RateCalculator {
    table: Arc<RateTable>,
}

impl RateCalculator {
    pub fn new(table: Arc<RateTable>) -> Self {
        Self { table }
    }

    /// Calculator over the builtin dataset
    pub fn builtin() -> Self {
        Self::new(RateTable::builtin())
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn calculate_rate(
        &self,
        weight: f64,
        destination: &str,
        package_type: PackageType,
        service_type: Option<ServiceType>,
    ) -> Result<f64, RateError> {
        calculate_rate(&self.table, weight, destination, package_type, service_type)
    }

    /// Price a request and echo it back in quote form
    pub fn quote(&self, request: &RateRequest) -> Result<Quote, RateError> {
        let cost = self.calculate_rate(
            request.weight,
            &request.destination,
            request.package_type,
            request.service_type,
        )?;

        Ok(Quote {
            weight: request.weight,
            destination: request.destination.clone(),
            service_type: request.service_type,
            cost,
            currency: CURRENCY.to_string(),
        })
    }
}

impl Default for RateCalculator {
    fn default() -> Self {
        Self::builtin()
    }
}
