pub mod calculator;
pub mod region;
pub mod table;
pub mod types;

pub use calculator::{calculate_rate, RateCalculator, CURRENCY};
pub use region::{resolve_region, RegionMatch, RegionRule};
pub use table::{RateTable, TariffSheet};
pub use types::{tier, PackageType, Quote, RateRequest, ServiceType, TariffClass, TariffRow};
