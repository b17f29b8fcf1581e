use courier_rates::tariff::{
    calculate_rate, resolve_region, tier, PackageType, RateTable, ServiceType, TariffClass,
    TariffRow,
};
use courier_rates::{RateCalculator, RateError};

fn builtin_row(class: TariffClass, label: &str) -> TariffRow {
    RateTable::builtin()
        .rows(class)
        .iter()
        .find(|r| r.destination == label)
        .cloned()
        .unwrap_or_else(|| panic!("builtin {} has no {} row", class, label))
}

fn quote(weight: f64, destination: &str, service: Option<ServiceType>) -> Result<f64, RateError> {
    RateCalculator::builtin().calculate_rate(weight, destination, PackageType::NonDocument, service)
}

#[test]
fn quarter_kg_tier_for_light_domestic_parcels() {
    let row = builtin_row(TariffClass::DomesticSlab, "TAMILNADU & PONDICHERRY");
    let expected = row.tier(tier::UPTO_250G).unwrap();

    for w in [0.001, 0.1, 0.2, 0.25] {
        assert_eq!(quote(w, "Coimbatore, Tamil Nadu", None), Ok(expected), "weight {}", w);
    }
}

#[test]
fn domestic_between_one_and_five_kg_is_linear_in_ceiled_weight() {
    let row = builtin_row(TariffClass::DomesticSlab, "KERALA & KARNATAKA");
    let per_kg = row.tier(tier::UPTO_1KG).unwrap();

    assert_eq!(quote(2.3, "Mysore KARNATAKA", None), Ok(per_kg * 3.0));
    assert_eq!(quote(4.0, "Mysore KARNATAKA", None), Ok(per_kg * 4.0));
    assert_eq!(quote(4.01, "Mysore KARNATAKA", None), Ok(per_kg * 5.0));
}

#[test]
fn heavy_domestic_parcels_price_as_air_cargo() {
    let row = builtin_row(TariffClass::AirCargoAbove5kg, "MUMBAI, DELHI & METRO CITIES");
    let rate = row.tier(tier::AIR_6_TO_25KG).unwrap();

    for w in [5.01, 9.5, 25.0, 40.2] {
        let expected = rate * f64::ceil(w);
        assert_eq!(quote(w, "KOLKATA", None), Ok(expected));
        assert_eq!(quote(w, "KOLKATA", Some(ServiceType::Domestic)), Ok(expected));
        assert_eq!(quote(w, "KOLKATA", Some(ServiceType::AirCargo)), Ok(expected));
    }
}

#[test]
fn pondicherry_resolves_through_tamil_group() {
    let table = RateTable::builtin();
    for class in TariffClass::ALL {
        let row = resolve_region("PONDICHERRY", table.rows(class)).unwrap();
        assert!(row.destination.contains("TAMILNADU"), "{}: {}", class, row.destination);
    }
}

#[test]
fn city_aliases_are_not_expanded() {
    let table = RateTable::builtin();
    let row = resolve_region("BOMBAY SUBURB", table.rows(TariffClass::DomesticSlab)).unwrap();
    assert_eq!(row.destination, "NORTH INDIA & OTHER PLACES");

    let row = resolve_region("NAVI MUMBAI", table.rows(TariffClass::DomesticSlab)).unwrap();
    assert_eq!(row.destination, "MUMBAI, DELHI & METRO CITIES");
}

#[test]
fn laptop_pricing_rules() {
    let row = builtin_row(TariffClass::LaptopBooking, "KERALA & KARNATAKA");
    let upto_3 = row.tier(tier::LAPTOP_UPTO_3KG).unwrap();

    assert_eq!(quote(3.0, "KERALA", Some(ServiceType::Laptop)), Ok(upto_3));
    assert_eq!(quote(3.5, "KERALA", Some(ServiceType::Laptop)), Ok(1600.0));
    assert_eq!(quote(7.0, "KERALA", Some(ServiceType::Laptop)), Ok(2000.0));
}

#[test]
fn unresolved_destination_policy_differs_by_service() {
    let mut table = RateTable::builtin().as_ref().clone();
    for class in TariffClass::ALL {
        let rows = match class {
            TariffClass::DomesticSlab => &mut table.domestic.rates,
            TariffClass::AirCargoAbove5kg => &mut table.air_cargo.rates,
            TariffClass::SurfaceAbove5kg => &mut table.surface.rates,
            TariffClass::LaptopBooking => &mut table.laptop.rates,
        };
        rows.retain(|r| !r.destination.contains("OTHER PLACE"));
    }

    let domestic = calculate_rate(&table, 2.0, "Jaipur", PackageType::Document, None);
    assert_eq!(domestic, Err(RateError::DestinationNotFound("Jaipur".to_string())));

    let surface = calculate_rate(&table, 12.0, "Jaipur", PackageType::NonDocument, Some(ServiceType::Surface));
    assert_eq!(surface, Ok(0.0));

    let air = calculate_rate(&table, 12.0, "Jaipur", PackageType::NonDocument, Some(ServiceType::AirCargo));
    assert_eq!(air, Ok(0.0));
}

#[test]
fn quotes_are_deterministic() {
    let calc = RateCalculator::builtin();
    let services = [
        None,
        Some(ServiceType::Domestic),
        Some(ServiceType::AirCargo),
        Some(ServiceType::Surface),
        Some(ServiceType::Laptop),
    ];

    for service in services {
        for w in [0.2, 0.9, 3.3, 6.0, 27.5] {
            let first = calc.calculate_rate(w, "Hyderabad", PackageType::NonDocument, service);
            let second = calc.calculate_rate(w, "Hyderabad", PackageType::NonDocument, service);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn calculator_is_shareable_across_threads() {
    let calc = RateCalculator::builtin();
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let calc = calc.clone();
            std::thread::spawn(move || {
                calc.calculate_rate(i as f64, "Chennai", PackageType::NonDocument, None)
            })
        })
        .collect();

    let row = builtin_row(TariffClass::DomesticSlab, "NORTH INDIA & OTHER PLACES");
    let per_kg = row.tier(tier::UPTO_1KG).unwrap();
    for (i, handle) in handles.into_iter().enumerate() {
        let price = handle.join().unwrap().unwrap();
        assert_eq!(price, per_kg * (i + 1) as f64);
    }
}
