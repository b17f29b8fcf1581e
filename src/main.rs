use chrono::Local;
use courier_rates::booking::{
    branch_scope, BookingRequest, BookingService, JsonFileStore, Operator,
};
use courier_rates::cli::{Cli, Command};
use courier_rates::config::{Config, ConfigLoader};
use courier_rates::tariff::{RateCalculator, RateRequest, RateTable};
use std::fs;
use std::io::{self, Read};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        Config::init()?;
        return Ok(());
    }

    let mut config = ConfigLoader::load();
    if let Some(rates) = &cli.rates {
        config.rates.path = Some(rates.clone());
    }
    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        let table = RateTable::load_with_fallback(config.rates.path.as_deref());
        table.check()?;
        println!("✓ Configuration valid ({} tariff rows)", table.row_count());
        return Ok(());
    }

    let Some(command) = cli.command else {
        eprintln!("Nothing to do. Try `courier quote --help` or `courier --help`.");
        std::process::exit(2);
    };

    let calculator = RateCalculator::new(RateTable::load_with_fallback(
        config.rates.path.as_deref(),
    ));

    match command {
        Command::Quote {
            weight,
            destination,
            service,
            package_type,
            json,
        } => {
            let quote = calculator.quote(&RateRequest {
                weight,
                destination,
                package_type,
                service_type: service,
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!(
                    "₹{:.2} {} · {}kg to {} ({})",
                    quote.cost,
                    quote.currency,
                    quote.weight,
                    quote.destination,
                    quote.service_type.unwrap_or_default()
                );
            }
        }
        Command::Book {
            request,
            operator,
            branch,
        } => {
            let content = if request.as_os_str() == "-" {
                let mut buf = String::new();
                io::stdin().lock().read_to_string(&mut buf)?;
                buf
            } else {
                fs::read_to_string(&request)?
            };
            let booking: BookingRequest = serde_json::from_str(&content)?;
            let operator = Operator::new(operator.unwrap_or_default(), branch);

            let receipt = open_service(&config, calculator)?.book(booking, &operator)?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Command::Track { id } => {
            let view = open_service(&config, calculator)?.track(&id)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Command::Status {
            id,
            status,
            location,
        } => {
            let updated = open_service(&config, calculator)?.update_status(
                &id,
                status,
                location.as_deref(),
            )?;
            println!(
                "✓ {} is now {} at {}",
                updated.id, updated.status, updated.branch
            );
        }
        Command::Stats {
            branch,
            operator_branch,
        } => {
            let operator = operator_branch.map(|b| Operator::new("", Some(b)));
            let scope = branch_scope(branch.as_deref(), operator.as_ref(), &config.desk);
            let stats = open_service(&config, calculator)?.dashboard_stats(scope.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Daily { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let report = open_service(&config, calculator)?.daily_report(date)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Booking service over the configured JSON store
fn open_service(
    config: &Config,
    calculator: RateCalculator,
) -> courier_rates::Result<BookingService<JsonFileStore>> {
    let store = JsonFileStore::open(&config.store.path)?;
    Ok(BookingService::new(calculator, store).with_default_branch(&config.desk.default_branch))
}
