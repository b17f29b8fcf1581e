use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use crate::booking::ConsignmentStatus;
use crate::tariff::{PackageType, ServiceType};

#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(version, about = "Courier booking desk: tariff quotes, bookings and tracking")]
pub struct Cli {
    /// Initialize config file and an editable tariff dataset
    #[arg(long = "init")]
    pub init: bool,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Check configuration and tariff dataset
    #[arg(long = "check")]
    pub check: bool,

    /// Tariff dataset to use instead of the configured one
    #[arg(long = "rates", value_name = "FILE", global = true)]
    pub rates: Option<PathBuf>,

    /// Consignment store to use instead of the configured one
    #[arg(long = "store", value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Quote a price for a shipment
    Quote {
        /// Weight in kg
        #[arg(short = 'w', long)]
        weight: f64,

        /// Destination, e.g. "Pondicherry" or "NEW DELHI"
        #[arg(short = 'd', long)]
        destination: String,

        /// Domestic (default), "Air Cargo", Surface, Laptop
        #[arg(short = 's', long = "service")]
        service: Option<ServiceType>,

        /// Document or Non-Document
        #[arg(short = 't', long = "type", default_value = "Non-Document")]
        package_type: PackageType,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Book a consignment from a JSON booking request ("-" reads stdin)
    Book {
        #[arg(value_name = "FILE")]
        request: PathBuf,

        /// Username of the employee processing the booking
        #[arg(long)]
        operator: Option<String>,

        /// Branch of the employee processing the booking
        #[arg(long)]
        branch: Option<String>,
    },

    /// Show a consignment with its delivery timeline
    Track {
        id: Uuid,
    },

    /// Update a consignment's status
    Status {
        id: Uuid,

        /// Booked, "In Transit", "Out for Delivery", Delivered, Cancelled
        status: ConsignmentStatus,

        /// Current location (defaults to Hub)
        #[arg(short = 'l', long)]
        location: Option<String>,
    },

    /// Dashboard totals and recent bookings
    Stats {
        /// Branch filter ("All Branches" for none)
        #[arg(long)]
        branch: Option<String>,

        /// Branch of the operator asking; non head-office operators only see their own
        #[arg(long = "operator-branch")]
        operator_branch: Option<String>,
    },

    /// End-of-day collection by operator
    Daily {
        /// Local date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "courier", "quote", "-w", "2.5", "-d", "Pondicherry", "-s", "Air Cargo",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Quote {
                weight,
                destination,
                service,
                package_type,
                json,
            }) => {
                assert_eq!(weight, 2.5);
                assert_eq!(destination, "Pondicherry");
                assert_eq!(service, Some(ServiceType::AirCargo));
                assert_eq!(package_type, PackageType::NonDocument);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_status() {
        let id = Uuid::new_v4().to_string();
        let cli = Cli::try_parse_from(["courier", "status", id.as_str(), "out for delivery"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Status {
                status: ConsignmentStatus::OutForDelivery,
                location: None,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_service() {
        let result = Cli::try_parse_from(["courier", "quote", "-w", "1", "-d", "x", "-s", "Express"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_flags() {
        let cli = Cli::try_parse_from(["courier", "--check", "--rates", "/tmp/rates.json"]).unwrap();
        assert!(cli.check);
        assert_eq!(cli.rates, Some(PathBuf::from("/tmp/rates.json")));
        assert!(cli.command.is_none());
    }
}
