use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::report::{daily_report, dashboard_stats, DailyReport, DashboardStats};
use super::tracking::{build_tracking, TrackingView, HUB_LOCATION};
use super::{
    BookingReceipt, BookingRequest, Consignment, ConsignmentStatus, ConsignmentStore, Cost,
    Operator,
};
use crate::config::DEFAULT_BRANCH;
use crate::error::{Error, Result};
use crate::tariff::{RateCalculator, CURRENCY};

/// Books, tracks and reports consignments over a store
pub struct BookingService<S: ConsignmentStore> {
    calculator: RateCalculator,
    store: S,
    default_branch: String,
}

impl<S: ConsignmentStore> BookingService<S> {
    pub fn new(calculator: RateCalculator, store: S) -> Self {
        Self {
            calculator,
            store,
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }

    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }

    pub fn calculator(&self) -> &RateCalculator {
        &self.calculator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Price and persist a booking
    ///
    /// The stored cost is always the calculator's; a client-supplied cost is
    /// logged and discarded. An unpriceable domestic destination rejects the
    /// booking before anything is written.
    pub fn book(&mut self, request: BookingRequest, operator: &Operator) -> Result<BookingReceipt> {
        let amount = self.calculator.calculate_rate(
            request.package_details.weight,
            &request.receiver.destination,
            request.package_details.package_type,
            request.service_type,
        )?;

        eprintln!(
            "[AUDIT] Booking by {}. Client cost: {}. Server cost: {}",
            request.sender.name,
            request
                .cost
                .map(|c| format!("{} (ignored)", c))
                .unwrap_or_else(|| "none".to_string()),
            amount
        );

        let branch = operator
            .branch
            .clone()
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| self.default_branch.clone());

        let consignment = Consignment {
            id: Uuid::new_v4(),
            sender: request.sender,
            receiver: request.receiver,
            package_details: request.package_details,
            service_type: request.service_type.unwrap_or_default(),
            consignment_type: request.consignment_type,
            cost: Cost::inr(amount),
            status: ConsignmentStatus::Booked,
            // No OTP check runs on this desk
            otp_verified: false,
            branch,
            processed_by: Some(operator.username.clone()).filter(|u| !u.is_empty()),
            booking_date: Utc::now(),
        };
        let id = consignment.id;

        self.store.insert(consignment)?;
        crate::debug_println!("Booked consignment {} at {}", id, amount);

        Ok(BookingReceipt {
            consignment_id: id,
            verified_cost: amount,
            currency: CURRENCY.to_string(),
        })
    }

    pub fn get(&self, id: &Uuid) -> Result<Consignment> {
        self.store
            .get(id)?
            .ok_or_else(|| Error::ConsignmentNotFound(id.to_string()))
    }

    pub fn track(&self, id: &Uuid) -> Result<TrackingView> {
        Ok(build_tracking(&self.get(id)?))
    }

    /// Move a consignment along; its branch becomes `location`, or the hub when absent
    pub fn update_status(
        &mut self,
        id: &Uuid,
        status: ConsignmentStatus,
        location: Option<&str>,
    ) -> Result<Consignment> {
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(HUB_LOCATION);

        let updated = self
            .store
            .update_status(id, status, location)?
            .ok_or_else(|| Error::ConsignmentNotFound(id.to_string()))?;

        crate::debug_println!("Consignment {} -> {} at {}", id, status, location);
        Ok(updated)
    }

    pub fn dashboard_stats(&self, branch: Option<&str>) -> Result<DashboardStats> {
        Ok(dashboard_stats(&self.store.list()?, branch))
    }

    pub fn daily_report(&self, date: NaiveDate) -> Result<DailyReport> {
        Ok(daily_report(&self.store.list()?, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::testing::booking_request;
    use crate::booking::MemoryStore;
    use crate::error::RateError;
    use crate::tariff::{ServiceType, TariffRow, RateTable, tier};
    use std::sync::Arc;

    fn service() -> BookingService<MemoryStore> {
        let mut table = RateTable::default();
        table.domestic.rates = vec![TariffRow::new("TAMILNADU")
            .with_tier(tier::UPTO_250G, 40.0)
            .with_tier(tier::UPTO_500G, 50.0)
            .with_tier(tier::UPTO_1KG, 100.0)];
        table.surface.rates = vec![TariffRow::new("TAMILNADU").with_tier(tier::SURFACE_PER_25KG, 28.0)];

        BookingService::new(RateCalculator::new(Arc::new(table)), MemoryStore::new())
    }

    #[test]
    fn test_book_ignores_client_cost() {
        let mut svc = service();
        let mut request = booking_request("Madurai, Tamil Nadu", 2.3, None);
        request.cost = Some(1.0);
        let operator = Operator::new("kavi", Some("Erode".to_string()));

        let receipt = svc.book(request, &operator).unwrap();
        assert_eq!(receipt.verified_cost, 300.0);
        assert_eq!(receipt.currency, "INR");

        let stored = svc.get(&receipt.consignment_id).unwrap();
        assert_eq!(stored.cost, Cost::inr(300.0));
        assert_eq!(stored.status, ConsignmentStatus::Booked);
        assert_eq!(stored.branch, "Erode");
        assert_eq!(stored.processed_by.as_deref(), Some("kavi"));
        assert_eq!(stored.service_type, ServiceType::Domestic);
    }

    #[test]
    fn test_book_never_trusts_client_verification() {
        let mut svc = service();
        let request: BookingRequest = serde_json::from_value(serde_json::json!({
            "sender": {"name": "Ravi", "email": "ravi@example.com", "phone": "9000000001",
                       "address": "12 Avinashi Rd", "pincode": "641018"},
            "receiver": {"name": "Anu", "phone": "9000000002", "address": "4 Main Rd",
                         "destination": "TAMILNADU", "pincode": "600001"},
            "packageDetails": {"weight": 0.2, "type": "Document"},
            "otpVerified": true
        }))
        .unwrap();

        let receipt = svc.book(request, &Operator::default()).unwrap();
        assert!(!svc.get(&receipt.consignment_id).unwrap().otp_verified);
    }

    #[test]
    fn test_book_uses_default_branch() {
        let mut svc = service().with_default_branch("Headquarters");
        let receipt = svc
            .book(booking_request("TAMILNADU", 0.2, None), &Operator::default())
            .unwrap();

        let stored = svc.get(&receipt.consignment_id).unwrap();
        assert_eq!(stored.branch, "Headquarters");
        assert_eq!(stored.processed_by, None);
        assert_eq!(stored.cost.amount, 40.0);
    }

    #[test]
    fn test_book_rejects_unknown_domestic_destination() {
        let mut svc = service();
        let result = svc.book(booking_request("JAIPUR", 1.0, None), &Operator::default());

        assert!(matches!(
            result,
            Err(Error::Rate(RateError::DestinationNotFound(_)))
        ));
        assert!(svc.store().is_empty());
    }

    #[test]
    fn test_book_surface_unresolved_stores_zero() {
        let mut svc = service();
        let receipt = svc
            .book(
                booking_request("JAIPUR", 8.0, Some(ServiceType::Surface)),
                &Operator::default(),
            )
            .unwrap();
        assert_eq!(receipt.verified_cost, 0.0);
    }

    #[test]
    fn test_track_and_update_status() {
        let mut svc = service();
        let receipt = svc
            .book(booking_request("TAMILNADU", 0.4, None), &Operator::default())
            .unwrap();
        let id = receipt.consignment_id;

        let updated = svc
            .update_status(&id, ConsignmentStatus::InTransit, None)
            .unwrap();
        assert_eq!(updated.branch, "Hub");

        svc.update_status(&id, ConsignmentStatus::Delivered, Some(" Madurai "))
            .unwrap();
        let view = svc.track(&id).unwrap();
        assert_eq!(view.consignment.status, ConsignmentStatus::Delivered);
        assert_eq!(view.consignment.branch, "Madurai");
        assert!(view.history.iter().all(|s| s.completed));
    }

    #[test]
    fn test_unknown_consignment() {
        let mut svc = service();
        let id = Uuid::new_v4();
        assert!(matches!(svc.track(&id), Err(Error::ConsignmentNotFound(_))));
        assert!(matches!(
            svc.update_status(&id, ConsignmentStatus::Delivered, None),
            Err(Error::ConsignmentNotFound(_))
        ));
    }

    #[test]
    fn test_stats_through_service() {
        let mut svc = service();
        let erode = Operator::new("kavi", Some("Erode".to_string()));
        svc.book(booking_request("TAMILNADU", 0.2, None), &erode).unwrap();
        svc.book(booking_request("TAMILNADU", 0.4, None), &Operator::default())
            .unwrap();

        let all = svc.dashboard_stats(None).unwrap();
        assert_eq!(all.total_bookings, 2);
        assert_eq!(all.total_revenue, 90.0);

        let scoped = svc.dashboard_stats(Some("Erode")).unwrap();
        assert_eq!(scoped.total_bookings, 1);

        let today = chrono::Local::now().date_naive();
        let report = svc.daily_report(today).unwrap();
        assert_eq!(report.booking_count, 2);
        assert_eq!(report.by_operator.get("kavi"), Some(&40.0));
        assert_eq!(report.by_operator.get("Unknown"), Some(&50.0));
    }
}
