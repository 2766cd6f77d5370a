//! Availability resolution
//!
//! Combines the capacity check and the rate calculator into a single
//! caller-facing verdict. Results are ephemeral hints: another booking can
//! land the moment after a query returns, which is why every capacity-
//! consuming mutation re-validates under the vessel lock.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::overlap::{CapacityVerdict, OverlapChecker};
use super::rates;
use crate::domain::{DateRange, DomainError, DomainResult, Vessel, VesselCatalog};

/// Verdict for one availability query. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityResult {
    pub is_available: bool,
    pub total_price_cents: i64,
    pub message: String,
}

impl AvailabilityResult {
    fn available(total_price_cents: i64) -> Self {
        Self {
            is_available: true,
            total_price_cents,
            message: "Available for booking".to_string(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            is_available: false,
            total_price_cents: 0,
            message: message.into(),
        }
    }
}

pub struct AvailabilityResolver {
    catalog: Arc<dyn VesselCatalog>,
    overlap: OverlapChecker,
}

impl AvailabilityResolver {
    pub fn new(catalog: Arc<dyn VesselCatalog>, overlap: OverlapChecker) -> Self {
        Self { catalog, overlap }
    }

    /// Informational availability query. Read-only and idempotent; not
    /// serialized against mutations, so the answer can go stale.
    pub async fn check(
        &self,
        vessel_id: &str,
        range: &DateRange,
        guest_count: u32,
        cabin_count: Option<u32>,
    ) -> DomainResult<AvailabilityResult> {
        validate_request(range, guest_count)?;
        self.evaluate(vessel_id, range, guest_count, cabin_count, None)
            .await
    }

    /// Capacity + price evaluation without the request-freshness checks.
    ///
    /// Used by the booking lifecycle when re-validating under the vessel
    /// lock: a confirmation may legitimately happen after the stay has
    /// drawn close, and must not re-count the reservation being confirmed
    /// (`exclude`).
    pub(crate) async fn evaluate(
        &self,
        vessel_id: &str,
        range: &DateRange,
        guest_count: u32,
        cabin_count: Option<u32>,
        exclude: Option<Uuid>,
    ) -> DomainResult<AvailabilityResult> {
        let vessel = self.lookup_active_vessel(vessel_id).await?;
        let units = vessel.units_for_request(guest_count, cabin_count)?;

        let verdict = self
            .overlap
            .check(&vessel, range, units, guest_count, exclude)
            .await?;

        Ok(match verdict {
            CapacityVerdict::Available => {
                AvailabilityResult::available(rates::compute_price(&vessel, range))
            }
            CapacityVerdict::FullyBooked => {
                AvailabilityResult::rejected("Vessel is fully booked for these dates")
            }
            CapacityVerdict::PartyTooLarge => {
                AvailabilityResult::rejected("Party size exceeds vessel capacity")
            }
        })
    }

    async fn lookup_active_vessel(&self, vessel_id: &str) -> DomainResult<Vessel> {
        let vessel = self
            .catalog
            .find_by_id(vessel_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Vessel",
                field: "id",
                value: vessel_id.to_string(),
            })?;

        if !vessel.is_active {
            return Err(DomainError::NotFound {
                entity: "Vessel",
                field: "id",
                value: format!("{} (inactive)", vessel_id),
            });
        }

        Ok(vessel)
    }
}

fn validate_request(range: &DateRange, guest_count: u32) -> DomainResult<()> {
    if guest_count < 1 {
        return Err(DomainError::validation(
            "guest_count",
            "guest count must be at least 1",
        ));
    }

    let today = Utc::now().date_naive();
    if range.start() < today {
        return Err(DomainError::validation(
            "start_date",
            format!("start date {} is in the past", range.start()),
        ));
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CapacityModel, CustomerContact, PricingModel, Reservation, ReservationRepository,
    };
    use crate::infrastructure::memory::{InMemoryReservationRepository, InMemoryVesselCatalog};
    use chrono::{Days, NaiveDate};

    fn future(day_offset: u64) -> NaiveDate {
        Utc::now().date_naive() + Days::new(30 + day_offset)
    }

    fn future_range(from: u64, to: u64) -> DateRange {
        DateRange::new(future(from), future(to)).unwrap()
    }

    fn vessel(id: &str, max_guests: u32, nightly_rate_cents: i64) -> Vessel {
        Vessel {
            id: id.into(),
            name: format!("Vessel {}", id),
            pricing: PricingModel::PerNight { nightly_rate_cents },
            capacity: CapacityModel::Guests { max_guests },
            is_active: true,
        }
    }

    fn contact() -> CustomerContact {
        CustomerContact {
            name: "Guest".into(),
            email: "guest@example.com".into(),
            phone: "+20 100 000 0000".into(),
            special_requests: None,
        }
    }

    struct Fixture {
        repo: Arc<InMemoryReservationRepository>,
        resolver: AvailabilityResolver,
    }

    fn fixture(vessels: Vec<Vessel>) -> Fixture {
        let repo = Arc::new(InMemoryReservationRepository::new());
        let catalog = Arc::new(InMemoryVesselCatalog::new());
        for v in vessels {
            catalog.insert(v);
        }
        let resolver =
            AvailabilityResolver::new(catalog, OverlapChecker::new(repo.clone()));
        Fixture { repo, resolver }
    }

    #[tokio::test]
    async fn available_vessel_quotes_price() {
        let f = fixture(vec![vessel("dhb-001", 4, 20_000)]);
        let result = f
            .resolver
            .check("dhb-001", &future_range(0, 7), 2, None)
            .await
            .unwrap();

        assert!(result.is_available);
        assert_eq!(result.total_price_cents, 140_000);
        assert_eq!(result.message, "Available for booking");
    }

    #[tokio::test]
    async fn unknown_and_inactive_vessels_are_not_found() {
        let mut inactive = vessel("dhb-002", 4, 20_000);
        inactive.is_active = false;
        let f = fixture(vec![inactive]);

        let err = f
            .resolver
            .check("missing", &future_range(0, 3), 2, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Vessel", .. }));

        let err = f
            .resolver
            .check("dhb-002", &future_range(0, 3), 2, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn past_start_date_is_a_validation_error() {
        let f = fixture(vec![vessel("dhb-001", 4, 20_000)]);
        let yesterday = Utc::now().date_naive() - Days::new(1);
        let range = DateRange::new(yesterday, yesterday + Days::new(3)).unwrap();

        let err = f.resolver.check("dhb-001", &range, 2, None).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "start_date", .. }
        ));
    }

    #[tokio::test]
    async fn zero_guests_is_a_validation_error() {
        let f = fixture(vec![vessel("dhb-001", 4, 20_000)]);
        let err = f
            .resolver
            .check("dhb-001", &future_range(0, 3), 0, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "guest_count", .. }
        ));
    }

    #[tokio::test]
    async fn capacity_boundary_accepts_exact_and_rejects_over() {
        let f = fixture(vec![vessel("dhb-001", 4, 20_000)]);
        let range = future_range(0, 5);

        let exact = f.resolver.check("dhb-001", &range, 4, None).await.unwrap();
        assert!(exact.is_available);

        let over = f.resolver.check("dhb-001", &range, 5, None).await.unwrap();
        assert!(!over.is_available);
        assert_eq!(over.total_price_cents, 0);
        assert_eq!(over.message, "Party size exceeds vessel capacity");
    }

    #[tokio::test]
    async fn booked_out_window_reports_fully_booked() {
        // Vessel with 2 berths at $300/night, confirmed 5-night booking.
        let f = fixture(vec![vessel("dhb-001", 2, 30_000)]);
        let mut existing = Reservation::new(
            "dhb-001",
            future_range(10, 15),
            2,
            None,
            150_000,
            contact(),
        );
        existing.confirm().unwrap();
        f.repo.save(existing).await.unwrap();

        // Overlapping window: no capacity on shared nights.
        let blocked = f
            .resolver
            .check("dhb-001", &future_range(12, 16), 1, None)
            .await
            .unwrap();
        assert!(!blocked.is_available);
        assert_eq!(blocked.message, "Vessel is fully booked for these dates");
        assert_eq!(blocked.total_price_cents, 0);

        // Back-to-back window starting on the checkout day: 3 nights free.
        let open = f
            .resolver
            .check("dhb-001", &future_range(15, 18), 2, None)
            .await
            .unwrap();
        assert!(open.is_available);
        assert_eq!(open.total_price_cents, 90_000);
    }
}
