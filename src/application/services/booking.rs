//! Reservation lifecycle
//!
//! Owns the Pending -> Confirmed / Cancelled state machine and the
//! check-then-commit discipline: every capacity-consuming mutation
//! re-validates availability and writes the store while holding the
//! per-vessel lock, so concurrent requests can never jointly oversell a
//! vessel. Informational availability reads stay lock-free.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::availability::{AvailabilityResolver, AvailabilityResult};
use crate::domain::{
    CustomerContact, DateRange, DomainError, DomainResult, Reservation, ReservationRepository,
    ReservationStatus, VesselCatalog,
};
use crate::infrastructure::locks::VesselLocks;
use crate::shared::types::PaginatedResult;

/// A validated booking submission.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub vessel_id: String,
    pub dates: DateRange,
    pub guest_count: u32,
    pub cabin_count: Option<u32>,
    pub customer: CustomerContact,
}

pub struct BookingService {
    reservations: Arc<dyn ReservationRepository>,
    resolver: AvailabilityResolver,
    locks: VesselLocks,
    lock_timeout: Duration,
}

impl BookingService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        catalog: Arc<dyn VesselCatalog>,
        lock_timeout: Duration,
    ) -> Self {
        let overlap = super::overlap::OverlapChecker::new(reservations.clone());
        Self {
            reservations,
            resolver: AvailabilityResolver::new(catalog, overlap),
            locks: VesselLocks::new(),
            lock_timeout,
        }
    }

    /// Informational availability query; see [`AvailabilityResolver::check`].
    pub async fn check_availability(
        &self,
        vessel_id: &str,
        range: &DateRange,
        guest_count: u32,
        cabin_count: Option<u32>,
    ) -> DomainResult<AvailabilityResult> {
        self.resolver
            .check(vessel_id, range, guest_count, cabin_count)
            .await
    }

    /// Create a Pending reservation.
    ///
    /// Availability is re-checked under the vessel lock even if the caller
    /// just saw an "available" answer; the earlier answer is a hint, not a
    /// promise. The persisted price is always the server-computed quote.
    pub async fn create(&self, request: CreateReservation) -> DomainResult<Reservation> {
        let _guard = self
            .locks
            .acquire(&request.vessel_id, self.lock_timeout)
            .await?;

        let verdict = self
            .resolver
            .check(
                &request.vessel_id,
                &request.dates,
                request.guest_count,
                request.cabin_count,
            )
            .await?;

        if !verdict.is_available {
            debug!(vessel_id = %request.vessel_id, dates = %request.dates, reason = %verdict.message, "Booking rejected");
            return Err(DomainError::unavailable(verdict.message));
        }

        let reservation = Reservation::new(
            request.vessel_id,
            request.dates,
            request.guest_count,
            request.cabin_count,
            verdict.total_price_cents,
            request.customer,
        );

        self.reservations.save(reservation.clone()).await?;

        info!(
            reservation_id = %reservation.id,
            vessel_id = %reservation.vessel_id,
            dates = %reservation.dates,
            guests = reservation.guest_count,
            total_cents = reservation.total_price_cents,
            "Reservation created"
        );

        Ok(reservation)
    }

    /// Confirm a Pending reservation.
    ///
    /// Re-validates availability one final time, excluding the
    /// reservation's own Pending contribution, and recomputes the price
    /// from current catalog data. If a competing booking consumed the
    /// capacity in the interim the reservation is left Pending for manual
    /// resolution and `Unavailable` is returned.
    pub async fn confirm(&self, id: Uuid) -> DomainResult<Reservation> {
        let reservation = self.get(id).await?;

        match reservation.status {
            // Idempotent: confirming a confirmed booking changes nothing.
            ReservationStatus::Confirmed => return Ok(reservation),
            ReservationStatus::Cancelled => {
                return Err(DomainError::InvalidTransition {
                    from: reservation.status.to_string(),
                    to: ReservationStatus::Confirmed.to_string(),
                })
            }
            ReservationStatus::Pending => {}
        }

        let _guard = self
            .locks
            .acquire(&reservation.vessel_id, self.lock_timeout)
            .await?;

        // Re-read inside the lock: a concurrent confirm or cancel may have
        // raced us to the status change.
        let mut reservation = self.get(id).await?;
        match reservation.status {
            ReservationStatus::Confirmed => return Ok(reservation),
            ReservationStatus::Cancelled => {
                return Err(DomainError::InvalidTransition {
                    from: reservation.status.to_string(),
                    to: ReservationStatus::Confirmed.to_string(),
                })
            }
            ReservationStatus::Pending => {}
        }

        let verdict = self
            .resolver
            .evaluate(
                &reservation.vessel_id,
                &reservation.dates,
                reservation.guest_count,
                reservation.cabin_count,
                Some(reservation.id),
            )
            .await?;

        if !verdict.is_available {
            warn!(
                reservation_id = %reservation.id,
                vessel_id = %reservation.vessel_id,
                reason = %verdict.message,
                "Confirmation blocked; reservation left pending"
            );
            return Err(DomainError::unavailable(verdict.message));
        }

        reservation.total_price_cents = verdict.total_price_cents;
        reservation.confirm()?;
        self.reservations.update(reservation.clone()).await?;

        info!(
            reservation_id = %reservation.id,
            vessel_id = %reservation.vessel_id,
            total_cents = reservation.total_price_cents,
            "Reservation confirmed"
        );

        Ok(reservation)
    }

    /// Cancel a reservation. Idempotent on Cancelled; frees the capacity
    /// for all future overlap checks.
    ///
    /// Takes the vessel lock even though cancellation only releases
    /// capacity: the write must be serialized against a confirmation in
    /// flight for the same record, or the confirm could overwrite the
    /// cancel from its pre-cancel copy and resurrect the reservation.
    pub async fn cancel(&self, id: Uuid) -> DomainResult<Reservation> {
        let reservation = self.get(id).await?;

        if reservation.status == ReservationStatus::Cancelled {
            return Ok(reservation);
        }

        let _guard = self
            .locks
            .acquire(&reservation.vessel_id, self.lock_timeout)
            .await?;

        let mut reservation = self.get(id).await?;
        if reservation.status == ReservationStatus::Cancelled {
            return Ok(reservation);
        }

        reservation.cancel();
        self.reservations.update(reservation.clone()).await?;

        info!(
            reservation_id = %reservation.id,
            vessel_id = %reservation.vessel_id,
            "Reservation cancelled"
        );

        Ok(reservation)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn list(
        &self,
        vessel_id: Option<&str>,
        page: u64,
        limit: u64,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        let (items, total) = self.reservations.find_page(vessel_id, page, limit).await?;
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    /// Cancel Pending reservations older than `ttl`. Returns how many were
    /// swept. Driven by the background expiry task.
    pub async fn expire_stale_pending(&self, ttl: chrono::Duration) -> DomainResult<usize> {
        let cutoff = Utc::now() - ttl;
        let stale = self.reservations.find_stale_pending(cutoff).await?;
        let mut swept = 0;

        for reservation in stale {
            match self.cancel(reservation.id).await {
                Ok(_) => swept += 1,
                Err(e) => warn!(
                    reservation_id = %reservation.id,
                    error = %e,
                    "Failed to expire stale pending reservation"
                ),
            }
        }

        Ok(swept)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CapacityModel, PricingModel, Vessel};
    use crate::infrastructure::memory::{InMemoryReservationRepository, InMemoryVesselCatalog};
    use chrono::{Days, NaiveDate};

    fn future(day_offset: u64) -> NaiveDate {
        Utc::now().date_naive() + Days::new(30 + day_offset)
    }

    fn future_range(from: u64, to: u64) -> DateRange {
        DateRange::new(future(from), future(to)).unwrap()
    }

    fn contact(name: &str) -> CustomerContact {
        CustomerContact {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+20 100 000 0000".into(),
            special_requests: None,
        }
    }

    fn request(vessel_id: &str, from: u64, to: u64, guests: u32) -> CreateReservation {
        CreateReservation {
            vessel_id: vessel_id.into(),
            dates: future_range(from, to),
            guest_count: guests,
            cabin_count: None,
            customer: contact("Guest"),
        }
    }

    struct Fixture {
        repo: Arc<InMemoryReservationRepository>,
        service: BookingService,
    }

    fn fixture(max_guests: u32, nightly_rate_cents: i64) -> Fixture {
        let repo = Arc::new(InMemoryReservationRepository::new());
        let catalog = Arc::new(InMemoryVesselCatalog::new());
        catalog.insert(Vessel {
            id: "dhb-001".into(),
            name: "Nile Pearl".into(),
            pricing: PricingModel::PerNight { nightly_rate_cents },
            capacity: CapacityModel::Guests { max_guests },
            is_active: true,
        });
        let service = BookingService::new(
            repo.clone(),
            catalog,
            Duration::from_millis(500),
        );
        Fixture { repo, service }
    }

    #[tokio::test]
    async fn create_persists_pending_with_computed_price() {
        let f = fixture(4, 20_000);
        let created = f.service.create(request("dhb-001", 0, 7, 2)).await.unwrap();

        assert_eq!(created.status, ReservationStatus::Pending);
        assert_eq!(created.total_price_cents, 140_000);

        let stored = f.repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn create_fails_when_capacity_consumed() {
        let f = fixture(2, 30_000);
        f.service.create(request("dhb-001", 10, 15, 2)).await.unwrap();

        let err = f
            .service
            .create(request("dhb-001", 12, 16, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn failed_create_leaves_store_untouched() {
        let f = fixture(2, 30_000);
        f.service.create(request("dhb-001", 10, 15, 2)).await.unwrap();
        let before = f.repo.find_by_vessel("dhb-001").await.unwrap().len();

        let _ = f.service.create(request("dhb-001", 12, 16, 1)).await;
        let after = f.repo.find_by_vessel("dhb-001").await.unwrap().len();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn confirm_moves_pending_to_confirmed_and_is_idempotent() {
        let f = fixture(4, 20_000);
        let created = f.service.create(request("dhb-001", 0, 7, 2)).await.unwrap();

        let confirmed = f.service.confirm(created.id).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);

        let again = f.service.confirm(created.id).await.unwrap();
        assert_eq!(again.status, ReservationStatus::Confirmed);
        assert_eq!(again.updated_at, confirmed.updated_at);
    }

    #[tokio::test]
    async fn confirm_reprices_from_current_catalog() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        let catalog = Arc::new(InMemoryVesselCatalog::new());
        catalog.insert(Vessel {
            id: "dhb-001".into(),
            name: "Nile Pearl".into(),
            pricing: PricingModel::PerNight {
                nightly_rate_cents: 20_000,
            },
            capacity: CapacityModel::Guests { max_guests: 4 },
            is_active: true,
        });
        let service = BookingService::new(
            repo.clone(),
            catalog.clone(),
            Duration::from_millis(500),
        );

        let created = service.create(request("dhb-001", 0, 7, 2)).await.unwrap();
        assert_eq!(created.total_price_cents, 140_000);

        // Rate goes up before the operator confirms.
        catalog.insert(Vessel {
            id: "dhb-001".into(),
            name: "Nile Pearl".into(),
            pricing: PricingModel::PerNight {
                nightly_rate_cents: 25_000,
            },
            capacity: CapacityModel::Guests { max_guests: 4 },
            is_active: true,
        });

        let confirmed = service.confirm(created.id).await.unwrap();
        assert_eq!(confirmed.total_price_cents, 175_000);
    }

    #[tokio::test]
    async fn confirm_does_not_count_reservation_against_itself() {
        // Full-boat pending booking must still confirm.
        let f = fixture(2, 30_000);
        let created = f.service.create(request("dhb-001", 10, 15, 2)).await.unwrap();

        let confirmed = f.service.confirm(created.id).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn confirm_blocked_by_competitor_leaves_reservation_pending() {
        let f = fixture(2, 30_000);
        let held = f.service.create(request("dhb-001", 10, 15, 1)).await.unwrap();

        // A full-boat booking lands through another channel (imported from
        // the legacy system, say) while the hold is still pending.
        let mut competitor = Reservation::new(
            "dhb-001",
            future_range(10, 15),
            2,
            None,
            150_000,
            contact("Rival"),
        );
        competitor.confirm().unwrap();
        f.repo.save(competitor).await.unwrap();

        let err = f.service.confirm(held.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Unavailable { .. }));

        // Not silently cancelled: left pending for manual resolution.
        let stored = f.service.get(held.id).await.unwrap();
        assert_eq!(stored.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn confirm_after_cancel_is_invalid_transition() {
        let f = fixture(4, 20_000);
        let created = f.service.create(request("dhb-001", 0, 7, 2)).await.unwrap();
        f.service.cancel(created.id).await.unwrap();

        let err = f.service.confirm(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));

        let stored = f.service.get(created.id).await.unwrap();
        assert_eq!(stored.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_frees_capacity() {
        let f = fixture(2, 30_000);
        let created = f.service.create(request("dhb-001", 10, 15, 2)).await.unwrap();

        let cancelled = f.service.cancel(created.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        let again = f.service.cancel(created.id).await.unwrap();
        assert_eq!(again.updated_at, cancelled.updated_at);

        // The window is bookable again.
        let rebooked = f.service.create(request("dhb-001", 10, 15, 2)).await.unwrap();
        assert_eq!(rebooked.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn racing_confirm_and_cancel_never_resurrect_a_cancellation() {
        // Whatever the interleaving, a cancel must stick: either it lands
        // first and the confirm is rejected, or the confirm lands first and
        // the cancel supersedes it. The record must never end Confirmed
        // with a cancel acknowledged.
        for round in 0..20 {
            let f = fixture(4, 20_000);
            let created = f
                .service
                .create(request("dhb-001", round, round + 5, 2))
                .await
                .unwrap();
            let service = Arc::new(f.service);

            let confirm = {
                let svc = service.clone();
                tokio::spawn(async move { svc.confirm(created.id).await })
            };
            let cancel = {
                let svc = service.clone();
                tokio::spawn(async move { svc.cancel(created.id).await })
            };

            let confirm_result = confirm.await.unwrap();
            let cancelled = cancel.await.unwrap().unwrap();
            assert_eq!(cancelled.status, ReservationStatus::Cancelled);

            if let Err(e) = confirm_result {
                assert!(matches!(e, DomainError::InvalidTransition { .. }));
            }

            let stored = service.get(created.id).await.unwrap();
            assert_eq!(stored.status, ReservationStatus::Cancelled);
        }
    }

    #[tokio::test]
    async fn unknown_reservation_is_not_found() {
        let f = fixture(2, 30_000);
        let err = f.service.confirm(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "Reservation", .. }
        ));
    }

    #[tokio::test]
    async fn concurrent_creates_never_oversell() {
        // 16 two-guest parties race for a 4-guest boat over the same week.
        // Exactly two can win; the rest must be turned away cleanly.
        let repo = Arc::new(InMemoryReservationRepository::new());
        let catalog = Arc::new(InMemoryVesselCatalog::new());
        catalog.insert(Vessel {
            id: "dhb-001".into(),
            name: "Nile Pearl".into(),
            pricing: PricingModel::PerNight {
                nightly_rate_cents: 20_000,
            },
            capacity: CapacityModel::Guests { max_guests: 4 },
            is_active: true,
        });
        let service = Arc::new(BookingService::new(
            repo.clone(),
            catalog,
            Duration::from_secs(5),
        ));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let svc = service.clone();
            handles.push(tokio::spawn(async move {
                svc.create(request("dhb-001", 10, 15, 2)).await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(e) => assert!(matches!(e, DomainError::Unavailable { .. })),
            }
        }
        assert_eq!(wins, 2);

        // Every night stays within capacity.
        let active = repo
            .find_active_overlapping("dhb-001", &future_range(10, 15))
            .await
            .unwrap();
        for night in future_range(10, 15).iter_nights() {
            let used: u32 = active
                .iter()
                .filter(|r| r.dates.contains_night(night))
                .map(|r| r.guest_count)
                .sum();
            assert!(used <= 4);
        }
    }

    #[tokio::test]
    async fn competing_full_boat_holds_block_each_others_confirmation() {
        // Two full-boat holds exist for the same window (the second was
        // imported past the service checks). Each counts against the other,
        // so neither confirms and both stay pending for manual resolution.
        let f = fixture(2, 30_000);
        let first = f.service.create(request("dhb-001", 10, 15, 2)).await.unwrap();
        let second = Reservation::new(
            "dhb-001",
            future_range(10, 15),
            2,
            None,
            150_000,
            contact("Rival"),
        );
        let second_id = second.id;
        f.repo.save(second).await.unwrap();

        for id in [first.id, second_id] {
            let err = f.service.confirm(id).await.unwrap_err();
            assert!(matches!(err, DomainError::Unavailable { .. }));
            assert_eq!(
                f.service.get(id).await.unwrap().status,
                ReservationStatus::Pending
            );
        }
    }

    #[tokio::test]
    async fn back_to_back_bookings_share_the_turnover_day() {
        // Checkout day equals check-in day; a single-party boat takes both.
        let f = fixture(2, 30_000);
        f.service.create(request("dhb-001", 10, 15, 2)).await.unwrap();
        let next = f.service.create(request("dhb-001", 15, 20, 2)).await.unwrap();
        assert_eq!(next.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn stale_pending_sweep_cancels_old_holds_only() {
        let f = fixture(4, 20_000);
        let old = f.service.create(request("dhb-001", 0, 5, 1)).await.unwrap();
        let fresh = f.service.create(request("dhb-001", 0, 5, 1)).await.unwrap();

        // Age the first hold past the TTL.
        let mut aged = f.repo.find_by_id(old.id).await.unwrap().unwrap();
        aged.created_at = Utc::now() - chrono::Duration::hours(2);
        f.repo.update(aged).await.unwrap();

        let swept = f
            .service
            .expire_stale_pending(chrono::Duration::minutes(30))
            .await
            .unwrap();
        assert_eq!(swept, 1);

        assert_eq!(
            f.service.get(old.id).await.unwrap().status,
            ReservationStatus::Cancelled
        );
        assert_eq!(
            f.service.get(fresh.id).await.unwrap().status,
            ReservationStatus::Pending
        );
    }
}
