//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::Reservation;
use crate::domain::date_range::DateRange;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation.
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    /// Find a reservation by ID.
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Reservation>>;

    /// Update an existing reservation.
    async fn update(&self, reservation: Reservation) -> DomainResult<()>;

    /// All Pending/Confirmed reservations for a vessel whose date range
    /// overlaps `range` (half-open semantics).
    async fn find_active_overlapping(
        &self,
        vessel_id: &str,
        range: &DateRange,
    ) -> DomainResult<Vec<Reservation>>;

    /// All reservations for a vessel, any status, newest first.
    async fn find_by_vessel(&self, vessel_id: &str) -> DomainResult<Vec<Reservation>>;

    /// One page of reservations (optionally filtered by vessel), newest
    /// first, with the total row count for the filter.
    async fn find_page(
        &self,
        vessel_id: Option<&str>,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Reservation>, u64)>;

    /// Pending reservations created before `cutoff`; candidates for the
    /// stale-hold sweep.
    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Reservation>>;
}
