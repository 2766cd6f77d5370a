//! In-memory storage for development and testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    DateRange, DomainError, DomainResult, Reservation, ReservationRepository, ReservationStatus,
    Vessel, VesselCatalog,
};

/// DashMap-backed reservation store. Used by the service test suites and
/// available as a dev backend; durability comes from the SeaORM store.
#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: DashMap<Uuid, Reservation>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
        }
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        if self.reservations.contains_key(&reservation.id) {
            return Err(DomainError::Storage(format!(
                "duplicate reservation id {}",
                reservation.id
            )));
        }
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<()> {
        if !self.reservations.contains_key(&reservation.id) {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation.id.to_string(),
            });
        }
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn find_active_overlapping(
        &self,
        vessel_id: &str,
        range: &DateRange,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| {
                r.vessel_id == vessel_id && r.is_active() && r.dates.overlaps(range)
            })
            .map(|r| r.clone())
            .collect())
    }

    async fn find_by_vessel(&self, vessel_id: &str) -> DomainResult<Vec<Reservation>> {
        let mut items: Vec<_> = self
            .reservations
            .iter()
            .filter(|r| r.vessel_id == vessel_id)
            .map(|r| r.clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find_page(
        &self,
        vessel_id: Option<&str>,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Reservation>, u64)> {
        let mut items: Vec<_> = self
            .reservations
            .iter()
            .filter(|r| vessel_id.map_or(true, |v| r.vessel_id == v))
            .map(|r| r.clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as u64;
        let start = ((page.max(1) - 1) * limit) as usize;
        let page_items = items.into_iter().skip(start).take(limit as usize).collect();
        Ok((page_items, total))
    }

    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Pending && r.created_at < cutoff)
            .map(|r| r.clone())
            .collect())
    }
}

/// In-memory vessel catalog, seedable from tests or dev fixtures.
#[derive(Default)]
pub struct InMemoryVesselCatalog {
    vessels: DashMap<String, Vessel>,
}

impl InMemoryVesselCatalog {
    pub fn new() -> Self {
        Self {
            vessels: DashMap::new(),
        }
    }

    /// Insert or replace a vessel. The engine never calls this; it exists
    /// for seeding, standing in for the external catalog owner.
    pub fn insert(&self, vessel: Vessel) {
        self.vessels.insert(vessel.id.clone(), vessel);
    }
}

#[async_trait]
impl VesselCatalog for InMemoryVesselCatalog {
    async fn find_by_id(&self, vessel_id: &str) -> DomainResult<Option<Vessel>> {
        Ok(self.vessels.get(vessel_id).map(|v| v.clone()))
    }

    async fn list_active(&self) -> DomainResult<Vec<Vessel>> {
        let mut active: Vec<_> = self
            .vessels
            .iter()
            .filter(|v| v.is_active)
            .map(|v| v.clone())
            .collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }
}
