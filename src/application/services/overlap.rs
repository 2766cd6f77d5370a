//! Capacity check against existing reservations
//!
//! Answers whether a vessel can take another party for a date range given
//! the Pending and Confirmed reservations already on the books. Pending
//! reservations count: a hold that has been handed to a customer must not
//! be sold twice while they decide.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::{DateRange, DomainResult, ReservationRepository, Vessel};

/// Outcome of a capacity check, before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityVerdict {
    Available,
    /// Existing bookings leave too little room on at least one night.
    FullyBooked,
    /// The party alone exceeds what the vessel can ever hold.
    PartyTooLarge,
}

pub struct OverlapChecker {
    reservations: Arc<dyn ReservationRepository>,
}

impl OverlapChecker {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// Check whether `requested_units` more capacity units fit on every
    /// night of `range`, alongside the vessel's active reservations.
    ///
    /// `exclude` drops one reservation from the scan so a booking being
    /// re-validated at confirmation is not counted against itself.
    ///
    /// Usage is peaked per night, not summed across the whole overlapping
    /// set: two existing back-to-back bookings never jointly block a night
    /// they do not share.
    pub async fn check(
        &self,
        vessel: &Vessel,
        range: &DateRange,
        requested_units: u32,
        requested_guests: u32,
        exclude: Option<Uuid>,
    ) -> DomainResult<CapacityVerdict> {
        // Absolute caps hold even on an empty calendar.
        if requested_guests > vessel.max_guests() || requested_units > vessel.capacity_units() {
            return Ok(CapacityVerdict::PartyTooLarge);
        }

        let overlapping = self
            .reservations
            .find_active_overlapping(&vessel.id, range)
            .await?;

        let considered: Vec<_> = overlapping
            .into_iter()
            .filter(|r| Some(r.id) != exclude)
            .collect();

        let capacity = vessel.capacity_units();
        for night in range.iter_nights() {
            let used: u32 = considered
                .iter()
                .filter(|r| r.dates.contains_night(night))
                .map(|r| r.consumed_units(&vessel.capacity))
                .sum();

            if used + requested_units > capacity {
                debug!(
                    vessel_id = %vessel.id,
                    %night,
                    used,
                    requested = requested_units,
                    capacity,
                    "Capacity exhausted"
                );
                return Ok(CapacityVerdict::FullyBooked);
            }
        }

        Ok(CapacityVerdict::Available)
    }
}

// ── Tests ──────────────────────────────────────────────────────
