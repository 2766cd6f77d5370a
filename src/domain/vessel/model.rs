//! Vessel reference data
//!
//! Vessels (dahabiyas and fixed multi-day packages) are owned by the
//! external catalog; the engine reads them but never writes them.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// How a vessel's stay is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PricingModel {
    /// Price scales with nights; guest count never multiplies price.
    PerNight { nightly_rate_cents: i64 },
    /// Fixed package price regardless of stay length.
    FlatPackage { package_price_cents: i64 },
}

/// The unit in which a vessel's capacity is counted.
///
/// Each vessel declares exactly one model. Guest-modeled vessels cap
/// concurrent guests; cabin-modeled vessels cap concurrent cabins and
/// additionally cap the party size of any single booking at `max_guests`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum CapacityModel {
    Guests { max_guests: u32 },
    Cabins { cabins: u32, max_guests: u32 },
}

/// A bookable vessel or package, immutable during a booking transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub pricing: PricingModel,
    pub capacity: CapacityModel,
    pub is_active: bool,
}

impl Vessel {
    /// Hard cap on the party size of a single booking.
    pub fn max_guests(&self) -> u32 {
        match self.capacity {
            CapacityModel::Guests { max_guests } => max_guests,
            CapacityModel::Cabins { max_guests, .. } => max_guests,
        }
    }

    /// Total capacity units available per night (guests or cabins).
    pub fn capacity_units(&self) -> u32 {
        match self.capacity {
            CapacityModel::Guests { max_guests } => max_guests,
            CapacityModel::Cabins { cabins, .. } => cabins,
        }
    }

    /// Capacity units a booking request consumes.
    ///
    /// Cabin-modeled vessels require the request to state how many cabins
    /// it needs; for guest-modeled vessels the guest count is the unit.
    pub fn units_for_request(&self, guest_count: u32, cabin_count: Option<u32>) -> DomainResult<u32> {
        match self.capacity {
            CapacityModel::Guests { .. } => Ok(guest_count),
            CapacityModel::Cabins { .. } => match cabin_count {
                Some(c) if c >= 1 => Ok(c),
                Some(_) => Err(DomainError::validation(
                    "cabin_count",
                    "cabin count must be at least 1",
                )),
                None => Err(DomainError::validation(
                    "cabin_count",
                    format!("vessel {} is booked per cabin; cabin_count is required", self.id),
                )),
            },
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
