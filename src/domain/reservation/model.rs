//! Reservation domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::date_range::DateRange;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::vessel::CapacityModel;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Created but not yet confirmed; still consumes capacity.
    Pending,
    /// Confirmed by an operator or automated step.
    Confirmed,
    /// Terminal; never counts against capacity again.
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Confirmed" => Self::Confirmed,
            _ => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contact details captured with a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: Option<String>,
}

/// A booking record for a vessel and date range.
///
/// Records are never deleted; cancellation only flips the status so the
/// audit trail survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub vessel_id: String,
    pub dates: DateRange,
    pub guest_count: u32,
    /// Cabins consumed; set when the vessel is cabin-modeled.
    pub cabin_count: Option<u32>,
    pub status: ReservationStatus,
    /// Always server-computed, in integer cents.
    pub total_price_cents: i64,
    pub customer: CustomerContact,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        vessel_id: impl Into<String>,
        dates: DateRange,
        guest_count: u32,
        cabin_count: Option<u32>,
        total_price_cents: i64,
        customer: CustomerContact,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vessel_id: vessel_id.into(),
            dates,
            guest_count,
            cabin_count,
            status: ReservationStatus::Pending,
            total_price_cents,
            customer,
            created_at: now,
            updated_at: now,
        }
    }

    /// Pending or Confirmed: still consumes capacity.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }

    /// Capacity units this reservation consumes under a vessel's model.
    pub fn consumed_units(&self, capacity: &CapacityModel) -> u32 {
        match capacity {
            CapacityModel::Guests { .. } => self.guest_count,
            // Rows written before a vessel switched to cabin accounting may
            // lack a cabin count; count them conservatively by guests.
            CapacityModel::Cabins { .. } => self.cabin_count.unwrap_or(self.guest_count),
        }
    }

    /// Transition Pending -> Confirmed. Confirming an already confirmed
    /// reservation is a no-op; confirming a cancelled one is illegal.
    pub fn confirm(&mut self) -> DomainResult<()> {
        match self.status {
            ReservationStatus::Pending => {
                self.status = ReservationStatus::Confirmed;
                self.updated_at = Utc::now();
                Ok(())
            }
            ReservationStatus::Confirmed => Ok(()),
            ReservationStatus::Cancelled => Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: ReservationStatus::Confirmed.to_string(),
            }),
        }
    }

    /// Transition to Cancelled from any state; idempotent.
    pub fn cancel(&mut self) {
        if self.status != ReservationStatus::Cancelled {
            self.status = ReservationStatus::Cancelled;
            self.updated_at = Utc::now();
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        )
        .unwrap()
    }

    fn sample_contact() -> CustomerContact {
        CustomerContact {
            name: "Amira Hassan".into(),
            email: "amira@example.com".into(),
            phone: "+20 100 000 0000".into(),
            special_requests: None,
        }
    }

    fn sample_reservation() -> Reservation {
        Reservation::new("dhb-aswan", sample_range(), 2, None, 150_000, sample_contact())
    }

    #[test]
    fn new_reservation_is_pending_and_active() {
        let r = sample_reservation();
        assert_eq!(r.status, ReservationStatus::Pending);
        assert!(r.is_active());
    }

    #[test]
    fn confirm_from_pending() {
        let mut r = sample_reservation();
        r.confirm().unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert!(r.is_active());
    }

    #[test]
    fn confirm_is_idempotent() {
        let mut r = sample_reservation();
        r.confirm().unwrap();
        let before = r.clone();
        r.confirm().unwrap();
        assert_eq!(r.status, before.status);
    }

    #[test]
    fn confirm_after_cancel_is_illegal_and_mutates_nothing() {
        let mut r = sample_reservation();
        r.cancel();
        let before = r.clone();
        let err = r.confirm().unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(r, before);
    }

    #[test]
    fn cancel_is_idempotent_and_terminal() {
        let mut r = sample_reservation();
        r.confirm().unwrap();
        r.cancel();
        assert_eq!(r.status, ReservationStatus::Cancelled);
        assert!(!r.is_active());
        let updated_at = r.updated_at;
        r.cancel();
        assert_eq!(r.updated_at, updated_at);
    }

    #[test]
    fn consumed_units_follow_capacity_model() {
        let mut r = sample_reservation();
        r.guest_count = 4;
        r.cabin_count = Some(2);
        assert_eq!(r.consumed_units(&CapacityModel::Guests { max_guests: 10 }), 4);
        assert_eq!(
            r.consumed_units(&CapacityModel::Cabins { cabins: 6, max_guests: 12 }),
            2
        );

        r.cabin_count = None;
        assert_eq!(
            r.consumed_units(&CapacityModel::Cabins { cabins: 6, max_guests: 12 }),
            4
        );
    }

    #[test]
    fn status_string_roundtrip() {
        for status in &[
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(&ReservationStatus::from_str(status.as_str()), status);
        }
        // Unknown strings park the record as cancelled rather than active.
        assert_eq!(
            ReservationStatus::from_str("Unknown"),
            ReservationStatus::Cancelled
        );
    }
}
