//! Engine services
//!
//! - `rates`: pure price computation
//! - `overlap`: capacity check against existing reservations
//! - `availability`: combined availability + pricing verdict
//! - `booking`: reservation lifecycle with check-then-commit
//! - `expiry`: background sweep of stale pending holds

pub mod availability;
pub mod booking;
pub mod expiry;
pub mod overlap;
pub mod rates;

pub use availability::{AvailabilityResolver, AvailabilityResult};
pub use booking::{BookingService, CreateReservation};
pub use expiry::start_pending_expiry_task;
pub use overlap::{CapacityVerdict, OverlapChecker};
