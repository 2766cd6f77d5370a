//! Core business entities, value types and repository traits.

pub mod date_range;
pub mod error;
pub mod reservation;
pub mod vessel;

// Re-export commonly used types
pub use date_range::DateRange;
pub use error::{DomainError, DomainResult};
pub use reservation::{CustomerContact, Reservation, ReservationRepository, ReservationStatus};
pub use vessel::{CapacityModel, PricingModel, Vessel, VesselCatalog};
