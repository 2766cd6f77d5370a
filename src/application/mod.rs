//! Business logic and use cases.

pub mod services;

pub use services::{
    AvailabilityResolver, AvailabilityResult, BookingService, CapacityVerdict, CreateReservation,
    OverlapChecker,
};
