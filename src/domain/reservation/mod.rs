//! Reservation domain module

pub mod model;
pub mod repository;

pub use model::{CustomerContact, Reservation, ReservationStatus};
pub use repository::ReservationRepository;
