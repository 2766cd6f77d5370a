//! Resource modules, each with its own DTOs and handlers.

pub mod availability;
pub mod health;
pub mod reservations;
pub mod vessels;
