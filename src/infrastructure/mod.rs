//! External concerns: persistence, in-memory stores, vessel locks.

pub mod database;
pub mod locks;
pub mod memory;

pub use database::{init_database, DatabaseConfig};
pub use locks::VesselLocks;
