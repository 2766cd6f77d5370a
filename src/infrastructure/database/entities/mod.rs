//! SeaORM entities

pub mod reservation;
pub mod vessel;
