//! SeaORM-backed repositories

pub mod reservation_repository;
pub mod vessel_catalog;

pub use reservation_repository::SeaOrmReservationRepository;
pub use vessel_catalog::SeaOrmVesselCatalog;
