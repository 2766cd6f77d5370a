//! Vessel domain module

pub mod catalog;
pub mod model;

pub use catalog::VesselCatalog;
pub use model::{CapacityModel, PricingModel, Vessel};
