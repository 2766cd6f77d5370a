//! Felucca booking engine.
//!
//! Availability, pricing, and reservation lifecycle for vessel charters
//! and multi-day packages. The engine enforces a no-oversell guarantee:
//! for any vessel and any night, the capacity consumed by active
//! reservations never exceeds the vessel's declared capacity.
//!
//! Layout follows a clean-architecture split:
//! - `domain`: entities, value types, and repository traits
//! - `application`: booking, availability, and pricing services
//! - `infrastructure`: SeaORM persistence, in-memory stores, vessel locks
//! - `interfaces`: axum REST API with Swagger documentation
//! - `server`: bootstrap glue used by the binaries

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::create_api_router;
pub use server::{init_tracing, ServerHandle, ServerOptions};
