//! Vessel catalog interface
//!
//! The catalog is maintained by a separate content service; the engine
//! only ever reads from it.

use async_trait::async_trait;

use super::model::Vessel;
use crate::domain::DomainResult;

#[async_trait]
pub trait VesselCatalog: Send + Sync {
    /// Look up a vessel by ID, regardless of active flag.
    async fn find_by_id(&self, vessel_id: &str) -> DomainResult<Option<Vessel>>;

    /// All vessels currently open for booking.
    async fn list_active(&self) -> DomainResult<Vec<Vessel>>;
}
