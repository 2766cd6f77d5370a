//! Per-vessel serialization point
//!
//! All capacity-consuming mutations for a vessel run under that vessel's
//! lock so the re-check and the store write form one atomic unit. Locks
//! are independent per vessel: bookings on different vessels never wait
//! on each other.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{DomainError, DomainResult};

#[derive(Default)]
pub struct VesselLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl VesselLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the lock for a vessel, waiting at most `timeout`.
    ///
    /// The guard releases on drop. Acquisition never blocks indefinitely;
    /// on timeout the caller gets a retryable `LockTimeout`.
    pub async fn acquire(
        &self,
        vessel_id: &str,
        timeout: Duration,
    ) -> DomainResult<OwnedMutexGuard<()>> {
        let mutex = self
            .locks
            .entry(vessel_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        tokio::time::timeout(timeout, mutex.lock_owned())
            .await
            .map_err(|_| DomainError::LockTimeout {
                vessel_id: vessel_id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────
