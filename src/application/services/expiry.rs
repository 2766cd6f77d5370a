//! Background task that sweeps stale pending reservations.
//!
//! A pending hold keeps capacity off the market; if the customer never
//! confirms, the hold is cancelled after the configured TTL so the dates
//! can be resold.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{info, warn};

use super::booking::BookingService;
use crate::shared::shutdown::ShutdownSignal;

/// Start the pending-expiry background task.
///
/// Every `check_interval_secs` the task cancels Pending reservations
/// created more than `ttl_minutes` ago, through the normal cancel path.
pub fn start_pending_expiry_task(
    booking: Arc<BookingService>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
    ttl_minutes: i64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            ttl_minutes, "Pending-expiry task started"
        );

        let ttl = chrono::Duration::minutes(ttl_minutes);
        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match booking.expire_stale_pending(ttl).await {
                        Ok(0) => {}
                        Ok(swept) => info!(swept, "Expired stale pending reservations"),
                        Err(e) => warn!(error = %e, "Pending-expiry sweep error"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Pending-expiry task shutting down");
                    break;
                }
            }
        }
    });
}
