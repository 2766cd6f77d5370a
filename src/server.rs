//! Reusable booking engine server runtime.
//!
//! [`ServerHandle`] encapsulates the full server lifecycle: database init,
//! migrations, catalog seeding, REST API, the pending-expiry sweep, and
//! graceful shutdown. The root binary and the CLI member both start the
//! engine through it without duplicating bootstrap code.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::services::start_pending_expiry_task;
use crate::application::BookingService;
use crate::config::AppConfig;
use crate::domain::VesselCatalog;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::{
    SeaOrmReservationRepository, SeaOrmVesselCatalog,
};
use crate::infrastructure::{init_database, DatabaseConfig};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the booking engine.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Insert demo vessels when the catalog is empty (default: false).
    /// Meant for local development; production catalogs are populated by
    /// the catalog service.
    pub seed_demo_vessels: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_demo_vessels: false,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running booking engine.
pub struct ServerHandle {
    /// Booking service for direct (non-HTTP) access.
    pub booking: Arc<BookingService>,
    /// Read-only vessel catalog.
    pub catalog: Arc<dyn VesselCatalog>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// API port the server is listening on.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the booking engine with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations
    /// 2. Optionally seed demo vessels
    /// 3. Start the REST API server (with Swagger UI)
    /// 4. Start the pending-expiry sweep
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting Felucca booking engine...");

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
        };
        info!("Database: {}", db_config.url);

        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        if opts.seed_demo_vessels {
            seed_demo_vessels(&db).await;
        }

        // ── Repositories & Services ────────────────────────────
        let reservations = Arc::new(SeaOrmReservationRepository::new(db.clone()));
        let catalog: Arc<dyn VesselCatalog> = Arc::new(SeaOrmVesselCatalog::new(db.clone()));
        let booking = Arc::new(BookingService::new(
            reservations,
            catalog.clone(),
            app_cfg.lock_timeout(),
        ));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── Background tasks ───────────────────────────────────
        start_pending_expiry_task(
            booking.clone(),
            shutdown_signal.clone(),
            app_cfg.booking.expiry_check_interval_secs,
            app_cfg.booking.pending_ttl_minutes,
        );

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(booking.clone(), catalog.clone());

        let api_port = app_cfg.server.api_port;
        let api_addr = format!("{}:{}", app_cfg.server.api_host, api_port);
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Booking engine started.");

        Ok(Self {
            booking,
            catalog,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for shutdown to be triggered, then stop the server and close
    /// the database within the configured shutdown timeout.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!("REST API server task panicked: {}", e);
                } else {
                    info!("REST API server stopped");
                }

                if let Err(e) = db.close().await {
                    warn!("Error closing database connection: {}", e);
                } else {
                    info!("Database connection closed");
                }
            })
            .await;

        info!("👋 Booking engine shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down booking engine...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Insert a couple of demo vessels when the catalog table is empty.
async fn seed_demo_vessels(db: &DatabaseConnection) {
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

    use crate::infrastructure::database::entities::vessel;

    let count = vessel::Entity::find().count(db).await.unwrap_or(0);
    if count > 0 {
        return;
    }

    info!("Seeding demo vessels...");

    let demo = vec![
        vessel::ActiveModel {
            id: Set("dhb-nile-pearl".to_string()),
            name: Set("Nile Pearl".to_string()),
            pricing_model: Set("per_night".to_string()),
            nightly_rate_cents: Set(30_000),
            package_price_cents: Set(0),
            capacity_model: Set("guests".to_string()),
            max_guests: Set(8),
            cabin_count: Set(0),
            is_active: Set(true),
        },
        vessel::ActiveModel {
            id: Set("dhb-luxor-breeze".to_string()),
            name: Set("Luxor Breeze".to_string()),
            pricing_model: Set("per_night".to_string()),
            nightly_rate_cents: Set(50_000),
            package_price_cents: Set(0),
            capacity_model: Set("cabins".to_string()),
            max_guests: Set(12),
            cabin_count: Set(6),
            is_active: Set(true),
        },
        vessel::ActiveModel {
            id: Set("pkg-aswan-luxor-10d".to_string()),
            name: Set("Aswan to Luxor, 10 Days".to_string()),
            pricing_model: Set("flat_package".to_string()),
            nightly_rate_cents: Set(0),
            package_price_cents: Set(240_000),
            capacity_model: Set("guests".to_string()),
            max_guests: Set(16),
            cabin_count: Set(0),
            is_active: Set(true),
        },
    ];

    for v in demo {
        if let Err(e) = v.insert(db).await {
            error!("Failed to seed demo vessel: {}", e);
        }
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
