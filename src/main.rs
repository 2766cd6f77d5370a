use felucca_booking::{
    default_config_path, init_tracing, AppConfig, ServerHandle, ServerOptions,
};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let config = if config_path.exists() {
        AppConfig::load(&config_path)?
    } else {
        AppConfig::default()
    };

    init_tracing(&config);

    if !config_path.exists() {
        warn!(
            "No config file at {}, using defaults",
            config_path.display()
        );
    }

    let server = ServerHandle::start(ServerOptions {
        config,
        ..Default::default()
    })
    .await?;

    server.install_signal_handler();
    server.wait().await;

    Ok(())
}
