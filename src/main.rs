use tracing_subscriber::EnvFilter;

use drugsafe::api::server;
use drugsafe::config::{self, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("DrugSafe starting v{}", config::APP_VERSION);

    let config = Config::from_env();
    if !config.api_configured() {
        tracing::warn!(
            "NVIDIA_API_KEY not set — interaction checks will fail until it is configured"
        );
    }

    if let Err(e) = server::run(config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
