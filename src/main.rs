use tracing_subscriber::{EnvFilter, fmt};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let http_port = std::env::var("STORERATE_HTTP_PORT").unwrap_or_else(|_| "5000".to_string());
    let redis_url = std::env::var("STORERATE_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    info!(
        target: "storerate",
        "storerate starting: RUST_LOG='{}', http_port={}, redis_url='{}'",
        rust_log, http_port, redis_url
    );

    storerate::server::run().await
}
