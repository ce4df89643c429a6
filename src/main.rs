use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use tripdesk::{web, TripdeskConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tripdesk=info,tower_http=info")),
        )
        .init();

    let config = TripdeskConfig::from_env()?;
    web::run(config).await
}
