mod config;
mod error;
mod payload;
mod router;
mod state;
mod util;

use dotenvy::dotenv;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use std::sync::Arc;

use exposer_danbooru::DanbooruRepository;

use crate::{config::Config, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env()?
        .add_directive("hyper::proto=info".parse()?)
        .add_directive("hyper::client=info".parse()?)
        .add_directive("reqwest=info".parse()?)
        .add_directive("hickory_proto=info".parse()?)
        .add_directive("hickory_resolver=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Load configuration
    let config = Config::from_env()?;
    tracing::debug!("Exposing {} as {:?}", config.danbooru.base_url, config.danbooru.credential);

    // 3. Build the upstream repository
    let repository = DanbooruRepository::connect(&config.danbooru)?;

    // 4. Setup state and router
    let app_state = AppState {
        repository: Arc::new(repository),
    };
    let app = router::app_router(app_state);

    // 5. Start server
    tracing::info!("Server starting at {}", config.address);
    axum::Server::bind(&config.address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
