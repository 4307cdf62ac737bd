use std::error::Error;
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use stop_board::api::{ApiClient, CachedApi, MockApi, TransitApi};
use stop_board::config::BoardConfig;
use stop_board::stops::StopCatalogue;
use stop_board::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stop_board=info,tower_http=info")),
        )
        .init();

    let config = BoardConfig::from_env()?;

    let catalogue = match &config.stops_file {
        Some(path) => StopCatalogue::load(path)?,
        None => StopCatalogue::empty(),
    };

    if config.demo {
        let api = MockApi::demo();
        let catalogue = if catalogue.is_empty() {
            StopCatalogue::from_stops(api.known_stops())
        } else {
            catalogue
        };
        info!("serving built-in demo data");
        serve(CachedApi::new(api, &config.cache), catalogue, &config).await
    } else {
        let client = ApiClient::new(config.api.clone())?;
        info!(base_url = %config.api.base_url, "using transit API");
        serve(CachedApi::new(client, &config.cache), catalogue, &config).await
    }
}

async fn serve<A: TransitApi + 'static>(
    api: A,
    catalogue: StopCatalogue,
    config: &BoardConfig,
) -> Result<(), Box<dyn Error>> {
    info!(stops = catalogue.len(), "loaded stop catalogue");

    let state = AppState::new(api, catalogue);
    let app = create_router(state, Path::new(&config.static_dir));

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("departure board listening on http://{}", config.listen);
    info!("  GET  /                   - Widget page");
    info!("  GET  /api/stops/search   - Stop search");
    info!("  POST /board/select       - Select a stop");
    info!("  GET  /favourites         - Favourites panel");
    info!("  GET  /health             - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
