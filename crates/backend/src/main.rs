pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let dataset_path = shared::config::get_dataset_path(&config);
    let currency = config.currency_format();

    if config.currency_mismatch() {
        tracing::warn!(
            "Revenue will be labelled as {} ({}), but the dataset values are recorded in {}",
            currency.code,
            config.display.locale,
            shared::config::DATASET_CURRENCY
        );
    }

    // Sessions load the dataset themselves; this only reports a bad path early
    if dataset_path.exists() {
        tracing::info!("Dataset: {}", dataset_path.display());
    } else {
        tracing::warn!(
            "Dataset {} does not exist yet, sessions will fail to open until it does",
            dataset_path.display()
        );
    }

    let state = shared::state::AppState::new(dataset_path, currency);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(state)
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server address: {e}"))?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
