use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mobile_client_service::{
    build_router, AppState, Config, InMemoryClientStore, MobileServiceCatalog,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {:#}", e);
            return Err(e.into());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_target(false)
        .with_thread_ids(true)
        .init();

    info!("🚀 Starting Mobile Client Service...");
    info!(
        "✅ Configuration loaded: namespace={}, cluster={}",
        config.namespace, config.cluster_host
    );

    let catalog = MobileServiceCatalog::load(&config).await;
    info!("✅ {} mobile services available", catalog.services().len());

    let app_state = match AppState::new(config.clone(), Arc::new(InMemoryClientStore::new()), catalog) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to initialize application state: {:#}", e);
            return Err(e.into());
        }
    };
    let app = build_router(app_state);

    // Start the server
    let listener = match tokio::net::TcpListener::bind(&config.server_address).await {
        Ok(listener) => {
            info!("🌐 Server listening on {}", config.server_address);
            listener
        }
        Err(e) => {
            eprintln!("❌ Failed to bind to {}: {}", config.server_address, e);
            return Err(e.into());
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("✅ Server stopped gracefully");
    Ok(())
}
