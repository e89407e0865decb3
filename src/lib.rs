// Mobile Client Service library
// Public modules are exported for the binary and the integration tests

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::ApiError;
pub use metrics::HttpMetrics;
pub use services::{InMemoryClientStore, MobileClientService, MobileClientStore, MobileServiceCatalog};

use handlers::{health_handler, metrics_handler, mobile_client_handler, mobile_service_handler};
use middleware::track_metrics;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client_service: MobileClientService,
    pub metrics: HttpMetrics,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn MobileClientStore>,
        catalog: MobileServiceCatalog,
    ) -> anyhow::Result<Self> {
        let client_service = MobileClientService::new(
            store,
            Arc::new(catalog),
            config.cluster_host.clone(),
            config.namespace.clone(),
        );

        Ok(Self {
            config,
            client_service,
            metrics: HttpMetrics::new()?,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler::health_check))
        .route("/about", get(health_handler::about))
        .route("/metrics", get(metrics_handler::metrics))

        // Mobile clients
        .route(
            "/api/mobileclients",
            get(mobile_client_handler::list_clients).post(mobile_client_handler::create_client),
        )
        .route(
            "/api/mobileclients/:name",
            get(mobile_client_handler::get_client)
                .put(mobile_client_handler::update_client)
                .patch(mobile_client_handler::update_client)
                .delete(mobile_client_handler::delete_client),
        )
        .route(
            "/api/mobileclients/:name/config",
            get(mobile_client_handler::get_client_config),
        )

        // Backend services available to mobile clients
        .route("/api/mobileservices", get(mobile_service_handler::list_mobile_services))

        // Only matched routes are measured
        .route_layer(from_fn_with_state(state.clone(), track_metrics))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
