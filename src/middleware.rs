use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::debug;

use crate::AppState;

pub async fn track_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // Label by route template so that client names do not become label values
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let method = request.method().to_string();

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed();

    debug!("{} {} -> {} in {:?}", method, path, response.status(), elapsed);
    state
        .metrics
        .record_request(&method, &path, response.status().as_u16(), elapsed);

    response
}
