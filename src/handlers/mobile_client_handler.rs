use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::{
    error::ApiError,
    models::{
        MobileAppCreateRequest, MobileAppUpdateRequest, MobileClientData, MobileClientDataList,
        MobileClientStatusData,
    },
    AppState,
};

/// GET /api/mobileclients
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<MobileClientDataList>, ApiError> {
    let list = state.client_service.list_clients().await?;
    info!("Listed {} mobile clients", list.items.len());
    Ok(Json(list))
}

/// POST /api/mobileclients
///
/// Responds with 201 and the created resource. The UI relies on the
/// `metadata` block being present in the answer.
pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<MobileAppCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MobileClientData>), ApiError> {
    let Json(request) = payload?;
    info!(
        "Create mobile client '{}' of type '{}'",
        request.name, request.client_type
    );

    let client = state.client_service.create_client(request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/mobileclients/:name
pub async fn get_client(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MobileClientData>, ApiError> {
    let client = state.client_service.get_client(&name).await?;
    Ok(Json(client))
}

/// PUT|PATCH /api/mobileclients/:name
pub async fn update_client(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<MobileAppUpdateRequest>, JsonRejection>,
) -> Result<Json<MobileClientData>, ApiError> {
    let Json(request) = payload?;
    info!("Update mobile client '{}'", name);

    let client = state.client_service.update_client(&name, request).await?;
    Ok(Json(client))
}

/// DELETE /api/mobileclients/:name
pub async fn delete_client(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MobileClientData>, ApiError> {
    let client = state.client_service.delete_client(&name).await?;
    Ok(Json(client))
}

/// GET /api/mobileclients/:name/config
pub async fn get_client_config(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MobileClientStatusData>, ApiError> {
    let config = state.client_service.client_config(&name).await?;
    Ok(Json(config))
}
