use axum::{extract::State, response::Json};

use crate::{models::MobileServiceList, AppState};

/// GET /api/mobileservices
pub async fn list_mobile_services(State(state): State<AppState>) -> Json<MobileServiceList> {
    Json(MobileServiceList {
        items: state.client_service.catalog().services().to_vec(),
    })
}
