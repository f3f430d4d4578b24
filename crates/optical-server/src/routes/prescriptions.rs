use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use optical_core::{models::NewPrescription, Prescription, PrescriptionDetail};

use super::{allow, resources};
use crate::{error::ApiResult, extract::ApiJson, state::AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/prescription",
            allow(
                get(resources::list_paged::<Prescription>).post(create_prescription),
                "GET, POST",
            ),
        )
        .route(
            "/api/prescription/{id}",
            allow(
                get(prescription_detail)
                    .put(resources::update::<Prescription>)
                    .delete(resources::delete::<Prescription>),
                "GET, PUT, DELETE",
            ),
        )
}

async fn create_prescription(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<NewPrescription>,
) -> ApiResult<(StatusCode, Json<PrescriptionDetail>)> {
    let created = state.store.create_prescription(input)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn prescription_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PrescriptionDetail>> {
    Ok(Json(state.store.prescription_detail(&id)?))
}
