use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use optical_core::{models::NewPatient, Patient};

use super::{allow, resources};
use crate::{auth::Authorized, error::ApiResult, extract::ApiJson, state::AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/patient",
            allow(
                get(resources::list_paged::<Patient>).post(create_patient),
                "GET, POST",
            ),
        )
        .route(
            "/api/patient/{id}",
            allow(
                get(resources::get_one::<Patient>)
                    .put(resources::update::<Patient>)
                    .delete(resources::delete::<Patient>),
                "GET, PUT, DELETE",
            ),
        )
}

/// The token is checked before the body is read.
async fn create_patient(
    _auth: Authorized,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<NewPatient>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let patient = state.store.create::<Patient>(input)?;
    Ok((StatusCode::CREATED, Json(patient)))
}
