use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use optical_core::{models::NewWalkInInvoice, Customer, CustomerDetail, WalkInInvoice};

use super::{allow, resources};
use crate::{error::ApiResult, extract::ApiJson, state::AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/customer",
            allow(
                get(resources::list_paged::<Customer>).post(resources::create::<Customer>),
                "GET, POST",
            ),
        )
        .route(
            "/api/customer/invoice",
            allow(post(create_walk_in_invoice), "POST"),
        )
        .route(
            "/api/customer/{id}",
            allow(
                get(customer_detail)
                    .put(resources::update::<Customer>)
                    .delete(resources::delete::<Customer>),
                "GET, PUT, DELETE",
            ),
        )
}

async fn customer_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CustomerDetail>> {
    Ok(Json(state.store.customer_detail(&id)?))
}

async fn create_walk_in_invoice(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<NewWalkInInvoice>,
) -> ApiResult<(StatusCode, Json<WalkInInvoice>)> {
    let created = state.store.create_walk_in_invoice(input)?;
    Ok((StatusCode::CREATED, Json(created)))
}
