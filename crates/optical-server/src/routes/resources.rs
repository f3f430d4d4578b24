//! Handlers shared by every collection, generic over the record type.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use optical_core::{Page, Resource, Stored};
use serde::{ser::SerializeMap, Serialize, Serializer};

use super::allow;
use crate::{
    error::ApiResult,
    extract::{ApiJson, ListParams},
    state::AppState,
};

/// `{"<kind>": [...], "total", "page", "totalPages"}`
pub struct Envelope<R: Stored> {
    page: Page<R>,
}

impl<R: Stored> Envelope<R> {
    pub fn new(page: Page<R>) -> Self {
        Self { page }
    }
}

impl<R: Stored> Serialize for Envelope<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(R::KIND, &self.page.items)?;
        map.serialize_entry("total", &self.page.total)?;
        map.serialize_entry("page", &self.page.page)?;
        map.serialize_entry("totalPages", &self.page.total_pages)?;
        map.end()
    }
}

pub async fn list_paged<R: Stored>(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Envelope<R>>> {
    let page = state.store.list::<R>(&params.page_request(&state.config))?;
    Ok(Json(Envelope::new(page)))
}

/// Bare array, or the envelope when `page`/`limit` is passed.
pub async fn list_bare<R: Stored>(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Response> {
    if params.wants_page() {
        let page = state.store.list::<R>(&params.page_request(&state.config))?;
        return Ok(Json(Envelope::new(page)).into_response());
    }
    let records = state.store.all::<R>(params.search.as_deref())?;
    Ok(Json(records).into_response())
}

pub async fn get_one<R: Stored>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<R>> {
    Ok(Json(state.store.get::<R>(&id)?))
}

pub async fn create<R: Resource + Stored>(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<R::Input>,
) -> ApiResult<(StatusCode, Json<R>)> {
    let record = state.store.create::<R>(input)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update<R: Resource + Stored>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<R::Patch>,
) -> ApiResult<Json<R>> {
    Ok(Json(state.store.update::<R>(&id, &patch)?))
}

pub async fn delete<R: Stored>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<R>> {
    Ok(Json(state.store.delete::<R>(&id)?))
}

/// `GET/POST {base}` with a bare-array listing plus `GET/PUT/DELETE {base}/{id}`.
pub fn crud<R: Resource + Stored>(base: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            base,
            allow(get(list_bare::<R>).post(create::<R>), "GET, POST"),
        )
        .route(
            &format!("{base}/{{id}}"),
            allow(
                get(get_one::<R>).put(update::<R>).delete(delete::<R>),
                "GET, PUT, DELETE",
            ),
        )
}

/// `GET {base}` and `GET {base}/{id}` for reference data.
pub fn read_only<R: Stored>(base: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(base, allow(get(list_bare::<R>), "GET"))
        .route(&format!("{base}/{{id}}"), allow(get(get_one::<R>), "GET"))
}
