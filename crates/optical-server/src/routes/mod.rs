//! HTTP routes. Every response body is JSON.

mod customers;
mod patients;
mod prescriptions;
mod reference;
mod reports;
pub mod resources;

use std::{any::Any, sync::Arc, time::Duration};

use axum::{
    extract::Request,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// The whole API, ready to serve.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    });

    Router::new()
        .merge(customers::routes())
        .merge(patients::routes())
        .merge(prescriptions::routes())
        .merge(reference::routes())
        .merge(reports::routes())
        .fallback(|| async { ApiError::route_not_found() })
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(trace)
        .layer(cors)
        .with_state(state)
}

/// Answer any verb the route does not list with 405 and an `Allow` header.
pub(crate) fn allow(
    router: MethodRouter<Arc<AppState>>,
    methods: &'static str,
) -> MethodRouter<Arc<AppState>> {
    router.fallback(move |method: Method| async move {
        ApiError::MethodNotAllowed {
            method,
            allow: methods,
        }
    })
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };
    ApiError::Internal(message).into_response()
}
