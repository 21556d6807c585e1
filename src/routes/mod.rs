//! Router assembly: resource routes, JSON 404 fallback and the error-detail policy.

mod resources;

pub use resources::{company_routes, industry_routes, invoice_routes};

use crate::error::{AppError, ErrorBody, InternalErrorDetail};
use crate::state::AppState;
use axum::{
    extract::State,
    middleware::map_response_with_state,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router.
pub fn app(state: AppState) -> Router {
    let body_limit = state.settings.body_limit_bytes;
    Router::new()
        .merge(company_routes(state.clone()))
        .merge(invoice_routes(state.clone()))
        .merge(industry_routes(state.clone()))
        .fallback(not_found)
        .layer(map_response_with_state(state, expose_error_details))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".into())
}

/// In development, replace the generic message of a 500 with the underlying error text.
async fn expose_error_details(State(state): State<AppState>, mut response: Response) -> Response {
    let detail = response.extensions_mut().remove::<InternalErrorDetail>();
    match detail {
        Some(InternalErrorDetail(message)) if state.settings.expose_error_details() => {
            let status = response.status();
            (status, Json(ErrorBody::new(message, status))).into_response()
        }
        _ => response,
    }
}
