//! Invoice handlers: list, read, create, update (paid transition), delete.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::models::{InvoiceUpdate, NewInvoice};
use crate::response::{deleted, success_many, success_one, success_one_ok};
use crate::service::InvoiceService;
use crate::state::AppState;
use axum::extract::{Path, State};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid invoice id: {}", id_str)))
}

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = InvoiceService::list(&state.pool).await?;
    Ok(success_many("invoices", rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let invoice = InvoiceService::get(&state.pool, id).await?;
    Ok(success_one_ok("invoice", invoice))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewInvoice>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let invoice = InvoiceService::create(&state.pool, &body).await?;
    Ok(success_one("invoice", invoice))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ApiJson(body): ApiJson<InvoiceUpdate>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let invoice = InvoiceService::update(&state.pool, id, &body).await?;
    Ok(success_one_ok("invoice", invoice))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    InvoiceService::delete(&state.pool, id).await?;
    Ok(deleted())
}
