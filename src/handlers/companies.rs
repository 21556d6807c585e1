//! Company handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::models::CompanyInput;
use crate::response::{deleted, success_many, success_one, success_one_ok};
use crate::service::CompanyService;
use crate::state::AppState;
use axum::extract::{Path, State};

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = CompanyService::list(&state.pool).await?;
    Ok(success_many("companies", rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let company = CompanyService::get(&state.pool, &code).await?;
    Ok(success_one_ok("company", company))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CompanyInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let company = CompanyService::create(&state.pool, &body).await?;
    Ok(success_one("company", company))
}

pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ApiJson(body): ApiJson<CompanyInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let company = CompanyService::update(&state.pool, &code, &body).await?;
    Ok(success_one_ok("company", company))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    CompanyService::delete(&state.pool, &code).await?;
    Ok(deleted())
}
