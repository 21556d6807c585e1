//! Industry handlers: list with company codes, create, associate a company.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::models::{NewCompanyIndustry, NewIndustry};
use crate::response::{success_many, success_one};
use crate::service::IndustryService;
use crate::state::AppState;
use axum::extract::{Path, State};

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = IndustryService::list(&state.pool).await?;
    Ok(success_many("industries", rows))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewIndustry>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let industry = IndustryService::create(&state.pool, &body).await?;
    Ok(success_one("industry", industry))
}

pub async fn associate(
    State(state): State<AppState>,
    Path(industry_code): Path<String>,
    ApiJson(body): ApiJson<NewCompanyIndustry>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let link = IndustryService::associate(&state.pool, &industry_code, &body).await?;
    Ok(success_one("company_industry", link))
}
