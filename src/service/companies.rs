//! Company CRUD, with invoice and industry lookups on read.

use crate::error::AppError;
use crate::models::{Company, CompanyDetail, CompanyInput, CompanySummary};
use crate::slug::code_for;
use sqlx::PgPool;

const LIST: &str = "SELECT code, name FROM companies ORDER BY seq";
const SELECT_ONE: &str = "SELECT code, name, description FROM companies WHERE code = $1";
const INVOICE_IDS: &str = "SELECT id FROM invoices WHERE comp_code = $1 ORDER BY id";
const INDUSTRY_NAMES: &str = "SELECT i.industry FROM industries AS i \
     INNER JOIN companies_industries AS ci ON i.code = ci.industry_code \
     WHERE ci.comp_code = $1 ORDER BY i.industry";
const INSERT: &str =
    "INSERT INTO companies (code, name, description) VALUES ($1, $2, $3) RETURNING code, name, description";
const UPDATE: &str =
    "UPDATE companies SET name = $1, description = $2 WHERE code = $3 RETURNING code, name, description";
const DELETE: &str = "DELETE FROM companies WHERE code = $1 RETURNING code";

pub struct CompanyService;

impl CompanyService {
    /// All companies as `{code, name}`.
    pub async fn list(pool: &PgPool) -> Result<Vec<CompanySummary>, AppError> {
        tracing::debug!(sql = %LIST, "query");
        let rows = sqlx::query_as::<_, CompanySummary>(LIST).fetch_all(pool).await?;
        Ok(rows)
    }

    /// One company with its invoice ids and industry names. Both lists are empty when nothing is linked.
    pub async fn get(pool: &PgPool, code: &str) -> Result<CompanyDetail, AppError> {
        tracing::debug!(sql = %SELECT_ONE, code = %code, "query");
        let company = sqlx::query_as::<_, Company>(SELECT_ONE)
            .bind(code)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't find company with code of {}", code)))?;

        tracing::debug!(sql = %INVOICE_IDS, code = %code, "query");
        let invoices: Vec<i32> = sqlx::query_scalar(INVOICE_IDS).bind(code).fetch_all(pool).await?;

        tracing::debug!(sql = %INDUSTRY_NAMES, code = %code, "query");
        let industries: Vec<String> = sqlx::query_scalar(INDUSTRY_NAMES).bind(code).fetch_all(pool).await?;

        Ok(CompanyDetail {
            company,
            invoices,
            industries,
        })
    }

    /// Insert a company whose code is the slug of its name. A name with no letters or digits
    /// is rejected; duplicate or missing values fail at the store.
    pub async fn create(pool: &PgPool, input: &CompanyInput) -> Result<Company, AppError> {
        let code = input.name.as_deref().map(|name| code_for("name", name)).transpose()?;
        tracing::debug!(sql = %INSERT, code = ?code, "query");
        let company = sqlx::query_as::<_, Company>(INSERT)
            .bind(code)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await?;
        tracing::info!(code = %company.code, "company created");
        Ok(company)
    }

    pub async fn update(pool: &PgPool, code: &str, input: &CompanyInput) -> Result<Company, AppError> {
        tracing::debug!(sql = %UPDATE, code = %code, "query");
        let company = sqlx::query_as::<_, Company>(UPDATE)
            .bind(&input.name)
            .bind(&input.description)
            .bind(code)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't update company with code of {}", code)))?;
        tracing::info!(code = %company.code, "company updated");
        Ok(company)
    }

    pub async fn delete(pool: &PgPool, code: &str) -> Result<(), AppError> {
        tracing::debug!(sql = %DELETE, code = %code, "query");
        let deleted: Option<String> = sqlx::query_scalar(DELETE).bind(code).fetch_optional(pool).await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("Can't delete company with code of {}", code)));
        }
        tracing::info!(code = %code, "company deleted");
        Ok(())
    }
}
