//! Industries and the company/industry association.

use crate::error::AppError;
use crate::models::{CompanyIndustry, Industry, IndustryListing, NewCompanyIndustry, NewIndustry};
use crate::slug::code_for;
use sqlx::PgPool;

// Outer join so every industry appears once; one without companies aggregates to `{NULL}`.
const LIST: &str = "SELECT industries.code AS industry_code, industries.industry, \
     array_agg(ci.comp_code ORDER BY ci.comp_code) AS company_codes \
     FROM industries \
     LEFT JOIN companies_industries AS ci ON industries.code = ci.industry_code \
     GROUP BY industries.code, industries.industry \
     ORDER BY industries.code";
const INSERT: &str = "INSERT INTO industries (code, industry) VALUES ($1, $2) RETURNING code, industry";
const ASSOCIATE: &str = "INSERT INTO companies_industries (comp_code, industry_code) VALUES ($1, $2) \
     RETURNING comp_code, industry_code";

pub struct IndustryService;

impl IndustryService {
    pub async fn list(pool: &PgPool) -> Result<Vec<IndustryListing>, AppError> {
        tracing::debug!(sql = %LIST, "query");
        let rows = sqlx::query_as::<_, IndustryListing>(LIST).fetch_all(pool).await?;
        Ok(rows)
    }

    /// Insert an industry whose code is the slug of its display name.
    pub async fn create(pool: &PgPool, input: &NewIndustry) -> Result<Industry, AppError> {
        let code = input.industry.as_deref().map(|name| code_for("industry", name)).transpose()?;
        tracing::debug!(sql = %INSERT, code = ?code, "query");
        let industry = sqlx::query_as::<_, Industry>(INSERT)
            .bind(code)
            .bind(&input.industry)
            .fetch_one(pool)
            .await?;
        tracing::info!(code = %industry.code, "industry created");
        Ok(industry)
    }

    /// Link a company to an industry. Unknown codes and repeated pairs fail at the store.
    pub async fn associate(
        pool: &PgPool,
        industry_code: &str,
        input: &NewCompanyIndustry,
    ) -> Result<CompanyIndustry, AppError> {
        tracing::debug!(sql = %ASSOCIATE, industry_code = %industry_code, comp_code = ?input.comp_code, "query");
        let link = sqlx::query_as::<_, CompanyIndustry>(ASSOCIATE)
            .bind(&input.comp_code)
            .bind(industry_code)
            .fetch_one(pool)
            .await?;
        tracing::info!(comp_code = %link.comp_code, industry_code = %link.industry_code, "company associated with industry");
        Ok(link)
    }
}
