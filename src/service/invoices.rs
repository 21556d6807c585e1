//! Invoice CRUD and the paid/paid_date transition.

use crate::error::AppError;
use crate::models::{Invoice, InvoiceCompanyRow, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const LIST: &str = "SELECT id, comp_code FROM invoices ORDER BY id";
const SELECT_WITH_COMPANY: &str = "SELECT i.id, i.comp_code, i.amt, i.paid, i.add_date, i.paid_date, \
     c.name, c.description FROM invoices AS i INNER JOIN companies AS c ON i.comp_code = c.code \
     WHERE i.id = $1";
const INSERT: &str = "INSERT INTO invoices (comp_code, amt) VALUES ($1, $2) \
     RETURNING id, comp_code, amt, paid, add_date, paid_date";
const LOCK_PAID_STATE: &str = "SELECT paid, paid_date FROM invoices WHERE id = $1 FOR UPDATE";
const UPDATE: &str = "UPDATE invoices SET amt = $1, paid = $2, paid_date = $3 WHERE id = $4 \
     RETURNING id, comp_code, amt, paid, add_date, paid_date";
const DELETE: &str = "DELETE FROM invoices WHERE id = $1 RETURNING id";

/// Settlement date after an update. An invoice is considered paid when it has a
/// paid date: becoming paid stamps `now`, staying paid keeps the first date,
/// becoming (or staying) unpaid clears it.
pub fn next_paid_date(
    prior_paid_date: Option<DateTime<Utc>>,
    paid: bool,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (prior_paid_date, paid) {
        (None, true) => Some(now),
        (_, false) => None,
        (Some(prior), true) => Some(prior),
    }
}

/// Ids are `i64` here; an id beyond the column's range is not found.
pub struct InvoiceService;

impl InvoiceService {
    /// All invoices as `{id, comp_code}`.
    pub async fn list(pool: &PgPool) -> Result<Vec<InvoiceSummary>, AppError> {
        tracing::debug!(sql = %LIST, "query");
        let rows = sqlx::query_as::<_, InvoiceSummary>(LIST).fetch_all(pool).await?;
        Ok(rows)
    }

    /// One invoice with its company nested.
    pub async fn get(pool: &PgPool, id: i64) -> Result<InvoiceDetail, AppError> {
        tracing::debug!(sql = %SELECT_WITH_COMPANY, id, "query");
        let row = sqlx::query_as::<_, InvoiceCompanyRow>(SELECT_WITH_COMPANY)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Can't find invoice with id of {}", id)))?;
        Ok(row.into())
    }

    /// Insert an unpaid invoice. Unknown company, missing fields or a non-positive amount fail at the store.
    pub async fn create(pool: &PgPool, input: &NewInvoice) -> Result<Invoice, AppError> {
        tracing::debug!(sql = %INSERT, comp_code = ?input.comp_code, amt = ?input.amt, "query");
        let invoice = sqlx::query_as::<_, Invoice>(INSERT)
            .bind(&input.comp_code)
            .bind(input.amt)
            .fetch_one(pool)
            .await?;
        tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
        Ok(invoice)
    }

    /// Update amount and paid flag, deriving paid_date with [`next_paid_date`].
    /// The row is locked between reading the prior state and writing the new one.
    /// A missing `paid` keeps the current flag.
    pub async fn update(pool: &PgPool, id: i64, input: &InvoiceUpdate) -> Result<Invoice, AppError> {
        let not_found = || AppError::NotFound(format!("Can't update invoice with id of {}", id));
        let mut tx = pool.begin().await?;

        tracing::debug!(sql = %LOCK_PAID_STATE, id, "query (tx)");
        let (current_paid, prior_paid_date): (bool, Option<DateTime<Utc>>) = sqlx::query_as(LOCK_PAID_STATE)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(not_found)?;

        let paid = input.paid.unwrap_or(current_paid);
        let paid_date = next_paid_date(prior_paid_date, paid, Utc::now());

        tracing::debug!(sql = %UPDATE, id, amt = ?input.amt, paid, "query (tx)");
        let invoice = sqlx::query_as::<_, Invoice>(UPDATE)
            .bind(input.amt)
            .bind(paid)
            .bind(paid_date)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(not_found)?;
        tx.commit().await?;

        tracing::info!(id, paid = invoice.paid, "invoice updated");
        Ok(invoice)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        tracing::debug!(sql = %DELETE, id, "query");
        let deleted: Option<i32> = sqlx::query_scalar(DELETE).bind(id).fetch_optional(pool).await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("Can't delete invoice with id of {}", id)));
        }
        tracing::info!(id, "invoice deleted");
        Ok(())
    }
}
