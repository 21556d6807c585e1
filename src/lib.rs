//! biztime: JSON REST backend for companies, invoices and industries on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod slug;
pub mod state;
pub mod store;

pub use config::{Environment, Settings};
pub use error::{AppError, ConfigError};
pub use routes::app;
pub use service::{next_paid_date, CompanyService, IndustryService, InvoiceService};
pub use crate::slug::{code_for, slugify};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
