//! HTTP handlers for companies, invoices and industries.

pub mod companies;
pub mod industries;
pub mod invoices;
