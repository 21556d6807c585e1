//! Resource services: SQL against the injected pool plus business rules.

mod companies;
mod industries;
mod invoices;
pub use companies::CompanyService;
pub use industries::IndustryService;
pub use invoices::{next_paid_date, InvoiceService};
