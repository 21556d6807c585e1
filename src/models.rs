//! Row and request types for companies, invoices, industries and their association.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Company with the ids of its invoices and the names of its industries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub invoices: Vec<i32>,
    pub industries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

/// Invoice with its owning company nested in place of `comp_code`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub company: Company,
}

/// Flat row of `invoices JOIN companies`.
#[derive(Debug, FromRow)]
pub struct InvoiceCompanyRow {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub name: String,
    pub description: String,
}

impl From<InvoiceCompanyRow> for InvoiceDetail {
    fn from(row: InvoiceCompanyRow) -> Self {
        InvoiceDetail {
            id: row.id,
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
            company: Company {
                code: row.comp_code,
                name: row.name,
                description: row.description,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

/// One industry with the codes of its companies. `company_codes` is `[null]`
/// for an industry without companies (aggregate over an outer join).
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct IndustryListing {
    pub industry_code: String,
    pub industry: String,
    pub company_codes: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CompanyIndustry {
    pub comp_code: String,
    pub industry_code: String,
}

// Request bodies. Fields are optional so a missing value reaches the store as
// NULL and fails its NOT NULL constraint instead of defaulting.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInvoice {
    pub comp_code: Option<String>,
    pub amt: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceUpdate {
    pub amt: Option<f64>,
    pub paid: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewIndustry {
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCompanyIndustry {
    pub comp_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn company_detail_flattens_company_fields() {
        let detail = CompanyDetail {
            company: Company {
                code: "code1".into(),
                name: "Comp1".into(),
                description: "Decscription1".into(),
            },
            invoices: vec![1],
            industries: vec![],
        };
        assert_eq!(
            serde_json::to_value(detail).unwrap(),
            json!({
                "code": "code1",
                "name": "Comp1",
                "description": "Decscription1",
                "invoices": [1],
                "industries": []
            })
        );
    }

    #[test]
    fn invoice_detail_nests_company() {
        let row = InvoiceCompanyRow {
            id: 1,
            comp_code: "code1".into(),
            amt: 100.0,
            paid: false,
            add_date: Utc.with_ymd_and_hms(2021, 1, 1, 8, 0, 0).unwrap(),
            paid_date: None,
            name: "Comp1".into(),
            description: "Decscription1".into(),
        };
        let value = serde_json::to_value(InvoiceDetail::from(row)).unwrap();
        assert_eq!(value["company"], json!({ "code": "code1", "name": "Comp1", "description": "Decscription1" }));
        assert!(value.get("comp_code").is_none());
        assert_eq!(value["paid_date"], serde_json::Value::Null);
        assert_eq!(value["add_date"], "2021-01-01T08:00:00Z");
    }

    #[test]
    fn missing_body_fields_deserialize_as_none() {
        let body: CompanyInput = serde_json::from_value(json!({})).unwrap();
        assert!(body.name.is_none() && body.description.is_none());
        let body: InvoiceUpdate = serde_json::from_value(json!({ "amt": 150 })).unwrap();
        assert_eq!(body.amt, Some(150.0));
        assert_eq!(body.paid, None);
    }
}
