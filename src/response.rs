//! Response envelope helpers. Every payload is wrapped in a single named key,
//! e.g. `{"company": {...}}` or `{"invoices": [...]}`.

use axum::{http::StatusCode, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One-key JSON object: `{ key: data }`.
pub struct Envelope<T> {
    pub key: &'static str,
    pub data: T,
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.data)?;
        map.end()
    }
}

#[derive(serde::Serialize)]
pub struct DeletedBody {
    pub status: &'static str,
}

pub fn success_one<T: Serialize>(key: &'static str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, Json(Envelope { key, data }))
}

pub fn success_one_ok<T: Serialize>(key: &'static str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope { key, data }))
}

pub fn success_many<T: Serialize>(key: &'static str, data: Vec<T>) -> (StatusCode, Json<Envelope<Vec<T>>>) {
    (StatusCode::OK, Json(Envelope { key, data }))
}

pub fn deleted() -> (StatusCode, Json<DeletedBody>) {
    (StatusCode::OK, Json(DeletedBody { status: "deleted" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_wraps_under_key() {
        let (status, Json(body)) = success_many("invoices", vec![json!({ "id": 1, "comp_code": "code1" })]);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "invoices": [{ "id": 1, "comp_code": "code1" }] })
        );
    }

    #[test]
    fn created_envelope() {
        let (status, Json(body)) = success_one("industry", json!({ "code": "ind3", "industry": "Ind3" }));
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "industry": { "code": "ind3", "industry": "Ind3" } })
        );
    }

    #[test]
    fn deleted_body() {
        let (status, Json(body)) = deleted();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::to_value(body).unwrap(), json!({ "status": "deleted" }));
    }
}
