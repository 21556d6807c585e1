//! Shared fixture for database-backed tests.

use axum_test::TestServer;
use biztime::{app, ensure_tables, AppState, Settings};
use sqlx::PgPool;

/// Two companies, three invoices (the second one paid), two industries and one association.
const SEED: &[&str] = &[
    "INSERT INTO companies (code, name, description) VALUES \
     ('code1', 'Comp1', 'Decscription1'), ('code2', 'Comp2', 'Decscription2')",
    "INSERT INTO invoices (comp_code, amt, paid, add_date, paid_date) VALUES \
     ('code1', 100, false, '2021-01-01T00:00:00Z', NULL), \
     ('code2', 200, true, '2022-02-02T00:00:00Z', '2022-02-03T00:00:00Z'), \
     ('code2', 300, false, '2023-03-03T00:00:00Z', NULL)",
    "INSERT INTO industries (code, industry) VALUES ('acct', 'Accounting'), ('tech', 'Technology')",
    "INSERT INTO companies_industries (comp_code, industry_code) VALUES ('code1', 'tech')",
];

pub async fn seed(pool: &PgPool) {
    ensure_tables(pool).await.unwrap();
    for &sql in SEED {
        sqlx::query(sql).execute(pool).await.unwrap();
    }
}

pub async fn seeded_server(pool: PgPool) -> TestServer {
    seed(&pool).await;
    TestServer::new(app(AppState::new(pool, Settings::default()))).unwrap()
}
