use crate::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use diesel::RunQueryDsl;
use proptest::prelude::*;
use std::sync::Arc;
use tower::ServiceExt;

/// Sets up a test database with migrations applied
///
/// This function:
/// 1. Creates an in-memory SQLite database
/// 2. Runs all migrations to set up the schema
///
/// ### Returns
///
/// An Arc-wrapped database connection pool connected to the in-memory database
pub fn setup_test_db() -> Arc<db::DbPool> {
    // Plain ":memory:" gives each pooled connection its own database, so a
    // unique shared-cache URI keeps the pool on one database per test.
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url).expect("Failed to create test pool");

    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn).expect("Failed to run migrations");

    Arc::new(pool)
}

/// Generates an arbitrary DateTime<Utc> within 2020-01-01 to 2030-01-01
pub fn arb_datetime_utc() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64, 0u32..1_000_000_000u32)
        .prop_map(|(ts, nanos)| DateTime::from_timestamp(ts, nanos).unwrap())
}

/// Generates strings that exercise quoting, whitespace and non-ASCII text
pub fn arb_messy_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC*",
        "[ \t]{0,3}[a-zA-Z0-9'\"%_;]{0,16}[ \t]{0,3}",
        Just(String::new()),
        Just("'; DROP TABLE questions; --".to_string()),
        Just("¿Qué pasa? 🎉 日本語".to_string()),
    ]
}

use diesel::sql_types::Text;
use diesel::QueryableByName;

#[derive(QueryableByName, Debug)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Tests the setup_test_db function
///
/// This test verifies that:
/// 1. The test database can be created and connected to
/// 2. The database has the expected tables
/// 3. The application can serve a request against it
#[tokio::test]
async fn test_setup_test_db() {
    let pool = setup_test_db();
    let mut conn = pool.get().unwrap();

    let table_names: Vec<TableName> = diesel::sql_query("SELECT name FROM sqlite_master WHERE type='table'")
        .load(&mut conn)
        .expect("Failed to load table names");

    for table in ["questions", "__diesel_schema_migrations"] {
        let exists = table_names.iter().any(|t| t.name == table);
        assert!(exists, "Table '{}' not found in database", table);

        let query = format!("SELECT COUNT(*) FROM {}", table);
        let result = diesel::sql_query(&query).execute(&mut conn);
        assert!(result.is_ok(), "Failed to query table '{}': {:?}", table, result.err());
    }

    drop(conn);

    let app = create_app(pool.clone());
    let request = Request::builder()
        .uri("/polls")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_separate_test_dbs_are_isolated() {
    let pool1 = setup_test_db();
    let pool2 = setup_test_db();

    repo::create_question(&pool1, "Only in the first".to_string(), Utc::now()).unwrap();

    assert_eq!(repo::list_questions(&pool1).unwrap().len(), 1);
    assert!(repo::list_questions(&pool2).unwrap().is_empty());
}
