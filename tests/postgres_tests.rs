//! Integration tests for the PostgreSQL store
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a PostgreSQL container)
//! - Feature flag `postgres` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features postgres --test postgres_tests -- --test-threads=1
//! ```
//!
//! All tests share a single container (via `OnceLock`). Each test opens a
//! fresh pool, truncates both tables and re-seeds the sample data.

#![cfg(feature = "postgres")]

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use dashboard::actions::DELETE_FAILED;
use dashboard::core::model::{InvoiceChanges, NewInvoice};
use dashboard::prelude::*;
use dashboard::storage::seed;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::OnceLock;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

const AMY: &str = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9";
const LEE_INVOICE: &str = "8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a13";

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh pool per test)
// ---------------------------------------------------------------------------

/// Keeps the container alive for the whole test binary
struct PgTestEnv {
    _container: testcontainers::ContainerAsync<Postgres>,
    connection_url: String,
}

/// `OnceLock` from std so the container outlives each `#[tokio::test]` runtime
static TEST_ENV: OnceLock<PgTestEnv> = OnceLock::new();

async fn init_pg_env() -> &'static PgTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool.close().await;

    let _ = TEST_ENV.set(PgTestEnv {
        _container: container,
        connection_url: url,
    });
    TEST_ENV.get().unwrap()
}

async fn pg_pool() -> PgPool {
    let env = init_pg_env().await;
    PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&env.connection_url)
        .await
        .expect("Failed to connect to PostgreSQL")
}

/// A store over freshly truncated and seeded tables
async fn seeded_store() -> PgStore {
    let pool = pg_pool().await;
    sqlx::query("TRUNCATE invoices, customers CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to truncate tables");
    let store = PgStore::new(pool);
    store.seed().await.expect("Failed to seed sample data");
    store
}

async fn count_invoices(store: &PgStore) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
        .fetch_one(store.pool())
        .await
        .expect("Failed to count invoices")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

mod store {
    use super::*;

    #[tokio::test]
    async fn test_insert_returns_generated_id() {
        let store = seeded_store().await;

        let id = store
            .insert(NewInvoice {
                customer_id: AMY.into(),
                amount: 1234,
                status: InvoiceStatus::Pending,
                date: today(),
            })
            .await
            .unwrap();

        let (amount, status, date): (i64, String, NaiveDate) = sqlx::query_as(
            "SELECT amount, status, date FROM invoices WHERE id = $1::uuid",
        )
        .bind(&id)
        .fetch_one(store.pool())
        .await
        .unwrap();
        assert_eq!(amount, 1234);
        assert_eq!(status, "pending");
        assert_eq!(date, today());
    }

    #[tokio::test]
    async fn test_insert_with_unknown_customer_fails() {
        let store = seeded_store().await;

        let result = store
            .insert(NewInvoice {
                customer_id: "00000000-0000-0000-0000-000000000000".into(),
                amount: 1,
                status: InvoiceStatus::Paid,
                date: today(),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_of_missing_invoice_is_not_found() {
        let store = seeded_store().await;

        let result = store
            .update(
                "00000000-0000-0000-0000-000000000000",
                InvoiceChanges {
                    customer_id: AMY.into(),
                    amount: 1,
                    status: InvoiceStatus::Paid,
                },
            )
            .await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_malformed_id_is_a_store_error() {
        let store = seeded_store().await;
        assert!(store.delete("not-a-uuid").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_one_row() {
        let store = seeded_store().await;
        let before = count_invoices(&store).await;

        store.delete(LEE_INVOICE).await.unwrap();

        assert_eq!(count_invoices(&store).await, before - 1);
        assert!(matches!(
            store.delete(LEE_INVOICE).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = seeded_store().await;

        let rows = store.list().await.unwrap();

        assert_eq!(rows.len(), seed::invoices().len());
        assert!(rows.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }

    #[tokio::test]
    async fn test_fetch_filtered_matches_name_and_email() {
        let store = seeded_store().await;

        let by_name = store.fetch_filtered("robin").await.unwrap();
        let by_email = store.fetch_filtered("AMY@").await.unwrap();

        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Lee Robinson");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].total_invoices, 2);
        assert_eq!(by_email[0].total_paid, 4290);
        assert_eq!(by_email[0].total_pending, 0);
    }

    #[tokio::test]
    async fn test_fetch_filtered_treats_wildcards_literally() {
        let store = seeded_store().await;
        assert!(store.fetch_filtered("%").await.unwrap().is_empty());
        assert!(store.fetch_filtered("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_returns_everyone_sorted() {
        let store = seeded_store().await;

        let all = store.fetch_filtered("").await.unwrap();

        assert_eq!(all.len(), seed::customers().len());
        assert!(all.windows(2).all(|pair| pair[0].name <= pair[1].name));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = seeded_store().await;
        let before = count_invoices(&store).await;

        store.seed().await.unwrap();

        assert_eq!(count_invoices(&store).await, before);
    }
}

// ---------------------------------------------------------------------------
// HTTP over PostgreSQL
// ---------------------------------------------------------------------------

mod http {
    use super::*;

    async fn server(store: PgStore) -> TestServer {
        let app = ServerBuilder::new()
            .with_store(store)
            .with_clock(FixedClock(today()))
            .build()
            .expect("Failed to build router");
        TestServer::try_new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_create_stores_cents_and_redirects() {
        let store = seeded_store().await;
        let before = count_invoices(&store).await;
        let server = server(store.clone()).await;

        let response = server
            .post("/dashboard/invoices/create")
            .form(&[("customerId", AMY), ("amount", "12.34"), ("status", "pending")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/dashboard/invoices");
        assert_eq!(count_invoices(&store).await, before + 1);

        let amount: i64 =
            sqlx::query_scalar("SELECT amount FROM invoices WHERE date = $1 LIMIT 1")
                .bind(today())
                .fetch_one(store.pool())
                .await
                .unwrap();
        assert_eq!(amount, 1234);
    }

    #[tokio::test]
    async fn test_delete_of_unknown_id_reports_failure() {
        let store = seeded_store().await;
        let server = server(store).await;

        let response = server
            .post("/dashboard/invoices/00000000-0000-0000-0000-000000000000/delete")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], DELETE_FAILED);
    }

    #[tokio::test]
    async fn test_customers_page_filters() {
        let store = seeded_store().await;
        let server = server(store).await;

        let response = server
            .get("/dashboard/customers")
            .add_query_param("query", "delba")
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Delba de Oliveira"));
        assert!(!html.contains("Balazs Orban"));
    }
}
