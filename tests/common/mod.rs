#![allow(dead_code)]

use axum::response::Response;
use http_body_util::BodyExt;
use investor_commitments::db;
use investor_commitments::entities::{commitment, investor};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use std::sync::{Arc, Once};
use tempfile::TempDir;

// For initializing tracing once
static INIT: Once = Once::new();

pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// A migrated, empty SQLite database in a temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the connection is used.
pub async fn test_db() -> (TempDir, Arc<DatabaseConnection>) {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let conn = db::connect(&url).await.unwrap();
    db::migrate(&conn).await.unwrap();
    (dir, Arc::new(conn))
}

pub async fn seed_investor(
    conn: &DatabaseConnection,
    name: &str,
    total_commitment: Decimal,
) -> investor::Model {
    investor::ActiveModel {
        name: Set(name.to_string()),
        investor_type: Set("Test Type".to_string()),
        country: Set("UK".to_string()),
        date_added: Set("2024-02-16".to_string()),
        last_updated: Set("2024-02-16".to_string()),
        total_commitment: Set(total_commitment.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .unwrap()
}

pub async fn seed_commitment(
    conn: &DatabaseConnection,
    investor_id: i32,
    asset_class: &str,
    amount: Decimal,
    currency: &str,
) -> commitment::Model {
    commitment::ActiveModel {
        investor_id: Set(investor_id),
        asset_class: Set(asset_class.to_string()),
        amount: Set(amount.to_string()),
        currency: Set(currency.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub const LEDGER_HEADER: &str = "Investor Name,Investor Type,Investor Country,\
                                 Investor Date Added,Investor Last Updated,\
                                 Commitment Asset Class,Commitment Amount,Commitment Currency\n";

/// Writes `rows` under the ledger header into `dir` and returns the file path.
pub fn write_ledger(dir: &TempDir, rows: &str) -> std::path::PathBuf {
    let path = dir.path().join("data.csv");
    std::fs::write(&path, format!("{LEDGER_HEADER}{rows}")).unwrap();
    path
}
