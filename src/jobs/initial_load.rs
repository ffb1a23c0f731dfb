//! One-time seeding of the database from the commitment ledger CSV.
//!
//! The ledger is flat: one row per commitment, with the owning investor's details
//! repeated on every row. Investors are deduplicated by name and their
//! `total_commitment` is accumulated as an exact decimal while the file is read.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::entities::{commitment, investor, Investor};
use crate::error::IngestionError;

// Keeps each multi-row insert well under SQLite's bound parameter limit.
const COMMITMENT_BATCH_SIZE: usize = 500;

#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Investor Name")]
    investor_name: String,
    #[serde(rename = "Investor Type")]
    investor_type: String,
    #[serde(rename = "Investor Country")]
    investor_country: String,
    #[serde(rename = "Investor Date Added")]
    investor_date_added: String,
    #[serde(rename = "Investor Last Updated")]
    investor_last_updated: String,
    #[serde(rename = "Commitment Asset Class")]
    commitment_asset_class: String,
    #[serde(rename = "Commitment Amount")]
    commitment_amount: String,
    #[serde(rename = "Commitment Currency")]
    commitment_currency: String,
}

/// An investor as first seen in the ledger, with its running total.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingInvestor {
    pub name: String,
    pub investor_type: String,
    pub country: String,
    pub date_added: String,
    pub last_updated: String,
    pub total_commitment: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommitment {
    /// Index into [`Ledger::investors`].
    pub investor: usize,
    pub asset_class: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Parsed ledger, not yet persisted.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Investors in first-seen order.
    pub investors: Vec<PendingInvestor>,
    /// Commitments in source row order.
    pub commitments: Vec<PendingCommitment>,
}

impl Ledger {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestionError> {
        let reader = ReaderBuilder::new().from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: io::Read>(source: R) -> Result<Self, IngestionError> {
        let reader = ReaderBuilder::new().from_reader(source);
        Self::from_csv(reader)
    }

    // Only amounts are trimmed; names are dedup keys and are compared as written.
    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self, IngestionError> {
        let mut ledger = Ledger::default();
        let mut seen: HashMap<String, usize> = HashMap::new();

        let headers = reader.headers()?.clone();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: LedgerRow = record.deserialize(Some(&headers))?;
            let amount = parse_amount(&row.commitment_amount).ok_or_else(|| {
                IngestionError::InvalidAmount {
                    line,
                    value: row.commitment_amount.clone(),
                }
            })?;

            let index = match seen.get(&row.investor_name) {
                Some(&index) => index,
                None => {
                    let index = ledger.investors.len();
                    ledger.investors.push(PendingInvestor {
                        name: row.investor_name.clone(),
                        investor_type: row.investor_type,
                        country: row.investor_country,
                        date_added: row.investor_date_added,
                        last_updated: row.investor_last_updated,
                        total_commitment: Decimal::ZERO,
                    });
                    seen.insert(row.investor_name, index);
                    index
                }
            };

            let pending = &mut ledger.investors[index];
            pending.total_commitment = pending
                .total_commitment
                .checked_add(amount)
                .ok_or_else(|| IngestionError::TotalOverflow {
                    investor: pending.name.clone(),
                    line,
                })?;
            ledger.commitments.push(PendingCommitment {
                investor: index,
                asset_class: row.commitment_asset_class,
                amount,
                currency: row.commitment_currency,
            });
        }

        Ok(ledger)
    }
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// What a call to [`load_initial_data`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The `investors` table already had rows; nothing was read or written.
    Skipped,
    Loaded { investors: usize, commitments: usize },
}

/// Seeds an empty database from the ledger at `source_path`.
///
/// Does nothing if any investor row already exists. Otherwise every investor and
/// commitment is written inside a single transaction, so a malformed row or a storage
/// failure leaves the database as it was.
#[tracing::instrument(skip(db, source_path), fields(source = %source_path.as_ref().display()))]
pub async fn load_initial_data(
    db: &DatabaseConnection,
    source_path: impl AsRef<Path>,
) -> Result<LoadOutcome, IngestionError> {
    if Investor::find().count(db).await? > 0 {
        info!("Investors already present, skipping initial load");
        return Ok(LoadOutcome::Skipped);
    }

    let ledger = Ledger::from_path(source_path.as_ref())?;
    debug!(
        "Parsed ledger with {} investors and {} commitments",
        ledger.investors.len(),
        ledger.commitments.len()
    );

    let outcome = store_ledger(db, &ledger).await?;
    if let LoadOutcome::Loaded { investors, commitments } = outcome {
        info!(
            "Initial load finished. Investors: {}, Commitments: {}",
            investors, commitments
        );
    }
    Ok(outcome)
}

/// Writes a parsed ledger in one transaction. Dropping the transaction on error rolls it back.
pub async fn store_ledger(
    db: &DatabaseConnection,
    ledger: &Ledger,
) -> Result<LoadOutcome, IngestionError> {
    let txn = db.begin().await?;

    let mut investor_ids = Vec::with_capacity(ledger.investors.len());
    for pending in &ledger.investors {
        let am = investor::ActiveModel {
            name: Set(pending.name.clone()),
            investor_type: Set(pending.investor_type.clone()),
            country: Set(pending.country.clone()),
            date_added: Set(pending.date_added.clone()),
            last_updated: Set(pending.last_updated.clone()),
            total_commitment: Set(pending.total_commitment.to_string()),
            ..Default::default() // id is generated
        };
        let inserted = am.insert(&txn).await?;
        investor_ids.push(inserted.id);
    }

    for chunk in ledger.commitments.chunks(COMMITMENT_BATCH_SIZE) {
        let models = chunk.iter().map(|pending| commitment::ActiveModel {
            investor_id: Set(investor_ids[pending.investor]),
            asset_class: Set(pending.asset_class.clone()),
            amount: Set(pending.amount.to_string()),
            currency: Set(pending.currency.clone()),
            ..Default::default()
        });
        commitment::Entity::insert_many(models).exec(&txn).await?;
    }

    txn.commit().await?;

    Ok(LoadOutcome::Loaded {
        investors: ledger.investors.len(),
        commitments: ledger.commitments.len(),
    })
}
