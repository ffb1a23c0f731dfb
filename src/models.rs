//! Investor and commitment records as the rest of the crate sees them.
//!
//! Money is stored as decimal text in the database and parsed here, so amounts
//! read back exactly as they were written.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::entities::{commitment, investor};

#[derive(Debug, Clone, PartialEq)]
pub struct InvestorRecord {
    pub id: i32,
    pub name: String,
    pub investor_type: String,
    pub country: String,
    pub date_added: String,
    pub last_updated: String,
    pub total_commitment: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitmentRecord {
    pub id: i32,
    pub investor_id: i32,
    pub asset_class: String,
    pub amount: Decimal,
    pub currency: String,
}

impl TryFrom<investor::Model> for InvestorRecord {
    type Error = rust_decimal::Error;

    fn try_from(db: investor::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            total_commitment: Decimal::from_str(&db.total_commitment)?,
            id: db.id,
            name: db.name,
            investor_type: db.investor_type,
            country: db.country,
            date_added: db.date_added,
            last_updated: db.last_updated,
        })
    }
}

impl TryFrom<commitment::Model> for CommitmentRecord {
    type Error = rust_decimal::Error;

    fn try_from(db: commitment::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: Decimal::from_str(&db.amount)?,
            id: db.id,
            investor_id: db.investor_id,
            asset_class: db.asset_class,
            currency: db.currency,
        })
    }
}
