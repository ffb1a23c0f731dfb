use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{commitment, Commitment, Investor};
use crate::error::DataAccessError;
use crate::models::{CommitmentRecord, InvestorRecord};

/// Read access to investors and their commitments.
#[async_trait]
pub trait InvestorRepository: Send + Sync {
    /// All investors, in whatever order storage returns them.
    async fn get_all_investors(&self) -> Result<Vec<InvestorRecord>, DataAccessError>;

    /// `Ok(None)` when no investor has this id.
    async fn get_investor_by_id(
        &self,
        investor_id: i32,
    ) -> Result<Option<InvestorRecord>, DataAccessError>;

    /// Empty when the investor has no commitments or does not exist.
    async fn get_commitments_by_investor(
        &self,
        investor_id: i32,
    ) -> Result<Vec<CommitmentRecord>, DataAccessError>;
}

/// [`InvestorRepository`] backed by a sea-orm connection pool.
///
/// Each query checks a connection out of the pool and returns it when the query
/// completes, whether it succeeded or not.
#[derive(Clone)]
pub struct SeaOrmInvestorRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmInvestorRepository {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }
}

// Logs the underlying storage or decoding failure and hands back only `message`.
fn data_access_error(message: String, err: impl std::fmt::Display) -> DataAccessError {
    tracing::error!(error = %err, "{}", message);
    DataAccessError::new(message)
}

#[async_trait]
impl InvestorRepository for SeaOrmInvestorRepository {
    async fn get_all_investors(&self) -> Result<Vec<InvestorRecord>, DataAccessError> {
        let message = || "Failed to fetch investors".to_string();
        Investor::find()
            .all(self.db.as_ref())
            .await
            .map_err(|e| data_access_error(message(), e))?
            .into_iter()
            .map(|model| {
                InvestorRecord::try_from(model).map_err(|e| data_access_error(message(), e))
            })
            .collect()
    }

    async fn get_investor_by_id(
        &self,
        investor_id: i32,
    ) -> Result<Option<InvestorRecord>, DataAccessError> {
        let message = || format!("Failed to fetch investor {investor_id}");
        Investor::find_by_id(investor_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| data_access_error(message(), e))?
            .map(InvestorRecord::try_from)
            .transpose()
            .map_err(|e| data_access_error(message(), e))
    }

    async fn get_commitments_by_investor(
        &self,
        investor_id: i32,
    ) -> Result<Vec<CommitmentRecord>, DataAccessError> {
        let message = || format!("Failed to fetch commitments for investor {investor_id}");
        Commitment::find()
            .filter(commitment::Column::InvestorId.eq(investor_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| data_access_error(message(), e))?
            .into_iter()
            .map(|model| {
                CommitmentRecord::try_from(model).map_err(|e| data_access_error(message(), e))
            })
            .collect()
    }
}
