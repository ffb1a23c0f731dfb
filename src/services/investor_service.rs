use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::DataAccessError;
use crate::models::{CommitmentRecord, InvestorRecord};
use crate::repositories::InvestorRepository;

/// Asset class filter value that matches every commitment.
pub const ALL_ASSET_CLASSES: &str = "All";

#[derive(Debug, Clone, PartialEq)]
pub struct InvestorSummary {
    pub id: i32,
    pub name: String,
    pub total_commitment: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitmentView {
    pub asset_class: String,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestorCommitments {
    /// Investor name.
    pub investor: String,
    pub total_commitment: f64,
    pub commitments: Vec<CommitmentView>,
}

// Amounts leave the service as floats for display; the stored decimals stay authoritative.
fn to_display(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

impl From<InvestorRecord> for InvestorSummary {
    fn from(investor: InvestorRecord) -> Self {
        Self {
            id: investor.id,
            name: investor.name,
            total_commitment: to_display(investor.total_commitment),
        }
    }
}

impl From<CommitmentRecord> for CommitmentView {
    fn from(commitment: CommitmentRecord) -> Self {
        Self {
            asset_class: commitment.asset_class,
            amount: to_display(commitment.amount),
            currency: commitment.currency,
        }
    }
}

/// Shapes repository records into the investor list and commitment detail views.
#[derive(Debug, Clone)]
pub struct InvestorService<R> {
    repository: R,
}

impl<R: InvestorRepository> InvestorService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_investors(&self) -> Result<Vec<InvestorSummary>, DataAccessError> {
        let investors = self.repository.get_all_investors().await?;
        Ok(investors.into_iter().map(InvestorSummary::from).collect())
    }

    /// `Ok(None)` when the investor does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_investor_commitments(
        &self,
        investor_id: i32,
    ) -> Result<Option<InvestorCommitments>, DataAccessError> {
        let Some(investor) = self.repository.get_investor_by_id(investor_id).await? else {
            return Ok(None);
        };

        let commitments = self.repository.get_commitments_by_investor(investor_id).await?;
        Ok(Some(InvestorCommitments {
            investor: investor.name,
            total_commitment: to_display(investor.total_commitment),
            commitments: commitments.into_iter().map(CommitmentView::from).collect(),
        }))
    }

    /// Like [`Self::get_investor_commitments`], keeping only commitments in `asset_class`.
    ///
    /// `None` or [`ALL_ASSET_CLASSES`] keeps everything. The total is always the
    /// investor's full stored total.
    #[tracing::instrument(skip(self))]
    pub async fn get_investor_commitments_filtered(
        &self,
        investor_id: i32,
        asset_class: Option<&str>,
    ) -> Result<Option<InvestorCommitments>, DataAccessError> {
        let mut details = self.get_investor_commitments(investor_id).await?;
        if let (Some(details), Some(wanted)) = (details.as_mut(), asset_class) {
            if wanted != ALL_ASSET_CLASSES {
                details.commitments.retain(|c| c.asset_class == wanted);
            }
        }
        Ok(details)
    }
}
