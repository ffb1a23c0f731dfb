use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::services::{CommitmentView, InvestorCommitments, InvestorSummary};
use crate::AppState;

/// One row of the investor list.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvestorSummaryResponse {
    /// Investor id, used to fetch commitments
    id: i32,
    name: String,
    /// Sum of all the investor's commitments
    total_commitment: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentResponse {
    asset_class: String,
    amount: f64,
    currency: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvestorCommitmentsResponse {
    /// Investor name
    investor: String,
    total_commitment: f64,
    commitments: Vec<CommitmentResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CommitmentsQuery {
    /// Optional: only return commitments in this asset class. `All` returns every commitment.
    #[param(required = false)]
    asset_class: Option<String>,
}

impl From<InvestorSummary> for InvestorSummaryResponse {
    fn from(summary: InvestorSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            total_commitment: summary.total_commitment,
        }
    }
}

impl From<CommitmentView> for CommitmentResponse {
    fn from(view: CommitmentView) -> Self {
        Self {
            asset_class: view.asset_class,
            amount: view.amount,
            currency: view.currency,
        }
    }
}

impl From<InvestorCommitments> for InvestorCommitmentsResponse {
    fn from(details: InvestorCommitments) -> Self {
        Self {
            investor: details.investor,
            total_commitment: details.total_commitment,
            commitments: details.commitments.into_iter().map(Into::into).collect(),
        }
    }
}

/// List all investors with their total commitment
#[utoipa::path(
    get,
    path = "/investors/",
    tag = "investors",
    responses(
        (status = 200, description = "All investors", body = [InvestorSummaryResponse]),
        (status = 500, description = "Storage failure")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_investors(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvestorSummaryResponse>>, AppError> {
    let investors = state.investor_service().get_all_investors().await?;
    tracing::debug!("Returning {} investors", investors.len());
    Ok(Json(investors.into_iter().map(Into::into).collect()))
}

/// Get an investor's commitments, optionally filtered by asset class
#[utoipa::path(
    get,
    path = "/investors/{investor_id}/commitments/",
    tag = "investors",
    params(
        ("investor_id" = i32, Path, description = "Investor id"),
        CommitmentsQuery
    ),
    responses(
        (
            status = 200,
            description = "Investor with its commitments",
            body = InvestorCommitmentsResponse
        ),
        (status = 404, description = "Investor not found"),
        (status = 500, description = "Storage failure")
    )
)]
#[tracing::instrument(skip(state, query))]
pub async fn get_investor_commitments(
    State(state): State<AppState>,
    Path(investor_id): Path<i32>,
    Query(query): Query<CommitmentsQuery>,
) -> Result<Json<InvestorCommitmentsResponse>, AppError> {
    state
        .investor_service()
        .get_investor_commitments_filtered(investor_id, query.asset_class.as_deref())
        .await?
        .map(|details| Json(details.into()))
        .ok_or(AppError::InvestorNotFound(investor_id))
}

/// Investor routes, accepted with or without a trailing slash.
pub fn investor_routes() -> Router<AppState> {
    Router::new()
        .route("/investors", get(get_investors))
        .route("/investors/", get(get_investors))
        .route("/investors/{investor_id}/commitments", get(get_investor_commitments))
        .route("/investors/{investor_id}/commitments/", get(get_investor_commitments))
}
