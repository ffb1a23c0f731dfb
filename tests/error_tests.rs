mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
};
use common::body_json;
use investor_commitments::error::{AppError, DataAccessError, IngestionError};
use investor_commitments::repositories::{InvestorRepository, SeaOrmInvestorRepository};
use investor_commitments::{create_app, AppState};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use tower::ServiceExt;

fn failing_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_errors([DbErr::Custom("disk I/O error".to_string())])
        .into_connection()
}

#[test]
fn test_app_error_display() {
    let error = AppError::InvestorNotFound(42);
    assert_eq!(error.to_string(), "Investor not found");

    let error = AppError::DataAccess(DataAccessError::new("Failed to fetch investors"));
    assert_eq!(error.to_string(), "Failed to fetch investors");

    let error = IngestionError::InvalidAmount { line: 7, value: "ten".to_string() };
    assert_eq!(error.to_string(), "Invalid commitment amount \"ten\" on line 7");

    let error = IngestionError::TotalOverflow { investor: "A".to_string(), line: 3 };
    assert_eq!(error.to_string(), "Total commitment for \"A\" overflows on line 3");
}

#[tokio::test]
async fn test_app_error_into_response() {
    let response = AppError::InvestorNotFound(999).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Investor not found");

    let error = AppError::DataAccess(DataAccessError::new("Failed to fetch investors"));
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Failed to fetch investors");
}

#[tokio::test]
async fn test_repository_hides_storage_error() {
    let repository = SeaOrmInvestorRepository::new(failing_db());

    let err = repository.get_all_investors().await.unwrap_err();

    assert_eq!(err.message(), "Failed to fetch investors");
    assert!(!err.to_string().contains("disk I/O"));
}

#[tokio::test]
async fn test_repository_lookup_error_names_investor() {
    let repository = SeaOrmInvestorRepository::new(failing_db());

    let err = repository.get_commitments_by_investor(5).await.unwrap_err();

    assert_eq!(err.message(), "Failed to fetch commitments for investor 5");
}

#[tokio::test]
async fn test_storage_failure_maps_to_500() {
    let app = create_app(AppState::new(failing_db()));
    let request = Request::builder()
        .uri("/investors/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Failed to fetch investors");
}

#[tokio::test]
async fn test_health_check_ignores_storage_state() {
    let app = create_app(AppState::new(failing_db()));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}
