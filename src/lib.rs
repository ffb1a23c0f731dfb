use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod jobs;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

use repositories::SeaOrmInvestorRepository;
use services::InvestorService;

pub const SERVICE_NAME: &str = "investor-commitments-service";

/// Shared handler state: the storage handle every request draws its connection from.
#[derive(Clone)]
pub struct AppState {
    db: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// A service over a repository scoped to the current request.
    pub fn investor_service(&self) -> InvestorService<SeaOrmInvestorRepository> {
        InvestorService::new(SeaOrmInvestorRepository::new(Arc::clone(&self.db)))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

/// Health check endpoint. Does not touch storage.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            service: SERVICE_NAME,
        }),
    )
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Investor Commitments API",
        description = "API for tracking investors and their capital commitments",
        version = "1.0.0"
    ),
    paths(
        health_check,
        routes::investors::get_investors,
        routes::investors::get_investor_commitments
    ),
    components(schemas(
        HealthResponse,
        routes::investors::InvestorSummaryResponse,
        routes::investors::InvestorCommitmentsResponse,
        routes::investors::CommitmentResponse
    ))
)]
struct ApiDoc;

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let api_doc = ApiDoc::openapi();

    // Investor routes are served at the root and under /api, where the web client looks for them
    let api_routes = routes::investor_routes();

    let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", api_doc);

    Router::new()
        .route("/", get(health_check))
        .merge(api_routes.clone())
        .nest("/api", api_routes)
        .with_state(state)
        .merge(docs_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
