//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All record endpoints are mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "lodge-ledger",
        description = "REST API for a CSV-backed lodge record ledger"
    ),
    paths(
        handlers::record::create_record,
        handlers::record::list_records,
        handlers::record::get_record,
        handlers::record::update_record,
        handlers::record::delete_record,
        handlers::export::export_table,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Records", description = "Record table operations and export"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}
