//! Record CRUD handlers: submit, list, get, update, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{RecordRequest, RecordResponse, TableResponse};
use crate::app_state::AppState;
use crate::domain::RecordId;
use crate::error::{ErrorResponse, LedgerError};

/// `POST /records` — Submit a new record.
///
/// # Errors
///
/// Returns [`LedgerError`] when the append cannot be written.
#[utoipa::path(
    post,
    path = "/api/v1/records",
    tag = "Records",
    summary = "Submit a new record",
    description = "Appends one record to the ledger. A missing lodge date defaults to the current date.",
    request_body = RecordRequest,
    responses(
        (status = 201, description = "Record appended", body = RecordResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_record(
    State(state): State<AppState>,
    Json(req): Json<RecordRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let record = state.ledger.add(req.into()).await?;
    Ok((StatusCode::CREATED, Json(RecordResponse::from(&record))))
}

/// `GET /records` — The full table in append order.
///
/// Dates are display-formatted. When the backing file cannot be read the
/// table degrades to empty and the failure is reported in `warning`.
#[utoipa::path(
    get,
    path = "/api/v1/records",
    tag = "Records",
    summary = "List all records",
    description = "Returns every record in append order with display-formatted dates.",
    responses(
        (status = 200, description = "The record table", body = TableResponse),
    )
)]
pub async fn list_records(State(state): State<AppState>) -> Json<TableResponse> {
    let outcome = state.ledger.load_table().await;
    let data: Vec<RecordResponse> = outcome.records.iter().map(RecordResponse::from).collect();
    Json(TableResponse {
        total: data.len(),
        data,
        warning: outcome.warning,
    })
}

/// `GET /records/{id}` — One record.
///
/// # Errors
///
/// Returns [`LedgerError::RecordNotFound`] when no record has the id.
#[utoipa::path(
    get,
    path = "/api/v1/records/{id}",
    tag = "Records",
    summary = "Get one record",
    params(
        ("id" = uuid::Uuid, Path, description = "Record UUID"),
    ),
    responses(
        (status = 200, description = "The record", body = RecordResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
    )
)]
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, LedgerError> {
    let record = state.ledger.get(RecordId::from_uuid(id)).await?;
    Ok(Json(RecordResponse::from(&record)))
}

/// `PUT /records/{id}` — Replace a record in place.
///
/// # Errors
///
/// Returns [`LedgerError::RecordNotFound`] when no record has the id.
#[utoipa::path(
    put,
    path = "/api/v1/records/{id}",
    tag = "Records",
    summary = "Update a record",
    description = "Replaces the record with the given id and rewrites the backing file.",
    params(
        ("id" = uuid::Uuid, Path, description = "Record UUID"),
    ),
    request_body = RecordRequest,
    responses(
        (status = 200, description = "The updated record", body = RecordResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
    )
)]
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<RecordRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let record = state.ledger.update(RecordId::from_uuid(id), req.into()).await?;
    Ok(Json(RecordResponse::from(&record)))
}

/// `DELETE /records/{id}` — Remove a record.
///
/// # Errors
///
/// Returns [`LedgerError::RecordNotFound`] when no record has the id.
#[utoipa::path(
    delete,
    path = "/api/v1/records/{id}",
    tag = "Records",
    summary = "Delete a record",
    description = "Removes the record with the given id; remaining records keep their order.",
    params(
        ("id" = uuid::Uuid, Path, description = "Record UUID"),
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found", body = ErrorResponse),
    )
)]
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, LedgerError> {
    state.ledger.delete(RecordId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records", post(create_record).get(list_records))
        .route(
            "/records/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
}
