//! HTML export handler: the downloadable `table.html` artifact.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::app_state::AppState;

/// File name offered in the download disposition.
const EXPORT_FILE_NAME: &str = "table.html";

/// `GET /records/export` — The table rendered as HTML.
///
/// Served as an attachment so browsers offer it as a download rather
/// than navigating to it.
#[utoipa::path(
    get,
    path = "/api/v1/records/export",
    tag = "Records",
    summary = "Export the table as HTML",
    description = "Renders all current records as a self-contained HTML table fragment, offered as a `table.html` download.",
    responses(
        (status = 200, description = "HTML table artifact", body = String, content_type = "text/html"),
    )
)]
pub async fn export_table(State(state): State<AppState>) -> impl IntoResponse {
    let html = state.ledger.export_html().await;
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        html,
    )
}

/// Export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/records/export", get(export_table))
}
