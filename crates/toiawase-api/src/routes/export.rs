use axum::{
    body::Body,
    extract::{Query, State},
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;

use toiawase_export::{export_date, spawn_csv_artifact, spawn_pdf, ExportError, ExportFormat};
use toiawase_persist::{MessageFilter, MessageQuery};

use crate::{
    error::ApiResult,
    handlers::stream::{artifact_body, attachment},
    state::AppState,
};

/// Download filtered messages as CSV
///
/// The file is written to a unique temporary path first and streamed from
/// there; the path is removed when the response finishes.
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
) -> ApiResult<Response> {
    let filter = MessageFilter::from(&query);
    let messages = state.store.list_messages(&filter).await?;
    let date = export_date(Utc::now());

    tracing::info!(records = messages.len(), "Exporting CSV");
    let artifact = spawn_csv_artifact(state.config.export.temp_dir(), messages, date).await?;
    let body = artifact_body(artifact).await.map_err(ExportError::from)?;

    Ok(attachment(ExportFormat::Csv, date, body))
}

/// Download filtered messages as PDF
pub async fn export_pdf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
) -> ApiResult<Response> {
    let font = state.pdf_font.clone().ok_or(ExportError::FontUnavailable)?;
    let filter = MessageFilter::from(&query);
    let messages = state.store.list_messages(&filter).await?;
    let date = export_date(Utc::now());

    tracing::info!(records = messages.len(), "Exporting PDF");
    let bytes = spawn_pdf(messages, date, font).await?;

    Ok(attachment(ExportFormat::Pdf, date, Body::from(bytes)))
}
