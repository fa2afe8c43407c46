use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;

use toiawase_persist::MessageFilter;

use crate::{
    error::{ApiError, ApiResult},
    forms::MessageForm,
    state::AppState,
};

/// All messages, newest first
pub async fn list_messages(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let messages = state.store.list_messages(&MessageFilter::all()).await?;
    Ok(Html(state.views.message_list(&messages)?))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
) -> ApiResult<Html<String>> {
    let message = state
        .store
        .get_message(&message_id)
        .await?
        .ok_or(ApiError::MessageNotFound(message_id))?;

    Ok(Html(state.views.edit(&message, None)?))
}

/// Replace name and message of a record
///
/// On validation failure the stored record is left untouched and the edit
/// view is shown again with its original values.
pub async fn update_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
    Form(form): Form<MessageForm>,
) -> ApiResult<Response> {
    if let Err(errors) = form.validate() {
        let original = state
            .store
            .get_message(&message_id)
            .await?
            .ok_or(ApiError::MessageNotFound(message_id))?;
        let html = state.views.edit(&original, Some(&errors.summary()))?;
        return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
    }

    state
        .store
        .update_message(&message_id, &form.name, &form.message)
        .await?;
    tracing::info!(message_id = %message_id, "Message updated");

    Ok(Redirect::to("/messages").into_response())
}

pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
) -> ApiResult<Redirect> {
    state.store.delete_message(&message_id).await?;
    tracing::info!(message_id = %message_id, "Message deleted");

    Ok(Redirect::to("/messages"))
}
