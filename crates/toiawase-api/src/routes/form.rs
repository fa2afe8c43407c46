use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;

use crate::{
    error::ApiResult,
    forms::{FieldErrors, MessageForm},
    state::AppState,
};

pub async fn index() -> Redirect {
    Redirect::to("/form")
}

/// Empty submission form
pub async fn show_form(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let html = state
        .views
        .form(&MessageForm::default(), &FieldErrors::default())?;
    Ok(Html(html))
}

/// Validate and store a submission
///
/// Invalid input re-renders the form with the entered values and field
/// errors (400); nothing is stored.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MessageForm>,
) -> ApiResult<Response> {
    if let Err(errors) = form.validate() {
        let html = state.views.form(&form, &errors)?;
        return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
    }

    let stored = state.store.insert_message(form.into_new_message()).await?;
    tracing::info!(message_id = %stored.id, "Message submitted");

    Ok(Redirect::to("/thanks").into_response())
}

pub async fn thanks(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    Ok(Html(state.views.thanks()?))
}
