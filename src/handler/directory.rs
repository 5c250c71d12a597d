use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::DirectoryExt,
    dtos::directorydtos::CreateWaitlistEntryDto,
    error::{ErrorMessage, HttpError},
    AppState,
};

/// Agents, testimonials and the waitlist, mounted directly under `/api`.
pub fn directory_handler() -> Router {
    Router::new()
        .route("/agents", get(get_agents))
        .route("/agents/:agent_id", get(get_agent))
        .route("/testimonials", get(get_testimonials))
        .route("/waitlist", post(join_waitlist))
}

pub async fn get_agents(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let agents = app_state.db_client.get_all_agents().await?;

    Ok(Json(agents))
}

pub async fn get_agent(
    Path(agent_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let agent = app_state
        .db_client
        .get_agent(agent_id)
        .await?
        .ok_or(ErrorMessage::AgentNotFound)?;

    Ok(Json(agent))
}

pub async fn get_testimonials(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let testimonials = app_state.db_client.get_all_testimonials().await?;

    Ok(Json(testimonials))
}

pub async fn join_waitlist(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateWaitlistEntryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let entry = app_state.db_client.create_waitlist_entry(body).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}
