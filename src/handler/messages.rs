use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::MessageExt,
    dtos::messagedtos::CreateMessageDto,
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn messages_handler() -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/user/:user_id", get(get_user_messages))
        .route("/between/:user_one_id/:user_two_id", get(get_conversation))
        .route("/property/:property_id", get(get_property_messages))
        .route("/:message_id/read", patch(mark_message_as_read))
}

pub async fn get_user_messages(
    Path(user_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state.db_client.get_messages_by_user(user_id).await?;

    Ok(Json(messages))
}

pub async fn get_conversation(
    Path((user_one_id, user_two_id)): Path<(i32, i32)>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .db_client
        .get_messages_between_users(user_one_id, user_two_id)
        .await?;

    Ok(Json(messages))
}

pub async fn get_property_messages(
    Path(property_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state.db_client.get_messages_by_property(property_id).await?;

    Ok(Json(messages))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let message = app_state.db_client.create_message(body).await?;

    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn mark_message_as_read(
    Path(message_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let message = app_state
        .db_client
        .mark_message_as_read(message_id)
        .await?
        .ok_or(ErrorMessage::MessageNotFound)?;

    Ok(Json(message))
}
