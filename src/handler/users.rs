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
    db::UserExt,
    dtos::userdtos::{FilterUserDto, RegisterUserDto, UpdateUserDto},
    error::{ErrorMessage, HttpError},
    utils::password,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/register", post(register_user))
        .route("/:user_id", get(get_user).patch(update_user))
}

pub async fn register_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if app_state.db_client.get_user_by_email(&body.email).await?.is_some() {
        return Err(ErrorMessage::EmailExist.into());
    }

    if app_state.db_client.get_user_by_username(&body.username).await?.is_some() {
        return Err(ErrorMessage::UsernameExist.into());
    }

    let hashed_password = password::hash(&body.password)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = app_state
        .db_client
        .create_user(body.into_create(hashed_password))
        .await?;

    tracing::info!("registered user {} ({})", user.id, user.username);
    Ok((StatusCode::CREATED, Json(FilterUserDto::filter_user(&user))))
}

pub async fn get_user(
    Path(user_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(user_id)
        .await?
        .ok_or(ErrorMessage::UserNotFound)?;

    Ok(Json(FilterUserDto::filter_user(&user)))
}

pub async fn update_user(
    Path(user_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(mut body): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_user(user_id)
        .await?
        .ok_or(ErrorMessage::UserNotFound)?;

    if let Some(email) = &body.email {
        let taken = app_state.db_client.get_user_by_email(email).await?;
        if taken.is_some_and(|other| other.id != user_id) {
            return Err(ErrorMessage::EmailExist.into());
        }
    }

    if let Some(username) = &body.username {
        let taken = app_state.db_client.get_user_by_username(username).await?;
        if taken.is_some_and(|other| other.id != user_id) {
            return Err(ErrorMessage::UsernameExist.into());
        }
    }

    if let Some(new_password) = body.password.take() {
        let hashed = password::hash(new_password)
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        body.password = Some(hashed);
    }

    let user = app_state
        .db_client
        .update_user(user_id, body)
        .await?
        .ok_or(ErrorMessage::UserNotFound)?;

    Ok(Json(FilterUserDto::filter_user(&user)))
}
