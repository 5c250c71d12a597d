use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;

use crate::{
    db::SavedPropertyExt,
    dtos::propertydtos::SavedPropertyDto,
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn saved_properties_handler() -> Router {
    Router::new()
        .route("/", post(save_property).delete(remove_saved_property))
        .route("/user/:user_id", get(get_saved_properties))
}

pub async fn get_saved_properties(
    Path(user_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let saved = app_state.db_client.get_saved_properties_by_user(user_id).await?;

    Ok(Json(saved))
}

pub async fn save_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SavedPropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    let saved = app_state
        .db_client
        .save_property(body.user_id, body.property_id)
        .await?;

    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn remove_saved_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SavedPropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .db_client
        .remove_saved_property(body.user_id, body.property_id)
        .await?;

    if !removed {
        return Err(ErrorMessage::SavedPropertyNotFound.into());
    }

    Ok(Json(json!({ "success": true })))
}
