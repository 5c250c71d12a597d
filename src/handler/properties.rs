use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{PropertyExt, UserExt},
    dtos::propertydtos::{
        CreatePropertyDto, PropertySearchQueryDto, UpdatePropertyRequestDto, UpdatePropertyStatusDto,
    },
    error::{ErrorMessage, HttpError},
    models::propertymodel::PropertyStatus,
    AppState,
};

pub fn property_handler() -> Router {
    Router::new()
        .route("/", get(get_properties).post(create_property))
        .route("/search", get(search_properties))
        .route("/featured/list", get(get_featured_properties))
        .route("/owner/:owner_id", get(get_properties_by_owner))
        .route("/:property_id", get(get_property).patch(update_property))
        .route("/:property_id/status", patch(update_property_status))
}

pub async fn get_properties(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state.db_client.get_all_properties().await?;

    Ok(Json(properties))
}

pub async fn search_properties(
    Query(query_params): Query<PropertySearchQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let filters = query_params
        .into_filters()
        .map_err(HttpError::bad_request)?;

    let properties = app_state.db_client.get_properties_by_filters(filters).await?;

    Ok(Json(properties))
}

pub async fn get_featured_properties(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state.db_client.get_featured_properties().await?;

    Ok(Json(properties))
}

pub async fn get_properties_by_owner(
    Path(owner_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state.db_client.get_properties_by_owner(owner_id).await?;

    Ok(Json(properties))
}

pub async fn get_property(
    Path(property_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property(property_id)
        .await?
        .ok_or(ErrorMessage::PropertyNotFound)?;

    Ok(Json(property))
}

//Landlord creates property
pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let owner = app_state
        .db_client
        .get_user(body.owner_id)
        .await?
        .ok_or_else(|| HttpError::bad_request(ErrorMessage::OwnerNotFound.to_string()))?;

    if !owner.user_type.can_list_properties() {
        return Err(ErrorMessage::NotALandlord.into());
    }

    let property = app_state.db_client.create_property(body).await?;

    Ok((StatusCode::CREATED, Json(property)))
}

pub async fn update_property(
    Path(property_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdatePropertyRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .get_property(property_id)
        .await?
        .ok_or(ErrorMessage::PropertyNotFound)?;

    if property.owner_id != body.owner_id {
        return Err(ErrorMessage::NotPropertyOwner.into());
    }

    let owner = app_state.db_client.get_user(body.owner_id).await?;
    if !owner.is_some_and(|owner| owner.user_type.can_list_properties()) {
        return Err(ErrorMessage::NotALandlord.into());
    }

    let updated = app_state
        .db_client
        .update_property(property_id, body.changes)
        .await?
        .ok_or(ErrorMessage::PropertyNotFound)?;

    Ok(Json(updated))
}

pub async fn update_property_status(
    Path(property_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdatePropertyStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let status = body
        .status
        .ok_or_else(|| HttpError::bad_request("Status is required"))?
        .parse::<PropertyStatus>()
        .map_err(HttpError::bad_request)?;

    let property = app_state
        .db_client
        .update_property_status(property_id, status)
        .await?
        .ok_or(ErrorMessage::PropertyNotFound)?;

    Ok(Json(property))
}
