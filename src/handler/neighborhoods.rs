use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use validator::Validate;

use crate::{
    db::{NeighborhoodExt, PropertyExt},
    dtos::neighborhooddtos::{CreateNeighborhoodDto, PropertyNeighborhoodDto, UpdateNeighborhoodDto},
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn neighborhoods_handler() -> Router {
    Router::new()
        .route("/", get(get_neighborhoods).post(create_neighborhood))
        .route("/city/:city", get(get_neighborhoods_by_city))
        .route("/property/:property_id", get(get_neighborhoods_by_property))
        .route("/:neighborhood_id", get(get_neighborhood).patch(update_neighborhood))
}

/// Property/neighborhood links, mounted at `/api/property-neighborhoods`.
pub fn property_neighborhoods_handler() -> Router {
    Router::new().route(
        "/",
        post(add_property_to_neighborhood).delete(remove_property_from_neighborhood),
    )
}

pub async fn get_neighborhoods(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let neighborhoods = app_state.db_client.get_all_neighborhoods().await?;

    Ok(Json(neighborhoods))
}

pub async fn get_neighborhood(
    Path(neighborhood_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let neighborhood = app_state
        .db_client
        .get_neighborhood(neighborhood_id)
        .await?
        .ok_or(ErrorMessage::NeighborhoodNotFound)?;

    Ok(Json(neighborhood))
}

pub async fn get_neighborhoods_by_city(
    Path(city): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let neighborhoods = app_state.db_client.get_neighborhoods_by_city(&city).await?;

    Ok(Json(neighborhoods))
}

pub async fn get_neighborhoods_by_property(
    Path(property_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let neighborhoods = app_state
        .db_client
        .get_neighborhoods_by_property(property_id)
        .await?;

    Ok(Json(neighborhoods))
}

pub async fn create_neighborhood(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateNeighborhoodDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let neighborhood = app_state.db_client.create_neighborhood(body).await?;

    Ok((StatusCode::CREATED, Json(neighborhood)))
}

pub async fn update_neighborhood(
    Path(neighborhood_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateNeighborhoodDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let neighborhood = app_state
        .db_client
        .update_neighborhood(neighborhood_id, body)
        .await?
        .ok_or(ErrorMessage::NeighborhoodNotFound)?;

    Ok(Json(neighborhood))
}

pub async fn add_property_to_neighborhood(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<PropertyNeighborhoodDto>,
) -> Result<impl IntoResponse, HttpError> {
    if app_state.db_client.get_property(body.property_id).await?.is_none() {
        return Err(HttpError::bad_request(ErrorMessage::PropertyNotFound.to_string()));
    }

    if app_state.db_client.get_neighborhood(body.neighborhood_id).await?.is_none() {
        return Err(HttpError::bad_request(ErrorMessage::NeighborhoodNotFound.to_string()));
    }

    let link = app_state
        .db_client
        .add_property_to_neighborhood(body.property_id, body.neighborhood_id)
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn remove_property_from_neighborhood(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<PropertyNeighborhoodDto>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .db_client
        .remove_property_from_neighborhood(body.property_id, body.neighborhood_id)
        .await?;

    if !removed {
        return Err(ErrorMessage::RelationNotFound.into());
    }

    Ok(Json(json!({ "success": true })))
}
