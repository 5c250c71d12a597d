use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use validator::Validate;

use crate::{
    db::{AmenityExt, NeighborhoodExt},
    dtos::neighborhooddtos::{
        CreateAmenityCategoryDto, CreateAmenityDto, CreateNeighborhoodAmenityDto,
        NearbyAmenitiesQueryDto, NeighborhoodAmenityKeyDto, UpdateAmenityDto,
    },
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn amenity_categories_handler() -> Router {
    Router::new().route("/", get(get_amenity_categories).post(create_amenity_category))
}

pub fn amenities_handler() -> Router {
    Router::new()
        .route("/", get(get_amenities).post(create_amenity))
        .route("/nearby", get(get_nearby_amenities))
        .route("/category/:category_id", get(get_amenities_by_category))
        .route("/neighborhood/:neighborhood_id", get(get_amenities_by_neighborhood))
        .route("/:amenity_id", get(get_amenity).patch(update_amenity))
}

/// Neighborhood/amenity links, mounted at `/api/neighborhood-amenities`.
pub fn neighborhood_amenities_handler() -> Router {
    Router::new().route(
        "/",
        post(add_amenity_to_neighborhood).delete(remove_amenity_from_neighborhood),
    )
}

pub async fn get_amenity_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state.db_client.get_all_amenity_categories().await?;

    Ok(Json(categories))
}

pub async fn create_amenity_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateAmenityCategoryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let category = app_state.db_client.create_amenity_category(body).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_amenities(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let amenities = app_state.db_client.get_all_amenities().await?;

    Ok(Json(amenities))
}

pub async fn get_amenity(
    Path(amenity_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let amenity = app_state
        .db_client
        .get_amenity(amenity_id)
        .await?
        .ok_or(ErrorMessage::AmenityNotFound)?;

    Ok(Json(amenity))
}

pub async fn get_amenities_by_category(
    Path(category_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let amenities = app_state.db_client.get_amenities_by_category(category_id).await?;

    Ok(Json(amenities))
}

pub async fn get_amenities_by_neighborhood(
    Path(neighborhood_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let amenities = app_state
        .db_client
        .get_amenities_by_neighborhood(neighborhood_id)
        .await?;

    Ok(Json(amenities))
}

pub async fn get_nearby_amenities(
    Query(query_params): Query<NearbyAmenitiesQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (latitude, longitude, radius) = query_params
        .parse()
        .map_err(HttpError::bad_request)?;

    let amenities = app_state
        .db_client
        .get_nearby_amenities(latitude, longitude, radius)
        .await?;

    Ok(Json(amenities))
}

pub async fn create_amenity(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateAmenityDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if app_state.db_client.get_amenity_category(body.category_id).await?.is_none() {
        return Err(HttpError::bad_request(ErrorMessage::AmenityCategoryNotFound.to_string()));
    }

    let amenity = app_state.db_client.create_amenity(body).await?;

    Ok((StatusCode::CREATED, Json(amenity)))
}

pub async fn update_amenity(
    Path(amenity_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateAmenityDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(category_id) = body.category_id {
        if app_state.db_client.get_amenity_category(category_id).await?.is_none() {
            return Err(HttpError::bad_request(ErrorMessage::AmenityCategoryNotFound.to_string()));
        }
    }

    let amenity = app_state
        .db_client
        .update_amenity(amenity_id, body)
        .await?
        .ok_or(ErrorMessage::AmenityNotFound)?;

    Ok(Json(amenity))
}

pub async fn add_amenity_to_neighborhood(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateNeighborhoodAmenityDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if app_state.db_client.get_neighborhood(body.neighborhood_id).await?.is_none() {
        return Err(HttpError::bad_request(ErrorMessage::NeighborhoodNotFound.to_string()));
    }

    if app_state.db_client.get_amenity(body.amenity_id).await?.is_none() {
        return Err(HttpError::bad_request(ErrorMessage::AmenityNotFound.to_string()));
    }

    let link = app_state.db_client.add_amenity_to_neighborhood(body).await?;

    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn remove_amenity_from_neighborhood(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<NeighborhoodAmenityKeyDto>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .db_client
        .remove_amenity_from_neighborhood(body.neighborhood_id, body.amenity_id)
        .await?;

    if !removed {
        return Err(ErrorMessage::RelationNotFound.into());
    }

    Ok(Json(json!({ "success": true })))
}
