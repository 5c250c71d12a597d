// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        amenities::{amenities_handler, amenity_categories_handler, neighborhood_amenities_handler},
        directory::directory_handler,
        messages::messages_handler,
        neighborhoods::{neighborhoods_handler, property_neighborhoods_handler},
        properties::property_handler,
        saved_properties::saved_properties_handler,
        users::users_handler,
    },
    AppState,
};

// Health check handler
async fn health_check(Extension(app_state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
        "storage": app_state.env.storage_backend.to_str()
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/properties", property_handler())
        .nest("/users", users_handler())
        .nest("/messages", messages_handler())
        .nest("/saved-properties", saved_properties_handler())
        .nest("/neighborhoods", neighborhoods_handler())
        .nest("/property-neighborhoods", property_neighborhoods_handler())
        .nest("/amenity-categories", amenity_categories_handler())
        .nest("/amenities", amenities_handler())
        .nest("/neighborhood-amenities", neighborhood_amenities_handler())
        .merge(directory_handler())
        .layer(TraceLayer::new_for_http());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .layer(Extension(app_state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::{Config, StorageBackend},
        db::MemStorage,
    };

    fn test_config() -> Config {
        Config {
            database_url: None,
            storage_backend: StorageBackend::Memory,
            port: 8000,
            max_connections: 10,
            seed_sample_data: true,
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }

    async fn seeded_app() -> Router {
        let storage = MemStorage::with_sample_data().await.unwrap();
        create_router(Arc::new(AppState {
            env: test_config(),
            db_client: Arc::new(storage),
        }))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn new_listing(owner_id: i32) -> Value {
        json!({
            "ownerId": owner_id,
            "title": "Garden Cottage",
            "description": "Two bedroom cottage with a borehole",
            "price": 4500,
            "location": "Roma, Lusaka",
            "city": "Lusaka",
            "state": "Lusaka Province",
            "bedrooms": 2,
            "bathrooms": 1,
            "squareFeet": 900,
            "propertyType": "Cottage",
            "listingType": "rent",
            "imageUrl": "https://images.example.com/cottage.jpg"
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = seeded_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_property_lookup_status_codes() {
        let app = seeded_app().await;

        let (status, body) = send(&app, Method::GET, "/api/properties/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Luxury Penthouse");

        let (status, body) = send(&app, Method::GET, "/api/properties/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "fail");

        let (status, _) = send(&app, Method::GET, "/api/properties/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_and_featured() {
        let app = seeded_app().await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/properties/search?location=Any%20Location&listingType=rent",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Luxury City Apartment"]);

        let (status, _) = send(&app, Method::GET, "/api/properties/search?status=archived", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, Method::GET, "/api/properties/featured/list", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_property_checks_owner_role() {
        let app = seeded_app().await;

        let (status, body) = send(&app, Method::POST, "/api/properties", Some(new_listing(1))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "active");
        assert_eq!(body["isFeatured"], false);
        assert_eq!(body["additionalImages"], json!([]));

        let (status, _) = send(&app, Method::POST, "/api/properties", Some(new_listing(2))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, Method::POST, "/api/properties", Some(new_listing(99))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_property_requires_matching_owner() {
        let app = seeded_app().await;

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/api/properties/1",
            Some(json!({ "ownerId": 2, "price": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/properties/1",
            Some(json!({ "ownerId": 1, "price": 17000000 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 17000000);
        assert_eq!(body["title"], "Luxury Penthouse");

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/api/properties/1/status",
            Some(json!({ "status": "archived" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/properties/1/status",
            Some(json!({ "status": "sold" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "sold");
    }

    #[tokio::test]
    async fn test_register_hides_password_and_rejects_duplicates() {
        let app = seeded_app().await;
        let registration = json!({
            "username": "chanda",
            "email": "chanda@example.com",
            "password": "secret123",
            "confirmPassword": "secret123",
            "fullName": "Chanda Mulenga",
            "userType": "Rent & Buy"
        });

        let (status, body) = send(&app, Method::POST, "/api/users/register", Some(registration.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["userType"], "Rent & Buy");
        assert!(body.get("password").is_none());

        let (status, body) = send(&app, Method::POST, "/api/users/register", Some(registration)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already exists");

        let mismatched = json!({
            "username": "bupe",
            "email": "bupe@example.com",
            "password": "secret123",
            "confirmPassword": "secret124",
            "fullName": "Bupe Zulu",
            "userType": "Rent & Buy"
        });
        let (status, _) = send(&app, Method::POST, "/api/users/register", Some(mismatched)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_messages_flow() {
        let app = seeded_app().await;
        let (status, message) = send(
            &app,
            Method::POST,
            "/api/messages",
            Some(json!({ "senderId": 2, "recipientId": 1, "propertyId": 1, "content": "Is it available?" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(message["isRead"], false);

        let uri = format!("/api/messages/{}/read", message["id"]);
        let (status, read) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read["isRead"], true);

        let (_, conversation) = send(&app, Method::GET, "/api/messages/between/1/2", None).await;
        assert_eq!(conversation.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::PATCH, "/api/messages/999/read", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsave_missing_is_not_found() {
        let app = seeded_app().await;
        let pair = json!({ "userId": 2, "propertyId": 3 });

        let (status, _) = send(&app, Method::POST, "/api/saved-properties", Some(pair.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, Method::DELETE, "/api/saved-properties", Some(pair.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = send(&app, Method::DELETE, "/api/saved-properties", Some(pair)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_nearby_requires_numeric_parameters() {
        let app = seeded_app().await;

        let (status, _) = send(&app, Method::GET, "/api/amenities/nearby?latitude=-15.4", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/amenities/nearby?latitude=-15.4&longitude=east&radius=5",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/amenities/nearby?latitude=-17.8419&longitude=25.8544&radius=20km",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Victoria Falls", "Livingstone General Hospital"]);
    }

    #[tokio::test]
    async fn test_relation_endpoints_validate_ids() {
        let app = seeded_app().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/neighborhood-amenities",
            Some(json!({ "neighborhoodId": 1, "amenityId": 999, "distance": 1.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/property-neighborhoods",
            Some(json!({ "propertyId": 6, "neighborhoodId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, linked) = send(&app, Method::GET, "/api/neighborhoods/property/6", None).await;
        assert_eq!(linked.as_array().unwrap().len(), 2);

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/api/property-neighborhoods",
            Some(json!({ "propertyId": 6, "neighborhoodId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, amenities) = send(&app, Method::GET, "/api/amenities/neighborhood/1", None).await;
        assert_eq!(amenities[0]["distance"], 1.2);
        assert_eq!(amenities[0]["name"], "International School of Lusaka");
    }

    #[tokio::test]
    async fn test_waitlist_requires_terms() {
        let app = seeded_app().await;
        let mut entry = json!({
            "fullName": "Mwape Lungu",
            "email": "mwape@example.com",
            "propertyInterest": "Villa",
            "agreedToTerms": false
        });

        let (status, _) = send(&app, Method::POST, "/api/waitlist", Some(entry.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        entry["agreedToTerms"] = json!(true);
        let (status, body) = send(&app, Method::POST, "/api/waitlist", Some(entry)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);

        let (_, agents) = send(&app, Method::GET, "/api/agents", None).await;
        assert_eq!(agents.as_array().unwrap().len(), 4);
    }
}
