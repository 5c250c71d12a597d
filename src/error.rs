use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::error::StorageError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(&self).map_err(|_| fmt::Error)?)
    }
}

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    EmptyPassword,
    ExceededMaxPasswordLength(usize),
    InvalidHashFormat,
    HashingError,
    ServerError,
    EmailExist,
    UsernameExist,
    UserNotFound,
    OwnerNotFound,
    NotALandlord,
    NotPropertyOwner,
    PropertyNotFound,
    AgentNotFound,
    MessageNotFound,
    SavedPropertyNotFound,
    NeighborhoodNotFound,
    AmenityNotFound,
    AmenityCategoryNotFound,
    RelationNotFound,
}

impl ErrorMessage {
    fn to_str(&self) -> String {
        match self {
            ErrorMessage::EmptyPassword => "Password cannot be empty".to_string(),
            ErrorMessage::ExceededMaxPasswordLength(max_length) => {
                format!("Password must not be more than {} characters", max_length)
            }
            ErrorMessage::InvalidHashFormat => "Invalid password hash format".to_string(),
            ErrorMessage::HashingError => "Error while hashing password".to_string(),
            ErrorMessage::ServerError => "Server Error. Please try again later".to_string(),
            ErrorMessage::EmailExist => "Email already exists".to_string(),
            ErrorMessage::UsernameExist => "Username already exists".to_string(),
            ErrorMessage::UserNotFound => "User not found".to_string(),
            ErrorMessage::OwnerNotFound => "Owner does not exist".to_string(),
            ErrorMessage::NotALandlord => {
                "Only Landlord & Sell users can list or edit properties".to_string()
            }
            ErrorMessage::NotPropertyOwner => {
                "You are not authorized to edit this property".to_string()
            }
            ErrorMessage::PropertyNotFound => "Property not found".to_string(),
            ErrorMessage::AgentNotFound => "Agent not found".to_string(),
            ErrorMessage::MessageNotFound => "Message not found".to_string(),
            ErrorMessage::SavedPropertyNotFound => "Saved property not found".to_string(),
            ErrorMessage::NeighborhoodNotFound => "Neighborhood not found".to_string(),
            ErrorMessage::AmenityNotFound => "Amenity not found".to_string(),
            ErrorMessage::AmenityCategoryNotFound => "Amenity category not found".to_string(),
            ErrorMessage::RelationNotFound => "Relationship not found".to_string(),
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn into_http_response(self) -> Response {
        let json_response = Json(ErrorResponse {
            status: "fail".to_string(),
            message: self.message.clone(),
        });

        (self.status, json_response).into_response()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

impl From<StorageError> for HttpError {
    fn from(error: StorageError) -> Self {
        tracing::error!("storage failure: {}", error);
        HttpError::server_error(ErrorMessage::ServerError.to_string())
    }
}

impl From<ErrorMessage> for HttpError {
    fn from(message: ErrorMessage) -> Self {
        let status = match message {
            ErrorMessage::UserNotFound
            | ErrorMessage::PropertyNotFound
            | ErrorMessage::AgentNotFound
            | ErrorMessage::MessageNotFound
            | ErrorMessage::SavedPropertyNotFound
            | ErrorMessage::NeighborhoodNotFound
            | ErrorMessage::AmenityNotFound
            | ErrorMessage::AmenityCategoryNotFound
            | ErrorMessage::RelationNotFound => StatusCode::NOT_FOUND,
            ErrorMessage::NotALandlord | ErrorMessage::NotPropertyOwner => StatusCode::FORBIDDEN,
            ErrorMessage::HashingError
            | ErrorMessage::InvalidHashFormat
            | ErrorMessage::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        HttpError::new(message.to_string(), status)
    }
}
