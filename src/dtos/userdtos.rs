use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::*;

/// Storage input for a new user. `password` is stored exactly as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    pub user_type: UserType,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, max = 64, message = "Password must be between 6 and 64 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "Passwords do not match")
    )]
    pub confirm_password: String,

    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    pub user_type: UserType,

    #[validate(length(min = 7, max = 20, message = "Phone number must be between 7-20 characters"))]
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

impl RegisterUserDto {
    pub fn into_create(self, hashed_password: String) -> CreateUserDto {
        CreateUserDto {
            username: self.username,
            password: hashed_password,
            email: self.email,
            full_name: self.full_name,
            user_type: self.user_type,
            phone_number: self.phone_number,
            bio: self.bio,
            profile_image: self.profile_image,
        }
    }
}

/// Partial profile update. Absent fields keep their stored value.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters"))]
    pub password: Option<String>,

    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,

    pub user_type: Option<UserType>,

    #[validate(length(min = 7, max = 20, message = "Phone number must be between 7-20 characters"))]
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

impl UpdateUserDto {
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(user_type) = self.user_type {
            user.user_type = user_type;
        }
        if self.phone_number.is_some() {
            user.phone_number = self.phone_number;
        }
        if self.bio.is_some() {
            user.bio = self.bio;
        }
        if self.profile_image.is_some() {
            user.profile_image = self.profile_image;
        }
    }
}

/// User as returned over the wire: never carries the password.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterUserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub user_type: String,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            username: user.username.to_owned(),
            email: user.email.to_owned(),
            full_name: user.full_name.to_owned(),
            user_type: user.user_type.to_str().to_string(),
            phone_number: user.phone_number.clone(),
            bio: user.bio.clone(),
            profile_image: user.profile_image.clone(),
            created_at: user.created_at,
        }
    }
}
