// models/directorymodels.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub image_url: String,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i32,
    pub quote: String,
    pub name: String,
    pub location: String,
    pub rating: i32,
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub property_interest: String,
    pub agreed_to_terms: bool,
}
