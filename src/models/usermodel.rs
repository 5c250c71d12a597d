use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_type")]
pub enum UserType {
    #[serde(rename = "Rent & Buy")]
    #[sqlx(rename = "Rent & Buy")]
    RentAndBuy,
    #[serde(rename = "Landlord & Sell")]
    #[sqlx(rename = "Landlord & Sell")]
    LandlordAndSell,
}

impl UserType {
    pub fn to_str(&self) -> &str {
        match self {
            UserType::RentAndBuy => "Rent & Buy",
            UserType::LandlordAndSell => "Landlord & Sell",
        }
    }

    /// Only landlords may create or edit listings.
    pub fn can_list_properties(&self) -> bool {
        matches!(self, UserType::LandlordAndSell)
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    pub user_type: UserType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    pub created_at: DateTime<Utc>,
}
