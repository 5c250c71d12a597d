use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "property_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    #[default]
    Active,
    Sold,
    Rented,
    Inactive,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 4] = [
        PropertyStatus::Active,
        PropertyStatus::Sold,
        PropertyStatus::Rented,
        PropertyStatus::Inactive,
    ];

    pub fn to_str(&self) -> &str {
        match self {
            PropertyStatus::Active => "active",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Rented => "rented",
            PropertyStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyStatus::ALL
            .into_iter()
            .find(|status| status.to_str() == s)
            .ok_or_else(|| {
                "Invalid status. Must be one of: active, sold, rented, inactive".to_string()
            })
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "listing_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Rent,
    Sell,
}

impl ListingType {
    pub fn to_str(&self) -> &str {
        match self {
            ListingType::Rent => "rent",
            ListingType::Sell => "sell",
        }
    }
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rent" => Ok(ListingType::Rent),
            "sell" => Ok(ListingType::Sell),
            _ => Err("Invalid listing type. Must be one of: rent, sell".to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,

    // Basic listing info
    pub title: String,
    pub description: String,
    pub price: i32,
    pub property_type: String,
    pub listing_type: ListingType,
    pub status: PropertyStatus,

    // Location
    pub location: String,
    pub city: String,
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // Specifications
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub square_feet: i32,

    pub is_featured: bool,
    pub is_new: bool,

    // Photos
    pub image_url: String,
    pub additional_images: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedProperty {
    pub id: i32,
    pub user_id: i32,
    pub property_id: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("sold".parse::<PropertyStatus>(), Ok(PropertyStatus::Sold));
        assert_eq!("inactive".parse::<PropertyStatus>(), Ok(PropertyStatus::Inactive));
        assert!("archived".parse::<PropertyStatus>().is_err());
        assert!("Active".parse::<PropertyStatus>().is_err());
    }

    #[test]
    fn test_status_defaults_to_active() {
        assert_eq!(PropertyStatus::default(), PropertyStatus::Active);
    }

    #[test]
    fn test_listing_type_wire_format() {
        assert_eq!(serde_json::to_string(&ListingType::Sell).unwrap(), "\"sell\"");
        assert_eq!("rent".parse::<ListingType>(), Ok(ListingType::Rent));
        assert!("lease".parse::<ListingType>().is_err());
    }
}
