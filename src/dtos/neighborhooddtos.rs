use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    models::neighborhoodmodels::{Amenity, Neighborhood},
    utils::numeric::leading_float,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNeighborhoodDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    pub description: String,
    #[validate(range(min = 0, max = 100, message = "Safety rating must be between 0 and 100"))]
    pub safety_rating: i32,
    #[validate(range(min = 0, max = 100, message = "Walkability score must be between 0 and 100"))]
    pub walkability_score: i32,
    #[validate(range(min = 0, max = 100, message = "School rating must be between 0 and 100"))]
    pub school_rating: i32,
    pub image_url: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNeighborhoodDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub safety_rating: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub walkability_score: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub school_rating: Option<i32>,
    pub image_url: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl UpdateNeighborhoodDto {
    pub fn apply(self, neighborhood: &mut Neighborhood) {
        if let Some(name) = self.name {
            neighborhood.name = name;
        }
        if let Some(city) = self.city {
            neighborhood.city = city;
        }
        if let Some(description) = self.description {
            neighborhood.description = description;
        }
        if let Some(safety_rating) = self.safety_rating {
            neighborhood.safety_rating = safety_rating;
        }
        if let Some(walkability_score) = self.walkability_score {
            neighborhood.walkability_score = walkability_score;
        }
        if let Some(school_rating) = self.school_rating {
            neighborhood.school_rating = school_rating;
        }
        if let Some(image_url) = self.image_url {
            neighborhood.image_url = image_url;
        }
        if let Some(latitude) = self.latitude {
            neighborhood.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            neighborhood.longitude = longitude;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAmenityCategoryDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Icon is required"))]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAmenityDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub category_id: i32,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub phone_number: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAmenityDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl UpdateAmenityDto {
    pub fn apply(self, amenity: &mut Amenity) {
        if let Some(name) = self.name {
            amenity.name = name;
        }
        if let Some(category_id) = self.category_id {
            amenity.category_id = category_id;
        }
        if let Some(address) = self.address {
            amenity.address = address;
        }
        if let Some(description) = self.description {
            amenity.description = description;
        }
        if let Some(image_url) = self.image_url {
            amenity.image_url = image_url;
        }
        if let Some(website) = self.website {
            amenity.website = website;
        }
        if let Some(phone_number) = self.phone_number {
            amenity.phone_number = phone_number;
        }
        if let Some(latitude) = self.latitude {
            amenity.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            amenity.longitude = longitude;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNeighborhoodAmenityDto {
    pub neighborhood_id: i32,
    pub amenity_id: i32,
    /// Author-supplied distance in km; it is not recomputed from coordinates.
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodAmenityKeyDto {
    pub neighborhood_id: i32,
    pub amenity_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNeighborhoodDto {
    pub property_id: i32,
    pub neighborhood_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyAmenitiesQueryDto {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius: Option<String>,
}

impl NearbyAmenitiesQueryDto {
    /// Returns `(latitude, longitude, radius_km)`.
    pub fn parse(&self) -> Result<(f64, f64, f64), String> {
        let (Some(latitude), Some(longitude), Some(radius)) =
            (&self.latitude, &self.longitude, &self.radius)
        else {
            return Err("Latitude, longitude, and radius are required".to_string());
        };

        match (leading_float(latitude), leading_float(longitude), leading_float(radius)) {
            (Some(lat), Some(lng), Some(rad)) => Ok((lat, lng, rad)),
            _ => Err("Invalid latitude, longitude, or radius".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_query_requires_all_parameters() {
        let query = NearbyAmenitiesQueryDto {
            latitude: Some("-15.4".to_string()),
            longitude: None,
            radius: Some("5".to_string()),
        };
        assert_eq!(
            query.parse(),
            Err("Latitude, longitude, and radius are required".to_string())
        );
    }

    #[test]
    fn test_nearby_query_rejects_non_numeric() {
        let query = NearbyAmenitiesQueryDto {
            latitude: Some("-15.4".to_string()),
            longitude: Some("east".to_string()),
            radius: Some("5".to_string()),
        };
        assert_eq!(
            query.parse(),
            Err("Invalid latitude, longitude, or radius".to_string())
        );
    }

    #[test]
    fn test_nearby_query_accepts_units_after_numbers() {
        let query = NearbyAmenitiesQueryDto {
            latitude: Some("-17.8419".to_string()),
            longitude: Some("25.8544E".to_string()),
            radius: Some("5km".to_string()),
        };
        assert_eq!(query.parse(), Ok((-17.8419, 25.8544, 5.0)));
    }

    #[test]
    fn test_amenity_optional_text_defaults_to_empty() {
        let body = serde_json::json!({
            "name": "East Park Mall",
            "categoryId": 3,
            "address": "Great East Road",
            "latitude": -15.3952,
            "longitude": 28.3236
        });
        let amenity: CreateAmenityDto = serde_json::from_value(body).unwrap();
        assert_eq!(amenity.description, "");
        assert_eq!(amenity.website, "");
        assert_eq!(amenity.phone_number, "");
        assert_eq!(amenity.image_url, "");
    }
}
