use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub description: String,
    pub safety_rating: i32,
    pub walkability_score: i32,
    pub school_rating: i32,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmenityCategory {
    pub id: i32,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub address: String,
    pub description: String,
    pub image_url: String,
    pub website: String,
    pub phone_number: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Amenity {
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// An amenity annotated with a distance in km.
///
/// For neighborhood lookups the distance is the one stored on the
/// neighborhood/amenity edge; for radius searches it is measured from the
/// query point.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmenityWithDistance {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub amenity: Amenity,
    pub distance: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodAmenity {
    pub id: i32,
    pub neighborhood_id: i32,
    pub amenity_id: i32,
    pub distance: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNeighborhood {
    pub id: i32,
    pub property_id: i32,
    pub neighborhood_id: i32,
}
