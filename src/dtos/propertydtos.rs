use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    db::filters::PropertySearchFilters,
    models::propertymodel::{ListingType, Property, PropertyStatus},
    utils::numeric::leading_i32,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyDto {
    pub owner_id: i32,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i32,

    //Location
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 100, message = "State is required"))]
    pub state: String,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    //Specifications
    #[validate(range(min = 0, message = "Bedrooms cannot be negative"))]
    pub bedrooms: i32,
    #[validate(range(min = 0, message = "Bathrooms cannot be negative"))]
    pub bathrooms: i32,
    #[validate(range(min = 0, message = "Square feet cannot be negative"))]
    pub square_feet: i32,

    #[validate(length(min = 1, message = "Property type is required"))]
    pub property_type: String,
    pub listing_type: ListingType,
    pub status: Option<PropertyStatus>,

    pub is_featured: Option<bool>,
    pub is_new: Option<bool>,

    //Photos (URLs after uploads)
    #[validate(length(min = 1, message = "A cover image is required"))]
    pub image_url: String,
    pub additional_images: Option<Vec<String>>,
}

/// Partial listing update. Ownership cannot be transferred through it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i32>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 0, message = "Bedrooms cannot be negative"))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0, message = "Bathrooms cannot be negative"))]
    pub bathrooms: Option<i32>,
    #[validate(range(min = 0, message = "Square feet cannot be negative"))]
    pub square_feet: Option<i32>,
    pub property_type: Option<String>,
    pub listing_type: Option<ListingType>,
    pub status: Option<PropertyStatus>,
    pub is_featured: Option<bool>,
    pub is_new: Option<bool>,
    pub image_url: Option<String>,
    pub additional_images: Option<Vec<String>>,
}

impl UpdatePropertyDto {
    pub fn apply(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = description;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(location) = self.location {
            property.location = location;
        }
        if let Some(city) = self.city {
            property.city = city;
        }
        if let Some(state) = self.state {
            property.state = state;
        }
        if self.latitude.is_some() {
            property.latitude = self.latitude;
        }
        if self.longitude.is_some() {
            property.longitude = self.longitude;
        }
        if let Some(bedrooms) = self.bedrooms {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            property.bathrooms = bathrooms;
        }
        if let Some(square_feet) = self.square_feet {
            property.square_feet = square_feet;
        }
        if let Some(property_type) = self.property_type {
            property.property_type = property_type;
        }
        if let Some(listing_type) = self.listing_type {
            property.listing_type = listing_type;
        }
        if let Some(status) = self.status {
            property.status = status;
        }
        if let Some(is_featured) = self.is_featured {
            property.is_featured = is_featured;
        }
        if let Some(is_new) = self.is_new {
            property.is_new = is_new;
        }
        if let Some(image_url) = self.image_url {
            property.image_url = image_url;
        }
        if let Some(additional_images) = self.additional_images {
            property.additional_images = additional_images;
        }
    }
}

/// Body of `PATCH /api/properties/:id`: the caller names itself as owner.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequestDto {
    pub owner_id: i32,
    #[serde(flatten)]
    #[validate]
    pub changes: UpdatePropertyDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePropertyStatusDto {
    pub status: Option<String>,
}

/// Raw search query. Numbers are read from their leading digits and
/// ignored when there are none. The UI placeholders "Any Location" and
/// "Any Type" mean no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchQueryDto {
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub status: Option<String>,
    pub owner_id: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl PropertySearchQueryDto {
    pub fn into_filters(self) -> Result<PropertySearchFilters, String> {
        let listing_type = match non_blank(self.listing_type) {
            Some(value) => Some(value.parse::<ListingType>()?),
            None => None,
        };
        let status = match non_blank(self.status) {
            Some(value) => Some(value.parse::<PropertyStatus>()?),
            None => None,
        };

        Ok(PropertySearchFilters {
            location: non_blank(self.location).filter(|l| l != "Any Location"),
            property_type: non_blank(self.property_type).filter(|t| t != "Any Type"),
            listing_type,
            status,
            owner_id: self.owner_id.as_deref().and_then(leading_i32),
            min_price: self.min_price.as_deref().and_then(leading_i32),
            max_price: self.max_price.as_deref().and_then(leading_i32),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPropertyDto {
    pub user_id: i32,
    pub property_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_placeholders_are_dropped() {
        let query = PropertySearchQueryDto {
            location: Some("Any Location".to_string()),
            property_type: Some("Any Type".to_string()),
            min_price: Some("abc".to_string()),
            max_price: Some("5000000".to_string()),
            ..Default::default()
        };

        let filters = query.into_filters().unwrap();
        assert_eq!(filters.location, None);
        assert_eq!(filters.property_type, None);
        assert_eq!(filters.min_price, None);
        assert_eq!(filters.max_price, Some(5_000_000));
    }

    #[test]
    fn test_search_query_reads_leading_digits() {
        let query = PropertySearchQueryDto {
            owner_id: Some("2nd".to_string()),
            min_price: Some("1000abc".to_string()),
            max_price: Some(" 250000.75".to_string()),
            ..Default::default()
        };

        let filters = query.into_filters().unwrap();
        assert_eq!(filters.owner_id, Some(2));
        assert_eq!(filters.min_price, Some(1000));
        assert_eq!(filters.max_price, Some(250_000));
    }

    #[test]
    fn test_search_query_rejects_unknown_status() {
        let query = PropertySearchQueryDto {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert!(query.into_filters().is_err());
    }

    #[test]
    fn test_update_request_flattens_changes() {
        let body = serde_json::json!({
            "ownerId": 1,
            "price": 1200,
            "additionalImages": ["a.jpg"]
        });
        let request: UpdatePropertyRequestDto = serde_json::from_value(body).unwrap();
        assert_eq!(request.owner_id, 1);
        assert_eq!(request.changes.price, Some(1200));
        assert_eq!(request.changes.additional_images, Some(vec!["a.jpg".to_string()]));
        assert_eq!(request.changes.title, None);
    }
}
