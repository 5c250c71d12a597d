use serde::{Deserialize, Serialize};

use crate::models::propertymodel::{ListingType, Property, PropertyStatus};

/// Conjunctive property search. Every present field narrows the result;
/// an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySearchFilters {
    /// Case-insensitive substring over location, city and state.
    pub location: Option<String>,
    /// Exact match.
    pub property_type: Option<String>,
    pub listing_type: Option<ListingType>,
    pub status: Option<PropertyStatus>,
    pub owner_id: Option<i32>,
    /// Inclusive lower bound.
    pub min_price: Option<i32>,
    /// Inclusive upper bound.
    pub max_price: Option<i32>,
}

impl PropertySearchFilters {
    pub fn is_empty(&self) -> bool {
        *self == PropertySearchFilters::default()
    }

    pub fn matches(&self, property: &Property) -> bool {
        if let Some(location) = &self.location {
            let needle = location.to_lowercase();
            let hit = [&property.location, &property.city, &property.state]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(property_type) = &self.property_type {
            if &property.property_type != property_type {
                return false;
            }
        }

        if let Some(listing_type) = self.listing_type {
            if property.listing_type != listing_type {
                return false;
            }
        }

        if let Some(status) = self.status {
            if property.status != status {
                return false;
            }
        }

        if let Some(owner_id) = self.owner_id {
            if property.owner_id != owner_id {
                return false;
            }
        }

        if let Some(min_price) = self.min_price {
            if property.price < min_price {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            if property.price > max_price {
                return false;
            }
        }

        true
    }

    /// `ILIKE` pattern for the location predicate.
    pub fn location_pattern(&self) -> Option<String> {
        self.location.as_deref().map(contains_pattern)
    }
}

/// Builds an `ILIKE` substring pattern, escaping the pattern
/// metacharacters of the user input.
pub fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn property(id: i32, city: &str, property_type: &str, price: i32, listing_type: ListingType) -> Property {
        let now = Utc::now();
        Property {
            id,
            owner_id: 1,
            title: format!("Listing {}", id),
            description: String::new(),
            price,
            property_type: property_type.to_string(),
            listing_type,
            status: PropertyStatus::Active,
            location: format!("Plot {}", id),
            city: city.to_string(),
            state: "Lusaka Province".to_string(),
            latitude: None,
            longitude: None,
            bedrooms: 3,
            bathrooms: 2,
            square_feet: 1500,
            is_featured: false,
            is_new: false,
            image_url: String::new(),
            additional_images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filters = PropertySearchFilters::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&property(1, "Lusaka", "House", 100, ListingType::Sell)));
    }

    #[test]
    fn test_location_is_case_insensitive_across_fields() {
        let p = property(1, "Livingstone", "Villa", 100, ListingType::Sell);
        let by_city = PropertySearchFilters {
            location: Some("livingSTONE".to_string()),
            ..Default::default()
        };
        let by_state = PropertySearchFilters {
            location: Some("province".to_string()),
            ..Default::default()
        };
        let miss = PropertySearchFilters {
            location: Some("Ndola".to_string()),
            ..Default::default()
        };
        assert!(by_city.matches(&p));
        assert!(by_state.matches(&p));
        assert!(!miss.matches(&p));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let p = property(1, "Lusaka", "House", 2_500, ListingType::Rent);
        let filters = PropertySearchFilters {
            min_price: Some(2_500),
            max_price: Some(2_500),
            ..Default::default()
        };
        assert!(filters.matches(&p));

        let too_high = PropertySearchFilters {
            min_price: Some(2_501),
            ..Default::default()
        };
        assert!(!too_high.matches(&p));
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let p = property(1, "Lusaka", "Apartment", 2_500, ListingType::Rent);
        let filters = PropertySearchFilters {
            property_type: Some("Apartment".to_string()),
            listing_type: Some(ListingType::Sell),
            ..Default::default()
        };
        assert!(!filters.matches(&p));
    }

    #[test]
    fn test_location_pattern_escapes_wildcards() {
        let filters = PropertySearchFilters {
            location: Some("100%_off\\".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.location_pattern().as_deref(), Some("%100\\%\\_off\\\\%"));
    }
}
