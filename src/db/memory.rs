use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::{
    amenitydb::{within_radius, AmenityExt},
    directorydb::DirectoryExt,
    error::StorageError,
    filters::PropertySearchFilters,
    messagedb::MessageExt,
    neighborhooddb::NeighborhoodExt,
    propertydb::PropertyExt,
    savedpropertydb::SavedPropertyExt,
    seed, UserExt,
};
use crate::{
    dtos::{
        directorydtos::{CreateAgentDto, CreateTestimonialDto, CreateWaitlistEntryDto},
        messagedtos::CreateMessageDto,
        neighborhooddtos::{
            CreateAmenityCategoryDto, CreateAmenityDto, CreateNeighborhoodAmenityDto,
            CreateNeighborhoodDto, UpdateAmenityDto, UpdateNeighborhoodDto,
        },
        propertydtos::{CreatePropertyDto, UpdatePropertyDto},
        userdtos::{CreateUserDto, UpdateUserDto},
    },
    models::{
        directorymodels::{Agent, Testimonial, WaitlistEntry},
        messagemodels::Message,
        neighborhoodmodels::{
            Amenity, AmenityCategory, AmenityWithDistance, Neighborhood, NeighborhoodAmenity,
            PropertyNeighborhood,
        },
        propertymodel::{Property, PropertyStatus, SavedProperty},
        usermodel::User,
    },
};

/// Rows keyed by id, with a counter that only ever moves forward so ids
/// are never reused.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|row| predicate(row)).cloned()
    }

    fn update(&mut self, id: i32, change: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        change(row);
        Some(row.clone())
    }

    fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> bool {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(row));
        self.rows.len() != before
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Default)]
struct MemTables {
    users: Table<User>,
    properties: Table<Property>,
    agents: Table<Agent>,
    testimonials: Table<Testimonial>,
    waitlist: Table<WaitlistEntry>,
    messages: Table<Message>,
    saved: Table<SavedProperty>,
    neighborhoods: Table<Neighborhood>,
    amenity_categories: Table<AmenityCategory>,
    amenities: Table<Amenity>,
    neighborhood_amenities: Table<NeighborhoodAmenity>,
    property_neighborhoods: Table<PropertyNeighborhood>,
}

/// In-process store. All tables sit behind one lock: reads share it and
/// each mutation holds the write guard for its whole read-modify-write.
#[derive(Debug, Default)]
pub struct MemStorage {
    tables: RwLock<MemTables>,
}

impl MemStorage {
    pub fn new() -> Self {
        MemStorage::default()
    }

    /// A fresh store populated with the sample marketplace data.
    pub async fn with_sample_data() -> Result<Self, StorageError> {
        let storage = MemStorage::new();
        seed::seed_sample_data(&storage).await?;
        Ok(storage)
    }
}

/// Next `updated_at` for a row last touched at `previous`: now, unless the
/// clock has not moved past `previous`.
fn bump_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl UserExt for MemStorage {
    async fn get_user(&self, user_id: i32) -> Result<Option<User>, StorageError> {
        Ok(self.tables.read().await.users.get(user_id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self.tables.read().await.users.find(|u| u.username == username))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        Ok(self.tables.read().await.users.find(|u| u.email == email))
    }

    async fn create_user(&self, user: CreateUserDto) -> Result<User, StorageError> {
        let mut tables = self.tables.write().await;
        let user = tables.users.insert_with(|id| User {
            id,
            username: user.username,
            password: user.password,
            email: user.email,
            full_name: user.full_name,
            user_type: user.user_type,
            phone_number: user.phone_number,
            bio: user.bio,
            profile_image: user.profile_image,
            created_at: Utc::now(),
        });

        tracing::debug!("created user {} ({})", user.id, user.username);
        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: i32,
        changes: UpdateUserDto,
    ) -> Result<Option<User>, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.update(user_id, |user| changes.apply(user)))
    }

    async fn get_user_count(&self) -> Result<i64, StorageError> {
        Ok(self.tables.read().await.users.len() as i64)
    }
}

#[async_trait]
impl PropertyExt for MemStorage {
    async fn get_all_properties(&self) -> Result<Vec<Property>, StorageError> {
        Ok(self.tables.read().await.properties.all())
    }

    async fn get_property(&self, property_id: i32) -> Result<Option<Property>, StorageError> {
        Ok(self.tables.read().await.properties.get(property_id))
    }

    async fn get_properties_by_owner(&self, owner_id: i32) -> Result<Vec<Property>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .properties
            .filter(|p| p.owner_id == owner_id))
    }

    async fn get_featured_properties(&self) -> Result<Vec<Property>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .properties
            .filter(|p| p.is_featured && p.status == PropertyStatus::Active))
    }

    async fn get_properties_by_filters(
        &self,
        filters: PropertySearchFilters,
    ) -> Result<Vec<Property>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .properties
            .filter(|p| filters.matches(p)))
    }

    async fn create_property(&self, property: CreatePropertyDto) -> Result<Property, StorageError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let property = tables.properties.insert_with(|id| Property {
            id,
            owner_id: property.owner_id,
            title: property.title,
            description: property.description,
            price: property.price,
            property_type: property.property_type,
            listing_type: property.listing_type,
            status: property.status.unwrap_or_default(),
            location: property.location,
            city: property.city,
            state: property.state,
            latitude: property.latitude,
            longitude: property.longitude,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            square_feet: property.square_feet,
            is_featured: property.is_featured.unwrap_or(false),
            is_new: property.is_new.unwrap_or(false),
            image_url: property.image_url,
            additional_images: property.additional_images.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        });

        tracing::debug!("created property {} for owner {}", property.id, property.owner_id);
        Ok(property)
    }

    async fn update_property(
        &self,
        property_id: i32,
        changes: UpdatePropertyDto,
    ) -> Result<Option<Property>, StorageError> {
        let mut tables = self.tables.write().await;
        let property = tables.properties.update(property_id, |property| {
            let previous = property.updated_at;
            changes.apply(property);
            property.updated_at = bump_timestamp(previous);
        });

        if let Some(property) = &property {
            tracing::debug!("updated property {}", property.id);
        }
        Ok(property)
    }

    async fn update_property_status(
        &self,
        property_id: i32,
        status: PropertyStatus,
    ) -> Result<Option<Property>, StorageError> {
        let mut tables = self.tables.write().await;
        let property = tables.properties.update(property_id, |property| {
            property.status = status;
            property.updated_at = bump_timestamp(property.updated_at);
        });

        if property.is_some() {
            tracing::debug!("property {} is now {}", property_id, status);
        }
        Ok(property)
    }
}

#[async_trait]
impl DirectoryExt for MemStorage {
    async fn get_all_agents(&self) -> Result<Vec<Agent>, StorageError> {
        Ok(self.tables.read().await.agents.all())
    }

    async fn get_agent(&self, agent_id: i32) -> Result<Option<Agent>, StorageError> {
        Ok(self.tables.read().await.agents.get(agent_id))
    }

    async fn create_agent(&self, agent: CreateAgentDto) -> Result<Agent, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.agents.insert_with(|id| Agent {
            id,
            name: agent.name,
            title: agent.title,
            bio: agent.bio,
            image_url: agent.image_url,
            instagram: agent.instagram,
            linkedin: agent.linkedin,
            email: agent.email,
        }))
    }

    async fn get_all_testimonials(&self) -> Result<Vec<Testimonial>, StorageError> {
        Ok(self.tables.read().await.testimonials.all())
    }

    async fn get_testimonial(&self, testimonial_id: i32) -> Result<Option<Testimonial>, StorageError> {
        Ok(self.tables.read().await.testimonials.get(testimonial_id))
    }

    async fn create_testimonial(
        &self,
        testimonial: CreateTestimonialDto,
    ) -> Result<Testimonial, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.testimonials.insert_with(|id| Testimonial {
            id,
            quote: testimonial.quote,
            name: testimonial.name,
            location: testimonial.location,
            rating: testimonial.rating,
            image_url: testimonial.image_url,
        }))
    }

    async fn get_all_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>, StorageError> {
        Ok(self.tables.read().await.waitlist.all())
    }

    async fn get_waitlist_entry(&self, entry_id: i32) -> Result<Option<WaitlistEntry>, StorageError> {
        Ok(self.tables.read().await.waitlist.get(entry_id))
    }

    async fn create_waitlist_entry(
        &self,
        entry: CreateWaitlistEntryDto,
    ) -> Result<WaitlistEntry, StorageError> {
        let mut tables = self.tables.write().await;
        let entry = tables.waitlist.insert_with(|id| WaitlistEntry {
            id,
            full_name: entry.full_name,
            email: entry.email,
            property_interest: entry.property_interest,
            agreed_to_terms: entry.agreed_to_terms,
        });

        tracing::debug!("waitlist entry {} created", entry.id);
        Ok(entry)
    }
}

#[async_trait]
impl MessageExt for MemStorage {
    async fn get_messages_by_user(&self, user_id: i32) -> Result<Vec<Message>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .messages
            .filter(|m| m.involves(user_id)))
    }

    async fn get_messages_between_users(
        &self,
        user_one_id: i32,
        user_two_id: i32,
    ) -> Result<Vec<Message>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .messages
            .filter(|m| m.is_between(user_one_id, user_two_id)))
    }

    async fn get_messages_by_property(&self, property_id: i32) -> Result<Vec<Message>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .messages
            .filter(|m| m.property_id == Some(property_id)))
    }

    async fn create_message(&self, message: CreateMessageDto) -> Result<Message, StorageError> {
        let mut tables = self.tables.write().await;
        let message = tables.messages.insert_with(|id| Message {
            id,
            sender_id: message.sender_id,
            recipient_id: message.recipient_id,
            property_id: message.property_id,
            content: message.content,
            is_read: false,
            created_at: Utc::now(),
        });

        tracing::debug!(
            "message {} sent from {} to {}",
            message.id,
            message.sender_id,
            message.recipient_id
        );
        Ok(message)
    }

    async fn mark_message_as_read(&self, message_id: i32) -> Result<Option<Message>, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.messages.update(message_id, |m| m.is_read = true))
    }
}

#[async_trait]
impl SavedPropertyExt for MemStorage {
    async fn get_saved_properties_by_user(&self, user_id: i32) -> Result<Vec<SavedProperty>, StorageError> {
        Ok(self.tables.read().await.saved.filter(|s| s.user_id == user_id))
    }

    async fn save_property(&self, user_id: i32, property_id: i32) -> Result<SavedProperty, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.saved.insert_with(|id| SavedProperty {
            id,
            user_id,
            property_id,
            created_at: Utc::now(),
        }))
    }

    async fn remove_saved_property(&self, user_id: i32, property_id: i32) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .saved
            .remove_where(|s| s.user_id == user_id && s.property_id == property_id))
    }
}

#[async_trait]
impl NeighborhoodExt for MemStorage {
    async fn get_all_neighborhoods(&self) -> Result<Vec<Neighborhood>, StorageError> {
        Ok(self.tables.read().await.neighborhoods.all())
    }

    async fn get_neighborhood(&self, neighborhood_id: i32) -> Result<Option<Neighborhood>, StorageError> {
        Ok(self.tables.read().await.neighborhoods.get(neighborhood_id))
    }

    async fn get_neighborhoods_by_city(&self, city: &str) -> Result<Vec<Neighborhood>, StorageError> {
        let needle = city.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .neighborhoods
            .filter(|n| n.city.to_lowercase().contains(&needle)))
    }

    async fn create_neighborhood(
        &self,
        neighborhood: CreateNeighborhoodDto,
    ) -> Result<Neighborhood, StorageError> {
        let mut tables = self.tables.write().await;
        let neighborhood = tables.neighborhoods.insert_with(|id| Neighborhood {
            id,
            name: neighborhood.name,
            city: neighborhood.city,
            description: neighborhood.description,
            safety_rating: neighborhood.safety_rating,
            walkability_score: neighborhood.walkability_score,
            school_rating: neighborhood.school_rating,
            image_url: neighborhood.image_url,
            latitude: neighborhood.latitude,
            longitude: neighborhood.longitude,
        });

        tracing::debug!("created neighborhood {} ({})", neighborhood.id, neighborhood.name);
        Ok(neighborhood)
    }

    async fn update_neighborhood(
        &self,
        neighborhood_id: i32,
        changes: UpdateNeighborhoodDto,
    ) -> Result<Option<Neighborhood>, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .neighborhoods
            .update(neighborhood_id, |neighborhood| changes.apply(neighborhood)))
    }

    async fn get_neighborhoods_by_property(&self, property_id: i32) -> Result<Vec<Neighborhood>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .property_neighborhoods
            .filter(|link| link.property_id == property_id)
            .into_iter()
            .filter_map(|link| tables.neighborhoods.get(link.neighborhood_id))
            .collect())
    }

    async fn add_property_to_neighborhood(
        &self,
        property_id: i32,
        neighborhood_id: i32,
    ) -> Result<PropertyNeighborhood, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.property_neighborhoods.insert_with(|id| PropertyNeighborhood {
            id,
            property_id,
            neighborhood_id,
        }))
    }

    async fn remove_property_from_neighborhood(
        &self,
        property_id: i32,
        neighborhood_id: i32,
    ) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.property_neighborhoods.remove_where(|link| {
            link.property_id == property_id && link.neighborhood_id == neighborhood_id
        }))
    }
}

#[async_trait]
impl AmenityExt for MemStorage {
    async fn get_all_amenity_categories(&self) -> Result<Vec<AmenityCategory>, StorageError> {
        Ok(self.tables.read().await.amenity_categories.all())
    }

    async fn get_amenity_category(&self, category_id: i32) -> Result<Option<AmenityCategory>, StorageError> {
        Ok(self.tables.read().await.amenity_categories.get(category_id))
    }

    async fn create_amenity_category(
        &self,
        category: CreateAmenityCategoryDto,
    ) -> Result<AmenityCategory, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.amenity_categories.insert_with(|id| AmenityCategory {
            id,
            name: category.name,
            icon: category.icon,
        }))
    }

    async fn get_all_amenities(&self) -> Result<Vec<Amenity>, StorageError> {
        Ok(self.tables.read().await.amenities.all())
    }

    async fn get_amenity(&self, amenity_id: i32) -> Result<Option<Amenity>, StorageError> {
        Ok(self.tables.read().await.amenities.get(amenity_id))
    }

    async fn get_amenities_by_category(&self, category_id: i32) -> Result<Vec<Amenity>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .amenities
            .filter(|a| a.category_id == category_id))
    }

    async fn create_amenity(&self, amenity: CreateAmenityDto) -> Result<Amenity, StorageError> {
        let mut tables = self.tables.write().await;
        let amenity = tables.amenities.insert_with(|id| Amenity {
            id,
            name: amenity.name,
            category_id: amenity.category_id,
            address: amenity.address,
            description: amenity.description,
            image_url: amenity.image_url,
            website: amenity.website,
            phone_number: amenity.phone_number,
            latitude: amenity.latitude,
            longitude: amenity.longitude,
        });

        tracing::debug!("created amenity {} ({})", amenity.id, amenity.name);
        Ok(amenity)
    }

    async fn update_amenity(
        &self,
        amenity_id: i32,
        changes: UpdateAmenityDto,
    ) -> Result<Option<Amenity>, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.amenities.update(amenity_id, |amenity| changes.apply(amenity)))
    }

    async fn get_amenities_by_neighborhood(
        &self,
        neighborhood_id: i32,
    ) -> Result<Vec<AmenityWithDistance>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .neighborhood_amenities
            .filter(|link| link.neighborhood_id == neighborhood_id)
            .into_iter()
            .filter_map(|link| {
                tables.amenities.get(link.amenity_id).map(|amenity| AmenityWithDistance {
                    amenity,
                    distance: link.distance,
                })
            })
            .collect())
    }

    async fn get_nearby_amenities(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<AmenityWithDistance>, StorageError> {
        let tables = self.tables.read().await;
        Ok(within_radius(
            tables.amenities.rows.values().cloned(),
            latitude,
            longitude,
            radius_km,
        ))
    }

    async fn add_amenity_to_neighborhood(
        &self,
        link: CreateNeighborhoodAmenityDto,
    ) -> Result<NeighborhoodAmenity, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.neighborhood_amenities.insert_with(|id| NeighborhoodAmenity {
            id,
            neighborhood_id: link.neighborhood_id,
            amenity_id: link.amenity_id,
            distance: link.distance,
        }))
    }

    async fn remove_amenity_from_neighborhood(
        &self,
        neighborhood_id: i32,
        amenity_id: i32,
    ) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(tables.neighborhood_amenities.remove_where(|link| {
            link.neighborhood_id == neighborhood_id && link.amenity_id == amenity_id
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        db::Storage,
        models::{propertymodel::ListingType, usermodel::UserType},
    };

    fn store() -> Arc<dyn Storage> {
        Arc::new(MemStorage::new())
    }

    fn landlord() -> CreateUserDto {
        CreateUserDto {
            username: "mwila".to_string(),
            password: "hashed".to_string(),
            email: "mwila@example.com".to_string(),
            full_name: "Mwila Banda".to_string(),
            user_type: UserType::LandlordAndSell,
            phone_number: None,
            bio: None,
            profile_image: None,
        }
    }

    fn listing(owner_id: i32, city: &str, price: i32, listing_type: ListingType) -> CreatePropertyDto {
        CreatePropertyDto {
            owner_id,
            title: format!("House in {}", city),
            description: "Three bedroom family home".to_string(),
            price,
            location: "Plot 12".to_string(),
            city: city.to_string(),
            state: "Lusaka Province".to_string(),
            latitude: None,
            longitude: None,
            bedrooms: 3,
            bathrooms: 2,
            square_feet: 1800,
            property_type: "House".to_string(),
            listing_type,
            status: None,
            is_featured: None,
            is_new: None,
            image_url: "https://images.example.com/house.jpg".to_string(),
            additional_images: None,
        }
    }

    fn amenity_at(name: &str, latitude: f64, longitude: f64) -> CreateAmenityDto {
        CreateAmenityDto {
            name: name.to_string(),
            category_id: 1,
            address: "Somewhere".to_string(),
            description: String::new(),
            image_url: String::new(),
            website: String::new(),
            phone_number: String::new(),
            latitude,
            longitude,
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_and_never_reused() {
        let db = store();
        let first = db.save_property(1, 1).await.unwrap();
        let second = db.save_property(1, 2).await.unwrap();
        assert!(second.id > first.id);

        assert!(db.remove_saved_property(1, 2).await.unwrap());
        let third = db.save_property(1, 3).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_property_round_trip_applies_defaults() {
        let db = store();
        let owner = db.create_user(landlord()).await.unwrap();
        let created = db
            .create_property(listing(owner.id, "Lusaka", 250_000, ListingType::Sell))
            .await
            .unwrap();

        assert_eq!(created.status, PropertyStatus::Active);
        assert!(!created.is_featured);
        assert!(!created.is_new);
        assert!(created.additional_images.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = db.get_property(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_partial_update_preserves_other_fields() {
        let db = store();
        let created = db
            .create_property(listing(1, "Lusaka", 250_000, ListingType::Sell))
            .await
            .unwrap();

        let changes = UpdatePropertyDto {
            price: Some(240_000),
            ..Default::default()
        };
        let updated = db.update_property(created.id, changes).await.unwrap().unwrap();

        assert_eq!(updated.price, 240_000);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.city, created.city);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let again = db
            .update_property_status(created.id, PropertyStatus::Sold)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.status, PropertyStatus::Sold);
        assert!(again.updated_at > updated.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_rows_return_none() {
        let db = store();
        assert!(db.update_property(42, UpdatePropertyDto::default()).await.unwrap().is_none());
        assert!(db.update_property_status(42, PropertyStatus::Sold).await.unwrap().is_none());
        assert!(db.update_user(42, UpdateUserDto::default()).await.unwrap().is_none());
        assert!(db.mark_message_as_read(42).await.unwrap().is_none());
        assert!(db.get_agent(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filters_are_conjunctive_and_empty_returns_all() {
        let db = store();
        db.create_property(listing(1, "Lusaka", 2_500, ListingType::Rent)).await.unwrap();
        db.create_property(listing(1, "Lusaka", 900_000, ListingType::Sell)).await.unwrap();
        db.create_property(listing(2, "Livingstone", 3_000, ListingType::Rent)).await.unwrap();

        let everything = db
            .get_properties_by_filters(PropertySearchFilters::default())
            .await
            .unwrap();
        assert_eq!(everything.len(), 3);

        let filters = PropertySearchFilters {
            location: Some("lusaka".to_string()),
            listing_type: Some(ListingType::Rent),
            max_price: Some(2_500),
            ..Default::default()
        };
        let hits = db.get_properties_by_filters(filters.clone()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits.iter().all(|p| filters.matches(p)));
        assert_eq!(hits[0].price, 2_500);
    }

    #[tokio::test]
    async fn test_featured_requires_active_status() {
        let db = store();
        let mut featured = listing(1, "Lusaka", 100, ListingType::Sell);
        featured.is_featured = Some(true);
        let shown = db.create_property(featured.clone()).await.unwrap();
        let sold = db.create_property(featured).await.unwrap();
        db.update_property_status(sold.id, PropertyStatus::Sold).await.unwrap();

        let ids: Vec<i32> = db
            .get_featured_properties()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![shown.id]);
    }

    #[tokio::test]
    async fn test_mark_as_read_is_idempotent() {
        let db = store();
        let message = db
            .create_message(CreateMessageDto {
                sender_id: 1,
                recipient_id: 2,
                property_id: Some(1),
                content: "Is the flat still available?".to_string(),
            })
            .await
            .unwrap();
        assert!(!message.is_read);

        let once = db.mark_message_as_read(message.id).await.unwrap().unwrap();
        let twice = db.mark_message_as_read(message.id).await.unwrap().unwrap();
        assert!(once.is_read);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_messages_between_users_match_both_directions() {
        let db = store();
        for (sender_id, recipient_id) in [(1, 2), (2, 1), (1, 3)] {
            db.create_message(CreateMessageDto {
                sender_id,
                recipient_id,
                property_id: None,
                content: "hello".to_string(),
            })
            .await
            .unwrap();
        }

        assert_eq!(db.get_messages_between_users(1, 2).await.unwrap().len(), 2);
        assert_eq!(db.get_messages_between_users(2, 1).await.unwrap().len(), 2);
        assert_eq!(db.get_messages_by_user(1).await.unwrap().len(), 3);
        assert_eq!(db.get_messages_by_user(3).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_nearby_boundary_is_inclusive() {
        let db = store();
        let origin = db.create_amenity(amenity_at("Origin", 0.0, 0.0)).await.unwrap();
        let edge = db.create_amenity(amenity_at("Edge", 0.0, 1.0)).await.unwrap();
        db.create_amenity(amenity_at("Nowhere", f64::NAN, f64::NAN)).await.unwrap();

        let radius = crate::db::geo::distance_km(0.0, 0.0, 0.0, 1.0);
        let nearby = db.get_nearby_amenities(0.0, 0.0, radius).await.unwrap();
        let ids: Vec<i32> = nearby.iter().map(|a| a.amenity.id).collect();
        assert_eq!(ids, vec![origin.id, edge.id]);
        assert_eq!(nearby[1].distance, radius);

        let tighter = db.get_nearby_amenities(0.0, 0.0, radius - 1e-9).await.unwrap();
        assert_eq!(tighter.len(), 1);
    }

    #[tokio::test]
    async fn test_neighborhood_amenities_report_stored_distance() {
        let db = store();
        let neighborhood = db
            .create_neighborhood(CreateNeighborhoodDto {
                name: "Kabulonga".to_string(),
                city: "Lusaka".to_string(),
                description: String::new(),
                safety_rating: 80,
                walkability_score: 70,
                school_rating: 90,
                image_url: String::new(),
                latitude: -15.4,
                longitude: 28.3,
            })
            .await
            .unwrap();
        let amenity = db.create_amenity(amenity_at("Deli", -15.4, 28.3)).await.unwrap();
        db.add_amenity_to_neighborhood(CreateNeighborhoodAmenityDto {
            neighborhood_id: neighborhood.id,
            amenity_id: amenity.id,
            distance: 0.4,
        })
        .await
        .unwrap();

        let linked = db.get_amenities_by_neighborhood(neighborhood.id).await.unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].distance, 0.4);
        assert_eq!(linked[0].amenity, amenity);
    }

    #[tokio::test]
    async fn test_dangling_relations_are_dropped() {
        let db = store();
        db.add_property_to_neighborhood(1, 99).await.unwrap();
        db.add_amenity_to_neighborhood(CreateNeighborhoodAmenityDto {
            neighborhood_id: 1,
            amenity_id: 99,
            distance: 1.0,
        })
        .await
        .unwrap();

        assert!(db.get_neighborhoods_by_property(1).await.unwrap().is_empty());
        assert!(db.get_amenities_by_neighborhood(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_unsave_round_trip() {
        let db = store();
        db.save_property(7, 3).await.unwrap();
        db.save_property(7, 3).await.unwrap();
        db.save_property(7, 4).await.unwrap();
        assert_eq!(db.get_saved_properties_by_user(7).await.unwrap().len(), 3);

        assert!(db.remove_saved_property(7, 3).await.unwrap());
        let remaining = db.get_saved_properties_by_user(7).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].property_id, 4);

        assert!(!db.remove_saved_property(7, 3).await.unwrap());
    }

    #[tokio::test]
    async fn test_neighborhood_city_lookup_is_case_insensitive() {
        let db = store();
        for city in ["Lusaka", "Livingstone"] {
            db.create_neighborhood(CreateNeighborhoodDto {
                name: format!("{} Central", city),
                city: city.to_string(),
                description: String::new(),
                safety_rating: 50,
                walkability_score: 50,
                school_rating: 50,
                image_url: String::new(),
                latitude: 0.0,
                longitude: 0.0,
            })
            .await
            .unwrap();
        }

        let hits = db.get_neighborhoods_by_city("LUSAKA").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "Lusaka");
        assert_eq!(db.get_neighborhoods_by_city("l").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let db = store();
        let mut handles = Vec::new();
        for i in 0..32 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                db.save_property(i, i).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[tokio::test]
    async fn test_user_lookup_and_count() {
        let db = store();
        assert_eq!(db.get_user_count().await.unwrap(), 0);
        let user = db.create_user(landlord()).await.unwrap();

        assert_eq!(db.get_user_by_username("mwila").await.unwrap(), Some(user.clone()));
        assert_eq!(db.get_user_by_email("mwila@example.com").await.unwrap(), Some(user.clone()));
        assert!(db.get_user_by_username("MWILA").await.unwrap().is_none());
        assert_eq!(db.get_user_count().await.unwrap(), 1);

        let updated = db
            .update_user(
                user.id,
                UpdateUserDto {
                    bio: Some("Landlord in Lusaka".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.bio.as_deref(), Some("Landlord in Lusaka"));
        assert_eq!(updated.username, user.username);
    }
}
