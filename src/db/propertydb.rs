use async_trait::async_trait;

use super::{error::StorageError, filters::PropertySearchFilters, DBClient};
use crate::{
    dtos::propertydtos::{CreatePropertyDto, UpdatePropertyDto},
    models::propertymodel::{Property, PropertyStatus},
};

#[async_trait]
pub trait PropertyExt: Send + Sync {
    async fn get_all_properties(&self) -> Result<Vec<Property>, StorageError>;

    async fn get_property(&self, property_id: i32) -> Result<Option<Property>, StorageError>;

    async fn get_properties_by_owner(&self, owner_id: i32) -> Result<Vec<Property>, StorageError>;

    /// Featured listings that are still active.
    async fn get_featured_properties(&self) -> Result<Vec<Property>, StorageError>;

    async fn get_properties_by_filters(
        &self,
        filters: PropertySearchFilters,
    ) -> Result<Vec<Property>, StorageError>;

    async fn create_property(&self, property: CreatePropertyDto) -> Result<Property, StorageError>;

    /// Merges the present fields. `updated_at` always moves forward.
    async fn update_property(
        &self,
        property_id: i32,
        changes: UpdatePropertyDto,
    ) -> Result<Option<Property>, StorageError>;

    async fn update_property_status(
        &self,
        property_id: i32,
        status: PropertyStatus,
    ) -> Result<Option<Property>, StorageError>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn get_all_properties(&self) -> Result<Vec<Property>, StorageError> {
        let properties = sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(properties)
    }

    async fn get_property(&self, property_id: i32) -> Result<Option<Property>, StorageError> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    async fn get_properties_by_owner(&self, owner_id: i32) -> Result<Vec<Property>, StorageError> {
        let properties = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn get_featured_properties(&self) -> Result<Vec<Property>, StorageError> {
        let properties = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE is_featured = TRUE AND status = $1 ORDER BY id",
        )
        .bind(PropertyStatus::Active)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn get_properties_by_filters(
        &self,
        filters: PropertySearchFilters,
    ) -> Result<Vec<Property>, StorageError> {
        if filters.is_empty() {
            return self.get_all_properties().await;
        }

        let location_pattern = filters.location_pattern();

        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT * FROM properties
            WHERE ($1::text IS NULL OR location ILIKE $1 OR city ILIKE $1 OR state ILIKE $1)
            AND ($2::text IS NULL OR property_type = $2)
            AND ($3::listing_type IS NULL OR listing_type = $3)
            AND ($4::property_status IS NULL OR status = $4)
            AND ($5::int IS NULL OR owner_id = $5)
            AND ($6::int IS NULL OR price >= $6)
            AND ($7::int IS NULL OR price <= $7)
            ORDER BY id
            "#,
        )
        .bind(location_pattern)
        .bind(filters.property_type)
        .bind(filters.listing_type)
        .bind(filters.status)
        .bind(filters.owner_id)
        .bind(filters.min_price)
        .bind(filters.max_price)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn create_property(&self, property: CreatePropertyDto) -> Result<Property, StorageError> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, price, property_type, listing_type, status,
                location, city, state, latitude, longitude,
                bedrooms, bathrooms, square_feet,
                is_featured, is_new, image_url, additional_images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(property.title)
        .bind(property.description)
        .bind(property.price)
        .bind(property.property_type)
        .bind(property.listing_type)
        .bind(property.status.unwrap_or_default())
        .bind(property.location)
        .bind(property.city)
        .bind(property.state)
        .bind(property.latitude)
        .bind(property.longitude)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.square_feet)
        .bind(property.is_featured.unwrap_or(false))
        .bind(property.is_new.unwrap_or(false))
        .bind(property.image_url)
        .bind(property.additional_images.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("created property {} for owner {}", property.id, property.owner_id);
        Ok(property)
    }

    async fn update_property(
        &self,
        property_id: i32,
        changes: UpdatePropertyDto,
    ) -> Result<Option<Property>, StorageError> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                location = COALESCE($5, location),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                latitude = COALESCE($8, latitude),
                longitude = COALESCE($9, longitude),
                bedrooms = COALESCE($10, bedrooms),
                bathrooms = COALESCE($11, bathrooms),
                square_feet = COALESCE($12, square_feet),
                property_type = COALESCE($13, property_type),
                listing_type = COALESCE($14, listing_type),
                status = COALESCE($15, status),
                is_featured = COALESCE($16, is_featured),
                is_new = COALESCE($17, is_new),
                image_url = COALESCE($18, image_url),
                additional_images = COALESCE($19, additional_images),
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.price)
        .bind(changes.location)
        .bind(changes.city)
        .bind(changes.state)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .bind(changes.bedrooms)
        .bind(changes.bathrooms)
        .bind(changes.square_feet)
        .bind(changes.property_type)
        .bind(changes.listing_type)
        .bind(changes.status)
        .bind(changes.is_featured)
        .bind(changes.is_new)
        .bind(changes.image_url)
        .bind(changes.additional_images)
        .fetch_optional(&self.pool)
        .await?;

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
        let property = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET status = $2,
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        if property.is_some() {
            tracing::debug!("property {} is now {}", property_id, status);
        }
        Ok(property)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::{
        db::UserExt,
        dtos::userdtos::CreateUserDto,
        models::{propertymodel::ListingType, usermodel::UserType},
    };

    // Needs a database with sql/schema.sql applied.
    async fn test_client() -> DBClient {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("connect to test database");
        DBClient::new(pool)
    }

    fn listing(owner_id: i32, city: &str, price: i32) -> CreatePropertyDto {
        CreatePropertyDto {
            owner_id,
            title: "Riverside Plot".to_string(),
            description: "Serviced plot near the Kafue".to_string(),
            price,
            location: "Plot 12, Riverside".to_string(),
            city: city.to_string(),
            state: "Southern Province".to_string(),
            latitude: None,
            longitude: None,
            bedrooms: 0,
            bathrooms: 0,
            square_feet: 4000,
            property_type: "Land".to_string(),
            listing_type: ListingType::Sell,
            status: None,
            is_featured: None,
            is_new: None,
            image_url: "https://images.example.com/plot.jpg".to_string(),
            additional_images: None,
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_postgres_property_lifecycle() {
        let client = test_client().await;
        let tag = Utc::now().timestamp_micros();

        let owner = client
            .create_user(CreateUserDto {
                username: format!("pg_owner_{}", tag),
                password: "not-a-real-hash".to_string(),
                email: format!("pg_owner_{}@example.com", tag),
                full_name: "Postgres Owner".to_string(),
                user_type: UserType::LandlordAndSell,
                phone_number: None,
                bio: None,
                profile_image: None,
            })
            .await
            .unwrap();

        let city = format!("Kafue{}", tag);
        let created = client
            .create_property(listing(owner.id, &city, 150_000))
            .await
            .unwrap();
        assert_eq!(created.status, PropertyStatus::Active);
        assert!(!created.is_featured);
        assert!(created.additional_images.is_empty());

        let updated = client
            .update_property(
                created.id,
                UpdatePropertyDto {
                    price: Some(175_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 175_000);
        assert_eq!(updated.title, created.title);
        assert!(updated.updated_at > created.updated_at);

        let hits = client
            .get_properties_by_filters(PropertySearchFilters {
                location: Some(city.to_lowercase()),
                max_price: Some(175_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, created.id);

        let everything = client
            .get_properties_by_filters(PropertySearchFilters::default())
            .await
            .unwrap();
        assert_eq!(everything, client.get_all_properties().await.unwrap());

        let sold = client
            .update_property_status(created.id, PropertyStatus::Sold)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sold.status, PropertyStatus::Sold);
        assert!(client.update_property_status(i32::MAX, PropertyStatus::Sold).await.unwrap().is_none());
    }
}
