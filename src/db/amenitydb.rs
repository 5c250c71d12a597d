use async_trait::async_trait;

use super::{error::StorageError, geo, DBClient};
use crate::{
    dtos::neighborhooddtos::{CreateAmenityCategoryDto, CreateAmenityDto, CreateNeighborhoodAmenityDto, UpdateAmenityDto},
    models::neighborhoodmodels::{Amenity, AmenityCategory, AmenityWithDistance, NeighborhoodAmenity},
};

#[async_trait]
pub trait AmenityExt: Send + Sync {
    async fn get_all_amenity_categories(&self) -> Result<Vec<AmenityCategory>, StorageError>;

    async fn get_amenity_category(&self, category_id: i32) -> Result<Option<AmenityCategory>, StorageError>;

    async fn create_amenity_category(
        &self,
        category: CreateAmenityCategoryDto,
    ) -> Result<AmenityCategory, StorageError>;

    async fn get_all_amenities(&self) -> Result<Vec<Amenity>, StorageError>;

    async fn get_amenity(&self, amenity_id: i32) -> Result<Option<Amenity>, StorageError>;

    async fn get_amenities_by_category(&self, category_id: i32) -> Result<Vec<Amenity>, StorageError>;

    async fn create_amenity(&self, amenity: CreateAmenityDto) -> Result<Amenity, StorageError>;

    async fn update_amenity(
        &self,
        amenity_id: i32,
        changes: UpdateAmenityDto,
    ) -> Result<Option<Amenity>, StorageError>;

    /// Amenities linked to the neighborhood, carrying the distance stored on
    /// the link rather than a computed one.
    async fn get_amenities_by_neighborhood(
        &self,
        neighborhood_id: i32,
    ) -> Result<Vec<AmenityWithDistance>, StorageError>;

    /// Amenities within `radius_km` of the point, boundary included, with
    /// the great-circle distance from the point.
    async fn get_nearby_amenities(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<AmenityWithDistance>, StorageError>;

    async fn add_amenity_to_neighborhood(
        &self,
        link: CreateNeighborhoodAmenityDto,
    ) -> Result<NeighborhoodAmenity, StorageError>;

    async fn remove_amenity_from_neighborhood(
        &self,
        neighborhood_id: i32,
        amenity_id: i32,
    ) -> Result<bool, StorageError>;
}

/// Radius filter shared by every backend so they agree on distances.
/// Amenities without finite coordinates are never "nearby".
pub(crate) fn within_radius<I>(amenities: I, latitude: f64, longitude: f64, radius_km: f64) -> Vec<AmenityWithDistance>
where
    I: IntoIterator<Item = Amenity>,
{
    amenities
        .into_iter()
        .filter(Amenity::has_coordinates)
        .filter_map(|amenity| {
            let distance = geo::distance_km(latitude, longitude, amenity.latitude, amenity.longitude);
            (distance <= radius_km).then_some(AmenityWithDistance { amenity, distance })
        })
        .collect()
}

#[async_trait]
impl AmenityExt for DBClient {
    async fn get_all_amenity_categories(&self) -> Result<Vec<AmenityCategory>, StorageError> {
        let categories = sqlx::query_as::<_, AmenityCategory>("SELECT * FROM amenity_categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    async fn get_amenity_category(&self, category_id: i32) -> Result<Option<AmenityCategory>, StorageError> {
        let category = sqlx::query_as::<_, AmenityCategory>("SELECT * FROM amenity_categories WHERE id = $1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    async fn create_amenity_category(
        &self,
        category: CreateAmenityCategoryDto,
    ) -> Result<AmenityCategory, StorageError> {
        let category = sqlx::query_as::<_, AmenityCategory>(
            "INSERT INTO amenity_categories (name, icon) VALUES ($1, $2) RETURNING *",
        )
        .bind(category.name)
        .bind(category.icon)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn get_all_amenities(&self) -> Result<Vec<Amenity>, StorageError> {
        let amenities = sqlx::query_as::<_, Amenity>("SELECT * FROM amenities ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(amenities)
    }

    async fn get_amenity(&self, amenity_id: i32) -> Result<Option<Amenity>, StorageError> {
        let amenity = sqlx::query_as::<_, Amenity>("SELECT * FROM amenities WHERE id = $1")
            .bind(amenity_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(amenity)
    }

    async fn get_amenities_by_category(&self, category_id: i32) -> Result<Vec<Amenity>, StorageError> {
        let amenities = sqlx::query_as::<_, Amenity>(
            "SELECT * FROM amenities WHERE category_id = $1 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(amenities)
    }

    async fn create_amenity(&self, amenity: CreateAmenityDto) -> Result<Amenity, StorageError> {
        let amenity = sqlx::query_as::<_, Amenity>(
            r#"
            INSERT INTO amenities (
                name, category_id, address, description, image_url,
                website, phone_number, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(amenity.name)
        .bind(amenity.category_id)
        .bind(amenity.address)
        .bind(amenity.description)
        .bind(amenity.image_url)
        .bind(amenity.website)
        .bind(amenity.phone_number)
        .bind(amenity.latitude)
        .bind(amenity.longitude)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("created amenity {} ({})", amenity.id, amenity.name);
        Ok(amenity)
    }

    async fn update_amenity(
        &self,
        amenity_id: i32,
        changes: UpdateAmenityDto,
    ) -> Result<Option<Amenity>, StorageError> {
        let amenity = sqlx::query_as::<_, Amenity>(
            r#"
            UPDATE amenities
            SET name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                address = COALESCE($4, address),
                description = COALESCE($5, description),
                image_url = COALESCE($6, image_url),
                website = COALESCE($7, website),
                phone_number = COALESCE($8, phone_number),
                latitude = COALESCE($9, latitude),
                longitude = COALESCE($10, longitude)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(amenity_id)
        .bind(changes.name)
        .bind(changes.category_id)
        .bind(changes.address)
        .bind(changes.description)
        .bind(changes.image_url)
        .bind(changes.website)
        .bind(changes.phone_number)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .fetch_optional(&self.pool)
        .await?;

        Ok(amenity)
    }

    async fn get_amenities_by_neighborhood(
        &self,
        neighborhood_id: i32,
    ) -> Result<Vec<AmenityWithDistance>, StorageError> {
        let amenities = sqlx::query_as::<_, AmenityWithDistance>(
            r#"
            SELECT a.*, na.distance FROM neighborhood_amenities na
            JOIN amenities a ON a.id = na.amenity_id
            WHERE na.neighborhood_id = $1
            ORDER BY na.id
            "#,
        )
        .bind(neighborhood_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(amenities)
    }

    async fn get_nearby_amenities(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<AmenityWithDistance>, StorageError> {
        let amenities = self.get_all_amenities().await?;
        Ok(within_radius(amenities, latitude, longitude, radius_km))
    }

    async fn add_amenity_to_neighborhood(
        &self,
        link: CreateNeighborhoodAmenityDto,
    ) -> Result<NeighborhoodAmenity, StorageError> {
        let link = sqlx::query_as::<_, NeighborhoodAmenity>(
            r#"
            INSERT INTO neighborhood_amenities (neighborhood_id, amenity_id, distance)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(link.neighborhood_id)
        .bind(link.amenity_id)
        .bind(link.distance)
        .fetch_one(&self.pool)
        .await?;

        Ok(link)
    }

    async fn remove_amenity_from_neighborhood(
        &self,
        neighborhood_id: i32,
        amenity_id: i32,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "DELETE FROM neighborhood_amenities WHERE neighborhood_id = $1 AND amenity_id = $2",
        )
        .bind(neighborhood_id)
        .bind(amenity_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
