use async_trait::async_trait;

use super::{error::StorageError, filters::contains_pattern, DBClient};
use crate::{
    dtos::neighborhooddtos::{CreateNeighborhoodDto, UpdateNeighborhoodDto},
    models::neighborhoodmodels::{Neighborhood, PropertyNeighborhood},
};

#[async_trait]
pub trait NeighborhoodExt: Send + Sync {
    async fn get_all_neighborhoods(&self) -> Result<Vec<Neighborhood>, StorageError>;

    async fn get_neighborhood(&self, neighborhood_id: i32) -> Result<Option<Neighborhood>, StorageError>;

    /// Case-insensitive substring match on the city name.
    async fn get_neighborhoods_by_city(&self, city: &str) -> Result<Vec<Neighborhood>, StorageError>;

    async fn create_neighborhood(
        &self,
        neighborhood: CreateNeighborhoodDto,
    ) -> Result<Neighborhood, StorageError>;

    async fn update_neighborhood(
        &self,
        neighborhood_id: i32,
        changes: UpdateNeighborhoodDto,
    ) -> Result<Option<Neighborhood>, StorageError>;

    /// Neighborhoods linked to the property, in link order. Links whose
    /// neighborhood no longer exists are skipped.
    async fn get_neighborhoods_by_property(&self, property_id: i32) -> Result<Vec<Neighborhood>, StorageError>;

    async fn add_property_to_neighborhood(
        &self,
        property_id: i32,
        neighborhood_id: i32,
    ) -> Result<PropertyNeighborhood, StorageError>;

    async fn remove_property_from_neighborhood(
        &self,
        property_id: i32,
        neighborhood_id: i32,
    ) -> Result<bool, StorageError>;
}

#[async_trait]
impl NeighborhoodExt for DBClient {
    async fn get_all_neighborhoods(&self) -> Result<Vec<Neighborhood>, StorageError> {
        let neighborhoods = sqlx::query_as::<_, Neighborhood>("SELECT * FROM neighborhoods ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(neighborhoods)
    }

    async fn get_neighborhood(&self, neighborhood_id: i32) -> Result<Option<Neighborhood>, StorageError> {
        let neighborhood = sqlx::query_as::<_, Neighborhood>("SELECT * FROM neighborhoods WHERE id = $1")
            .bind(neighborhood_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(neighborhood)
    }

    async fn get_neighborhoods_by_city(&self, city: &str) -> Result<Vec<Neighborhood>, StorageError> {
        let neighborhoods = sqlx::query_as::<_, Neighborhood>(
            "SELECT * FROM neighborhoods WHERE city ILIKE $1 ORDER BY id",
        )
        .bind(contains_pattern(city))
        .fetch_all(&self.pool)
        .await?;

        Ok(neighborhoods)
    }

    async fn create_neighborhood(
        &self,
        neighborhood: CreateNeighborhoodDto,
    ) -> Result<Neighborhood, StorageError> {
        let neighborhood = sqlx::query_as::<_, Neighborhood>(
            r#"
            INSERT INTO neighborhoods (
                name, city, description, safety_rating, walkability_score,
                school_rating, image_url, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(neighborhood.name)
        .bind(neighborhood.city)
        .bind(neighborhood.description)
        .bind(neighborhood.safety_rating)
        .bind(neighborhood.walkability_score)
        .bind(neighborhood.school_rating)
        .bind(neighborhood.image_url)
        .bind(neighborhood.latitude)
        .bind(neighborhood.longitude)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("created neighborhood {} ({})", neighborhood.id, neighborhood.name);
        Ok(neighborhood)
    }

    async fn update_neighborhood(
        &self,
        neighborhood_id: i32,
        changes: UpdateNeighborhoodDto,
    ) -> Result<Option<Neighborhood>, StorageError> {
        let neighborhood = sqlx::query_as::<_, Neighborhood>(
            r#"
            UPDATE neighborhoods
            SET name = COALESCE($2, name),
                city = COALESCE($3, city),
                description = COALESCE($4, description),
                safety_rating = COALESCE($5, safety_rating),
                walkability_score = COALESCE($6, walkability_score),
                school_rating = COALESCE($7, school_rating),
                image_url = COALESCE($8, image_url),
                latitude = COALESCE($9, latitude),
                longitude = COALESCE($10, longitude)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(neighborhood_id)
        .bind(changes.name)
        .bind(changes.city)
        .bind(changes.description)
        .bind(changes.safety_rating)
        .bind(changes.walkability_score)
        .bind(changes.school_rating)
        .bind(changes.image_url)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .fetch_optional(&self.pool)
        .await?;

        Ok(neighborhood)
    }

    async fn get_neighborhoods_by_property(&self, property_id: i32) -> Result<Vec<Neighborhood>, StorageError> {
        let neighborhoods = sqlx::query_as::<_, Neighborhood>(
            r#"
            SELECT n.* FROM property_neighborhoods pn
            JOIN neighborhoods n ON n.id = pn.neighborhood_id
            WHERE pn.property_id = $1
            ORDER BY pn.id
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(neighborhoods)
    }

    async fn add_property_to_neighborhood(
        &self,
        property_id: i32,
        neighborhood_id: i32,
    ) -> Result<PropertyNeighborhood, StorageError> {
        let link = sqlx::query_as::<_, PropertyNeighborhood>(
            r#"
            INSERT INTO property_neighborhoods (property_id, neighborhood_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(neighborhood_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(link)
    }

    async fn remove_property_from_neighborhood(
        &self,
        property_id: i32,
        neighborhood_id: i32,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "DELETE FROM property_neighborhoods WHERE property_id = $1 AND neighborhood_id = $2",
        )
        .bind(property_id)
        .bind(neighborhood_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
