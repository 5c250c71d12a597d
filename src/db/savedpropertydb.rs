use async_trait::async_trait;

use super::{error::StorageError, DBClient};
use crate::models::propertymodel::SavedProperty;

#[async_trait]
pub trait SavedPropertyExt: Send + Sync {
    async fn get_saved_properties_by_user(&self, user_id: i32) -> Result<Vec<SavedProperty>, StorageError>;

    /// Duplicate saves of the same pair are allowed.
    async fn save_property(&self, user_id: i32, property_id: i32) -> Result<SavedProperty, StorageError>;

    /// Removes every save of the pair; `true` when at least one existed.
    async fn remove_saved_property(&self, user_id: i32, property_id: i32) -> Result<bool, StorageError>;
}

#[async_trait]
impl SavedPropertyExt for DBClient {
    async fn get_saved_properties_by_user(&self, user_id: i32) -> Result<Vec<SavedProperty>, StorageError> {
        let saved = sqlx::query_as::<_, SavedProperty>(
            "SELECT * FROM saved_properties WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn save_property(&self, user_id: i32, property_id: i32) -> Result<SavedProperty, StorageError> {
        let saved = sqlx::query_as::<_, SavedProperty>(
            r#"
            INSERT INTO saved_properties (user_id, property_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn remove_saved_property(&self, user_id: i32, property_id: i32) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM saved_properties WHERE user_id = $1 AND property_id = $2")
            .bind(user_id)
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
