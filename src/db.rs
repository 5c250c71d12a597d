// db.rs
pub mod amenitydb;
pub mod directorydb;
pub mod error;
pub mod filters;
pub mod geo;
pub mod memory;
pub mod messagedb;
pub mod neighborhooddb;
pub mod propertydb;
pub mod savedpropertydb;
pub mod seed;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

pub use amenitydb::AmenityExt;
pub use directorydb::DirectoryExt;
pub use error::StorageError;
pub use memory::MemStorage;
pub use messagedb::MessageExt;
pub use neighborhooddb::NeighborhoodExt;
pub use propertydb::PropertyExt;
pub use savedpropertydb::SavedPropertyExt;

use crate::{
    dtos::userdtos::{CreateUserDto, UpdateUserDto},
    models::usermodel::User,
};

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct DBClient {
    pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}

/// The full storage contract. Handlers only ever see `Arc<dyn Storage>`,
/// so the backend is chosen once at startup.
pub trait Storage:
    UserExt
    + PropertyExt
    + DirectoryExt
    + MessageExt
    + SavedPropertyExt
    + NeighborhoodExt
    + AmenityExt
    + Send
    + Sync
{
}

impl<T> Storage for T where
    T: UserExt
        + PropertyExt
        + DirectoryExt
        + MessageExt
        + SavedPropertyExt
        + NeighborhoodExt
        + AmenityExt
        + Send
        + Sync
{
}

#[async_trait]
pub trait UserExt: Send + Sync {
    async fn get_user(&self, user_id: i32) -> Result<Option<User>, StorageError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Stores the user as given. Username and email uniqueness is the
    /// caller's concern.
    async fn create_user(&self, user: CreateUserDto) -> Result<User, StorageError>;

    async fn update_user(
        &self,
        user_id: i32,
        changes: UpdateUserDto,
    ) -> Result<Option<User>, StorageError>;

    async fn get_user_count(&self) -> Result<i64, StorageError>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(&self, user_id: i32) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_user(&self, user: CreateUserDto) -> Result<User, StorageError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                username, password, email, full_name, user_type,
                phone_number, bio, profile_image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(user.username)
        .bind(user.password)
        .bind(user.email)
        .bind(user.full_name)
        .bind(user.user_type)
        .bind(user.phone_number)
        .bind(user.bio)
        .bind(user.profile_image)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("created user {} ({})", user.id, user.username);
        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: i32,
        changes: UpdateUserDto,
    ) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                password = COALESCE($4, password),
                full_name = COALESCE($5, full_name),
                user_type = COALESCE($6, user_type),
                phone_number = COALESCE($7, phone_number),
                bio = COALESCE($8, bio),
                profile_image = COALESCE($9, profile_image)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(changes.username)
        .bind(changes.email)
        .bind(changes.password)
        .bind(changes.full_name)
        .bind(changes.user_type)
        .bind(changes.phone_number)
        .bind(changes.bio)
        .bind(changes.profile_image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
