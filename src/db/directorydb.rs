use async_trait::async_trait;

use super::{error::StorageError, DBClient};
use crate::{
    dtos::directorydtos::{CreateAgentDto, CreateTestimonialDto, CreateWaitlistEntryDto},
    models::directorymodels::{Agent, Testimonial, WaitlistEntry},
};

/// Agents, testimonials and the waitlist: the site's static-ish directory
/// content.
#[async_trait]
pub trait DirectoryExt: Send + Sync {
    async fn get_all_agents(&self) -> Result<Vec<Agent>, StorageError>;

    async fn get_agent(&self, agent_id: i32) -> Result<Option<Agent>, StorageError>;

    async fn create_agent(&self, agent: CreateAgentDto) -> Result<Agent, StorageError>;

    async fn get_all_testimonials(&self) -> Result<Vec<Testimonial>, StorageError>;

    async fn get_testimonial(&self, testimonial_id: i32) -> Result<Option<Testimonial>, StorageError>;

    async fn create_testimonial(
        &self,
        testimonial: CreateTestimonialDto,
    ) -> Result<Testimonial, StorageError>;

    async fn get_all_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>, StorageError>;

    async fn get_waitlist_entry(&self, entry_id: i32) -> Result<Option<WaitlistEntry>, StorageError>;

    async fn create_waitlist_entry(
        &self,
        entry: CreateWaitlistEntryDto,
    ) -> Result<WaitlistEntry, StorageError>;
}

#[async_trait]
impl DirectoryExt for DBClient {
    async fn get_all_agents(&self) -> Result<Vec<Agent>, StorageError> {
        let agents = sqlx::query_as::<_, Agent>("SELECT * FROM agents ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(agents)
    }

    async fn get_agent(&self, agent_id: i32) -> Result<Option<Agent>, StorageError> {
        let agent = sqlx::query_as::<_, Agent>("SELECT * FROM agents WHERE id = $1")
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(agent)
    }

    async fn create_agent(&self, agent: CreateAgentDto) -> Result<Agent, StorageError> {
        let agent = sqlx::query_as::<_, Agent>(
            r#"
            INSERT INTO agents (name, title, bio, image_url, instagram, linkedin, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(agent.name)
        .bind(agent.title)
        .bind(agent.bio)
        .bind(agent.image_url)
        .bind(agent.instagram)
        .bind(agent.linkedin)
        .bind(agent.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(agent)
    }

    async fn get_all_testimonials(&self) -> Result<Vec<Testimonial>, StorageError> {
        let testimonials = sqlx::query_as::<_, Testimonial>("SELECT * FROM testimonials ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(testimonials)
    }

    async fn get_testimonial(&self, testimonial_id: i32) -> Result<Option<Testimonial>, StorageError> {
        let testimonial = sqlx::query_as::<_, Testimonial>("SELECT * FROM testimonials WHERE id = $1")
            .bind(testimonial_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(testimonial)
    }

    async fn create_testimonial(
        &self,
        testimonial: CreateTestimonialDto,
    ) -> Result<Testimonial, StorageError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (quote, name, location, rating, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(testimonial.quote)
        .bind(testimonial.name)
        .bind(testimonial.location)
        .bind(testimonial.rating)
        .bind(testimonial.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(testimonial)
    }

    async fn get_all_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>, StorageError> {
        let entries = sqlx::query_as::<_, WaitlistEntry>("SELECT * FROM waitlist_entries ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    async fn get_waitlist_entry(&self, entry_id: i32) -> Result<Option<WaitlistEntry>, StorageError> {
        let entry = sqlx::query_as::<_, WaitlistEntry>("SELECT * FROM waitlist_entries WHERE id = $1")
            .bind(entry_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    async fn create_waitlist_entry(
        &self,
        entry: CreateWaitlistEntryDto,
    ) -> Result<WaitlistEntry, StorageError> {
        let entry = sqlx::query_as::<_, WaitlistEntry>(
            r#"
            INSERT INTO waitlist_entries (full_name, email, property_interest, agreed_to_terms)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(entry.full_name)
        .bind(entry.email)
        .bind(entry.property_interest)
        .bind(entry.agreed_to_terms)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("waitlist entry {} created", entry.id);
        Ok(entry)
    }
}
