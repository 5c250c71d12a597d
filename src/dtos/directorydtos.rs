use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub bio: String,
    pub image_url: String,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialDto {
    #[validate(length(min = 1, message = "Quote is required"))]
    pub quote: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub location: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWaitlistEntryDto {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Property interest is required"))]
    pub property_interest: String,

    #[validate(custom = "validate_agreed_to_terms")]
    pub agreed_to_terms: bool,
}

fn validate_agreed_to_terms(agreed: &bool) -> Result<(), ValidationError> {
    if *agreed {
        Ok(())
    } else {
        let mut error = ValidationError::new("terms_not_accepted");
        error.message = Some("You must agree to the terms and conditions".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waitlist_requires_terms() {
        let mut entry = CreateWaitlistEntryDto {
            full_name: "Mutale Kapaso".to_string(),
            email: "mutale@example.com".to_string(),
            property_interest: "Villa".to_string(),
            agreed_to_terms: false,
        };
        assert!(entry.validate().is_err());

        entry.agreed_to_terms = true;
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_testimonial_rating_bounds() {
        let mut testimonial = CreateTestimonialDto {
            quote: "Great service".to_string(),
            name: "James Phiri".to_string(),
            location: "London, UK".to_string(),
            rating: 6,
            image_url: String::new(),
        };
        assert!(testimonial.validate().is_err());

        testimonial.rating = 5;
        assert!(testimonial.validate().is_ok());
    }
}
