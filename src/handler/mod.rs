pub mod amenities;
pub mod directory;
pub mod messages;
pub mod neighborhoods;
pub mod properties;
pub mod saved_properties;
pub mod users;
