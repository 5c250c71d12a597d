pub mod directorymodels;
pub mod messagemodels;
pub mod neighborhoodmodels;
pub mod propertymodel;
pub mod usermodel;
