pub mod directorydtos;
pub mod messagedtos;
pub mod neighborhooddtos;
pub mod propertydtos;
pub mod userdtos;
