pub mod numeric;
pub mod password;
