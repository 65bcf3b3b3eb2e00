pub mod file_validation;
pub mod models;
pub mod multipart;
