pub mod image;
pub mod repository;
pub mod types;
