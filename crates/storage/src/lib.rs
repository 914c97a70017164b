pub mod error;
pub mod models;
pub mod repository;
pub mod schema;

pub use error::{Result, StorageError};
