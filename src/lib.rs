pub mod collections;
pub mod config;
pub mod content;
pub mod logger;
pub mod reading_time;
pub mod registry;
pub mod schema;
pub mod text_utils;
mod test_data;

pub use collections::{collections, BlogPost, BlogRevision, Portfolio, COLLECTIONS};
pub use reading_time::{estimate_reading_time, get_reading_time, ReadingTime};
pub use registry::{CollectionRegistry, RegistryError};
