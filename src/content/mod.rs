use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::reading_time::ReadingTimeError;
use crate::registry::RegistryError;
use crate::schema::Record;

pub mod collection_list;
pub mod content_file;
pub mod front_matter;
pub mod loader;
pub mod parsing_utils;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("front matter is missing")]
    MissingFrontMatter,
    #[error("end of the front matter is missing")]
    UnterminatedFrontMatter,
    #[error("invalid front matter: {0}")]
    FrontMatter(String),
    #[error("front matter is not a mapping")]
    NotAMapping,
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    ReadingTime(#[from] ReadingTimeError),
}

/// One validated content item
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub collection: String,
    pub slug: String,
    pub file_path: PathBuf,
    pub record: Record,
    #[serde(skip)]
    pub body: String,
    pub reading_time: u32,
}

impl Entry {
    /// Hidden only when `show` is explicitly false
    pub fn is_visible(&self) -> bool {
        self.record.get_bool("show").unwrap_or(true)
    }
}

#[derive(Debug, Default)]
pub struct CollectionReport {
    pub collection: String,
    pub entries: Vec<Entry>,
    pub failures: Vec<(PathBuf, LoadError)>,
}

impl CollectionReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}
