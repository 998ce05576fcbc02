use std::collections::BTreeMap;

use serde_json::{Map, Value};
use spdlog::debug;
use thiserror::Error;

use crate::schema::{Record, Schema, ValidationError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("collection {0} is already registered")]
    DuplicateCollection(String),
    #[error("unknown collection {0}")]
    UnknownCollection(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Collection name to schema mapping consulted by the content loader.
/// Populated once, then only read.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, schema: Schema) -> Result<(), RegistryError> {
        if self.schemas.contains_key(name) {
            return Err(RegistryError::DuplicateCollection(name.to_string()));
        }
        debug!("Registering collection {} with {} fields", name, schema.fields().len());
        self.schemas.insert(name.to_string(), schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn validate(&self, record: &Map<String, Value>, schema_name: &str) -> Result<Record, RegistryError> {
        let Some(schema) = self.schemas.get(schema_name) else {
            return Err(RegistryError::UnknownCollection(schema_name.to_string()));
        };
        Ok(schema.validate(schema_name, record)?)
    }
}
