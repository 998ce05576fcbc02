use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::registry::CollectionRegistry;
use crate::schema::{FieldError, FieldErrorKind, FieldKind, FieldValue, Record, Schema, ValidationError};

pub const BLOG: &str = "blog";
pub const PORTFOLIOS: &str = "portfolios";

/// The blog schema exists in two shapes, only differing by `show`.
/// Which one is the target is left to the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogRevision {
    /// title, description, publishDate, heroImage, tags and `show` defaulting to true
    #[default]
    WithShow,
    /// Same fields without `show`
    WithoutShow,
}

pub fn blog_schema(revision: BlogRevision) -> Schema {
    let schema = Schema::new()
        .required("title", FieldKind::String)
        .required("description", FieldKind::String)
        .required("publishDate", FieldKind::CoercedDate)
        .optional("heroImage", FieldKind::String)
        .optional("tags", FieldKind::StringList);

    match revision {
        BlogRevision::WithShow => schema.with_default("show", FieldKind::Boolean, FieldValue::Boolean(true)),
        BlogRevision::WithoutShow => schema,
    }
}

pub fn portfolio_schema() -> Schema {
    Schema::new()
        .required("title", FieldKind::String)
        .required("description", FieldKind::String)
        .required("publishDate", FieldKind::CoercedDate)
}

/// Registry holding `blog` and `portfolios`
pub fn collections(revision: BlogRevision) -> CollectionRegistry {
    let mut registry = CollectionRegistry::new();
    registry.register(BLOG, blog_schema(revision)).expect("blog registered once");
    registry.register(PORTFOLIOS, portfolio_schema()).expect("portfolios registered once");
    registry
}

lazy_static! {
    /// Process-wide registry with the default blog revision
    pub static ref COLLECTIONS: CollectionRegistry = collections(BlogRevision::default());
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub description: String,
    pub publish_date: NaiveDateTime,
    pub hero_image: Option<String>,
    pub tags: Vec<String>,
    /// None when the revision has no `show` field
    pub show: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub title: String,
    pub description: String,
    pub publish_date: NaiveDateTime,
}

struct RequiredFields<'a> {
    collection: &'static str,
    record: &'a Record,
    errors: Vec<FieldError>,
}

impl<'a> RequiredFields<'a> {
    fn new(collection: &'static str, record: &'a Record) -> Self {
        RequiredFields { collection, record, errors: vec![] }
    }

    fn missing(&mut self, name: &str) {
        self.errors.push(FieldError { field: name.to_string(), kind: FieldErrorKind::Missing });
    }

    fn string(&mut self, name: &str) -> String {
        match self.record.get_str(name) {
            Some(s) => s.to_string(),
            None => {
                self.missing(name);
                String::new()
            }
        }
    }

    fn date(&mut self, name: &str) -> NaiveDateTime {
        match self.record.get_date(name) {
            Some(d) => d,
            None => {
                self.missing(name);
                NaiveDateTime::default()
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { collection: self.collection.to_string(), errors: self.errors })
        }
    }
}

impl TryFrom<&Record> for BlogPost {
    type Error = ValidationError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let mut fields = RequiredFields::new(BLOG, record);
        let post = BlogPost {
            title: fields.string("title"),
            description: fields.string("description"),
            publish_date: fields.date("publishDate"),
            hero_image: record.get_str("heroImage").map(|s| s.to_string()),
            tags: record.get_list("tags").map(|t| t.to_vec()).unwrap_or_default(),
            show: record.get_bool("show"),
        };
        fields.finish(post)
    }
}

impl TryFrom<&Record> for Portfolio {
    type Error = ValidationError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let mut fields = RequiredFields::new(PORTFOLIOS, record);
        let portfolio = Portfolio {
            title: fields.string("title"),
            description: fields.string("description"),
            publish_date: fields.date("publishDate"),
        };
        fields.finish(portfolio)
    }
}
