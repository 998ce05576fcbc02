use std::fmt;
use std::fmt::{Display, Formatter};

pub mod field_value;
pub mod validation;

pub use field_value::{FieldValue, Record};
pub use validation::{FieldError, FieldErrorKind, ValidationError};

/// Type and coercion rule of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    StringList,
    /// Date-like input (string or epoch milliseconds) normalized to a date time
    CoercedDate,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::StringList => "array of string",
            FieldKind::CoercedDate => "date",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    /// Optional, the value is used when the field is absent
    Default(FieldValue),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl Display for FieldDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.presence {
            Presence::Required => write!(f, "{}: {}", self.name, self.kind),
            Presence::Optional => write!(f, "{}: {} (optional)", self.name, self.kind),
            Presence::Default(ref value) => write!(f, "{}: {} (default {})", self.name, self.kind, value),
        }
    }
}

/// Declarative shape of a collection record.
///
/// ```
/// use folio::schema::{FieldKind, FieldValue, Schema};
///
/// let schema = Schema::new()
///     .required("title", FieldKind::String)
///     .optional("heroImage", FieldKind::String)
///     .with_default("show", FieldKind::Boolean, FieldValue::Boolean(true));
/// assert_eq!(schema.fields().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, name: &str, kind: FieldKind) -> Self {
        self.field(name, kind, Presence::Required)
    }

    pub fn optional(self, name: &str, kind: FieldKind) -> Self {
        self.field(name, kind, Presence::Optional)
    }

    pub fn with_default(self, name: &str, kind: FieldKind, default: FieldValue) -> Self {
        self.field(name, kind, Presence::Default(default))
    }

    /// Adds a field, replacing a previous declaration with the same name
    pub fn field(mut self, name: &str, kind: FieldKind, presence: Presence) -> Self {
        let descriptor = FieldDescriptor {
            name: name.to_string(),
            kind,
            presence,
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = descriptor,
            None => self.fields.push(descriptor),
        }
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}
