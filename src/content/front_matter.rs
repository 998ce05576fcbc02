use serde_json::{Map, Number, Value};

use crate::content::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    /// Delimited by `---`
    Yaml,
    /// Delimited by `+++`
    Toml,
}

impl FrontMatterFormat {
    fn from_delimiter(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(FrontMatterFormat::Yaml),
            "+++" => Some(FrontMatterFormat::Toml),
            _ => None,
        }
    }

    fn delimiter(&self) -> &'static str {
        match self {
            FrontMatterFormat::Yaml => "---",
            FrontMatterFormat::Toml => "+++",
        }
    }
}

pub struct FrontMatter<'a> {
    pub format: FrontMatterFormat,
    pub block: &'a str,
    pub body: &'a str,
}

/// Splits the leading front matter block from the body.
/// Blank lines before the opening delimiter are allowed.
pub fn split_front_matter(raw: &str) -> Result<FrontMatter<'_>, LoadError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut offset = 0;
    let mut lines = raw.split_inclusive('\n');

    let format = loop {
        let Some(line) = lines.next() else {
            return Err(LoadError::MissingFrontMatter);
        };
        offset += line.len();

        // Empty lines are ok
        if line.trim().is_empty() {
            continue;
        }

        match FrontMatterFormat::from_delimiter(line) {
            Some(format) => break format,
            None => return Err(LoadError::MissingFrontMatter),
        }
    };

    let block_start = offset;
    for line in lines {
        if line.trim_end() == format.delimiter() {
            return Ok(FrontMatter {
                format,
                block: &raw[block_start..offset],
                body: &raw[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    Err(LoadError::UnterminatedFrontMatter)
}

pub fn parse_front_matter(format: FrontMatterFormat, block: &str) -> Result<Map<String, Value>, LoadError> {
    let value = match format {
        FrontMatterFormat::Yaml => {
            // An empty YAML document is null
            if block.trim().is_empty() {
                Value::Object(Map::new())
            } else {
                serde_yaml::from_str::<Value>(block).map_err(|e| LoadError::FrontMatter(e.to_string()))?
            }
        }
        FrontMatterFormat::Toml => {
            let table = toml::from_str::<toml::Table>(block).map_err(|e| LoadError::FrontMatter(e.to_string()))?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAMapping),
    }
}

/// Date times become strings so they go through the regular date coercion
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect()
        ),
    }
}
