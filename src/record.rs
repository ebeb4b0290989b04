//! Typed view over an esummary record.
//!
//! The upstream JSON is not schema-checked, so every field is read leniently:
//! a missing key or a value of the wrong type becomes an empty/absent field
//! instead of an error.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One author entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: Option<String>,
    pub affiliation: Option<String>,
}

impl Author {
    /// Read an author entry. Objects provide `name` and `affiliation`;
    /// a bare string is taken as the name. Anything else is dropped.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(obj) => Some(Self {
                name: string_field(obj, "name"),
                affiliation: string_field(obj, "affiliation"),
            }),
            Value::String(name) => Some(Self {
                name: Some(name.clone()),
                affiliation: None,
            }),
            _ => None,
        }
    }
}

/// A single record from `result[<id>]` of an esummary response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub pub_date: Option<String>,
    pub authors: Vec<Author>,
    /// Only string entries of the upstream array are kept
    pub affiliations: Vec<String>,
    pub corresponding_author_email: Option<String>,
}

impl RawRecord {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let authors = obj
            .get("authors")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Author::from_value).collect())
            .unwrap_or_default();

        let affiliations = obj
            .get("affiliations")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: string_field(obj, "title"),
            pub_date: string_field(obj, "pubdate"),
            authors,
            affiliations,
            corresponding_author_email: string_field(obj, "corresponding_author_email")
                .or_else(|| string_field(obj, "email")),
        }
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}
