//! Typed views over parsed JSON
//!
//! The API returns loosely shaped JSON. These thin wrappers over
//! [`serde_json::Value`] turn absence and type mismatches into either a
//! `None` or a [`JsonError`], so the model constructors can read fields
//! eagerly without matching on `Value` everywhere.
//!
//! String accessors treat a missing key and an explicit `null` the same way:
//! both yield `None`. Every other accessor fails on a missing key.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while reading a JSON document
#[derive(Debug, Error)]
pub enum JsonError {
    /// The text is not valid JSON
    #[error("JSON cannot be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required key is absent
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A key (or array slot) holds a value of the wrong JSON type
    #[error("field `{field}` is not {expected}")]
    WrongType {
        /// Key name, or `[index]` for array slots
        field: String,
        /// Expected JSON type
        expected: &'static str,
    },

    /// A timestamp field does not match the server date format
    #[error("invalid timestamp `{value}`: {source}")]
    InvalidDate {
        /// Raw field value
        value: String,
        /// Underlying parse failure
        #[source]
        source: chrono::ParseError,
    },
}

/// Result type for JSON view operations
pub type Result<T> = std::result::Result<T, JsonError>;

/// Parse raw response text into a generic JSON tree
pub fn parse(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Whether a response body carries no document at all
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn wrong_type(field: impl Into<String>, expected: &'static str) -> JsonError {
    JsonError::WrongType {
        field: field.into(),
        expected,
    }
}

/// Read-only view of a JSON object
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// View a value as an object
    pub fn from_value(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or_else(|| wrong_type("<root>", "an object"))
    }

    /// Check whether the key is present (even if `null`)
    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn require(&self, key: &str) -> Result<&'a Value> {
        self.map.get(key).ok_or_else(|| JsonError::MissingField(key.to_string()))
    }

    /// Get a string field; missing or `null` yields `None`
    pub fn get_string(&self, key: &str) -> Result<Option<&'a str>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(wrong_type(key, "a string")),
        }
    }

    /// Get a 64-bit integer field
    pub fn get_long(&self, key: &str) -> Result<i64> {
        self.require(key)?.as_i64().ok_or_else(|| wrong_type(key, "an integer"))
    }

    /// Get a 32-bit integer field
    pub fn get_int(&self, key: &str) -> Result<i32> {
        let n = self.get_long(key)?;
        i32::try_from(n).map_err(|_| wrong_type(key, "a 32-bit integer"))
    }

    /// Get an integer field that may be absent, `null`, or a numeric string
    pub fn opt_long(&self, key: &str) -> Result<Option<i64>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => {
                n.as_i64().map(Some).ok_or_else(|| wrong_type(key, "an integer"))
            }
            Some(Value::String(s)) => {
                s.trim().parse().map(Some).map_err(|_| wrong_type(key, "an integer"))
            }
            Some(_) => Err(wrong_type(key, "an integer")),
        }
    }

    /// Get a boolean field
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.require(key)?.as_bool().ok_or_else(|| wrong_type(key, "a boolean"))
    }

    /// Get a nested object
    pub fn get_object(&self, key: &str) -> Result<JsonObject<'a>> {
        self.require(key)?
            .as_object()
            .map(|map| JsonObject { map })
            .ok_or_else(|| wrong_type(key, "an object"))
    }

    /// Get a nested object that may be absent; `null` also counts as absent
    pub fn opt_object(&self, key: &str) -> Result<Option<JsonObject<'a>>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(JsonObject { map })),
            Some(_) => Err(wrong_type(key, "an object")),
        }
    }

    /// Get a nested array
    pub fn get_array(&self, key: &str) -> Result<JsonArray<'a>> {
        self.require(key)?
            .as_array()
            .map(|items| JsonArray { items })
            .ok_or_else(|| wrong_type(key, "an array"))
    }
}

/// Read-only view of a JSON array
#[derive(Debug, Clone, Copy)]
pub struct JsonArray<'a> {
    items: &'a [Value],
}

impl<'a> JsonArray<'a> {
    /// View a value as an array
    pub fn from_value(value: &'a Value) -> Result<Self> {
        value
            .as_array()
            .map(|items| Self {
                items: items.as_slice(),
            })
            .ok_or_else(|| wrong_type("<root>", "an array"))
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the object at `index`
    pub fn object(&self, index: usize) -> Result<JsonObject<'a>> {
        let value = self
            .items
            .get(index)
            .ok_or_else(|| JsonError::MissingField(format!("[{index}]")))?;
        value
            .as_object()
            .map(|map| JsonObject { map })
            .ok_or_else(|| wrong_type(format!("[{index}]"), "an object"))
    }

    /// Get the integer at `index`
    pub fn long(&self, index: usize) -> Result<i64> {
        let value = self
            .items
            .get(index)
            .ok_or_else(|| JsonError::MissingField(format!("[{index}]")))?;
        value.as_i64().ok_or_else(|| wrong_type(format!("[{index}]"), "an integer"))
    }

    /// Iterate over the elements as objects, in source order
    pub fn objects(&self) -> impl Iterator<Item = Result<JsonObject<'a>>> + 'a {
        let items = self.items;
        (0..items.len()).map(move |i| JsonArray { items }.object(i))
    }

    /// Collect every element as an integer
    pub fn longs(&self) -> Result<Vec<i64>> {
        (0..self.len()).map(|i| self.long(i)).collect()
    }
}
