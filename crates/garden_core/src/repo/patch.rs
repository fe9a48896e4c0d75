//! Shallow partial updates for content entities.
//!
//! # Invariants
//! - A patch never carries `id`, `createdAt` or `updatedAt`.
//! - Applying a patch replaces exactly the keys it contains; absent keys
//!   keep their stored value.
//! - A patch that would produce an invalid variant is rejected whole.

use crate::model::content::{ContentItem, ContentStatus};
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RESERVED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

#[derive(Debug)]
pub enum PatchError {
    /// Patch source was not a JSON object.
    NotAnObject,
    /// A value could not be converted to JSON.
    Encode(serde_json::Error),
    /// The merged fields do not form a valid variant.
    Invalid(serde_json::Error),
}

impl Display for PatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "content patch must be a JSON object"),
            Self::Encode(err) => write!(f, "failed to encode patch value: {err}"),
            Self::Invalid(err) => write!(f, "patched content is invalid: {err}"),
        }
    }
}

impl Error for PatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotAnObject => None,
            Self::Encode(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

/// Field set for `ContentRepository::update`, keyed by wire (camelCase) name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentPatch {
    fields: Map<String, Value>,
}

impl ContentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a status-only patch.
    pub fn status(status: ContentStatus) -> Self {
        Self::new().set("status", status.as_str())
    }

    /// Sets one key. Reserved bookkeeping keys are dropped.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !is_reserved(&key) {
            self.fields.insert(key, value.into());
        }
        self
    }

    /// Like `set`, for values that only implement `Serialize`.
    pub fn set_serialized(
        self,
        key: impl Into<String>,
        value: &impl Serialize,
    ) -> Result<Self, PatchError> {
        let value = serde_json::to_value(value).map_err(PatchError::Encode)?;
        Ok(self.set(key, value))
    }

    /// Builds a patch from a JSON object.
    pub fn from_value(value: Value) -> Result<Self, PatchError> {
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .fold(Self::new(), |patch, (key, value)| patch.set(key, value))),
            _ => Err(PatchError::NotAnObject),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Merges this patch over `item` and returns the resulting variant.
    pub(crate) fn apply<V: ContentItem>(&self, item: &V) -> Result<V, PatchError> {
        let mut merged = match serde_json::to_value(item).map_err(PatchError::Encode)? {
            Value::Object(map) => map,
            _ => return Err(PatchError::NotAnObject),
        };
        for (key, value) in &self.fields {
            merged.insert(key.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(merged)).map_err(PatchError::Invalid)
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}
