//! Shared content shape and the generic stored entity.
//!
//! # Responsibility
//! - Define the base fields every gardening content variant carries.
//! - Wrap a variant payload with repository-managed identity/timestamps.
//!
//! # Invariants
//! - `id` is assigned once and never changes.
//! - `created_at <= updated_at` for every entity.
//! - The repository reads only `id`, timestamps and `status`; all other
//!   variant fields are opaque to it.

use crate::model::timestamp::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifier of one entity, unique within its collection.
pub type ContentId = String;

/// Publication state of a content entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Published,
    Draft,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }

    pub fn is_published(self) -> bool {
        self == Self::Published
    }
}

impl Display for ContentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display attributes shared by every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonFields {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub status: ContentStatus,
    /// Presentation hint only; has no effect on repository behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl CommonFields {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
        status: ContentStatus,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_url: image_url.into(),
            status,
            featured: None,
        }
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }
}

/// Identifier of one independent content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    Technique,
    Tool,
    Essential,
    Pot,
    Accessory,
    Suggestion,
    Video,
    Book,
}

impl ContentType {
    pub const ALL: [ContentType; 8] = [
        Self::Technique,
        Self::Tool,
        Self::Essential,
        Self::Pot,
        Self::Accessory,
        Self::Suggestion,
        Self::Video,
        Self::Book,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technique => "technique",
            Self::Tool => "tool",
            Self::Essential => "essential",
            Self::Pot => "pot",
            Self::Accessory => "accessory",
            Self::Suggestion => "suggestion",
            Self::Video => "video",
            Self::Book => "book",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownContentType(s.to_string()))
    }
}

/// Returned when a string names no known content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContentType(pub String);

impl Display for UnknownContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown content type `{}`", self.0)
    }
}

impl Error for UnknownContentType {}

/// Contract every variant payload implements so the repository can stay
/// generic over it.
pub trait ContentItem: Clone + Serialize + DeserializeOwned {
    /// Collection this variant lives in by default.
    const CONTENT_TYPE: ContentType;

    fn common(&self) -> &CommonFields;

    fn status(&self) -> ContentStatus {
        self.common().status
    }
}

/// Validation failure for a stored entity or collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    EmptyId,
    DuplicateId(ContentId),
    TimestampsOutOfOrder {
        id: ContentId,
        created_at: Timestamp,
        updated_at: Timestamp,
    },
}

impl Display for ContentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "content id must not be empty"),
            Self::DuplicateId(id) => write!(f, "duplicate content id `{id}`"),
            Self::TimestampsOutOfOrder {
                id,
                created_at,
                updated_at,
            } => write!(
                f,
                "content `{id}` has updatedAt ({updated_at}) earlier than createdAt ({created_at})"
            ),
        }
    }
}

impl Error for ContentValidationError {}

/// Stored entity: repository-managed metadata plus the variant payload,
/// flattened into one JSON object on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content<V> {
    id: ContentId,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(flatten)]
    pub item: V,
}

impl<V> Content<V> {
    /// Creates a fresh entity whose `updated_at` equals `created_at`.
    pub fn new(id: impl Into<ContentId>, created_at: Timestamp, item: V) -> Self {
        Self {
            id: id.into(),
            created_at,
            updated_at: created_at,
            item,
        }
    }

    /// Reassembles an entity from persisted parts.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `TimestampsOutOfOrder` when `updated_at < created_at`.
    pub fn from_parts(
        id: impl Into<ContentId>,
        created_at: Timestamp,
        updated_at: Timestamp,
        item: V,
    ) -> Result<Self, ContentValidationError> {
        let content = Self {
            id: id.into(),
            created_at,
            updated_at,
            item,
        };
        content.validate()?;
        Ok(content)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn validate(&self) -> Result<(), ContentValidationError> {
        if self.id.trim().is_empty() {
            return Err(ContentValidationError::EmptyId);
        }
        if self.updated_at < self.created_at {
            return Err(ContentValidationError::TimestampsOutOfOrder {
                id: self.id.clone(),
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Stamps a mutation; never moves `updated_at` backwards.
    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at);
    }
}

impl<V: ContentItem> Content<V> {
    pub fn status(&self) -> ContentStatus {
        self.item.status()
    }

    pub fn is_published(&self) -> bool {
        self.status().is_published()
    }
}
