//! Gardening content variants.
//!
//! Each variant flattens `CommonFields` and adds its own catalog fields.
//! Variant-specific fields are never read by the repository.

use crate::model::content::{CommonFields, ContentItem, ContentType};
use serde::{Deserialize, Serialize};

/// Skill level required by a technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Step-by-step gardening technique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technique {
    #[serde(flatten)]
    pub common: CommonFields,
    pub difficulty: Difficulty,
    pub category: String,
    #[serde(default)]
    pub steps: Vec<String>,
    /// Free-form estimate such as `"30 minutes"`.
    #[serde(default)]
    pub duration: String,
}

/// Hand or power tool sold in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(flatten)]
    pub common: CommonFields,
    pub brand: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub category: String,
}

/// Consumables such as soil, fertilizer or seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Essential {
    #[serde(flatten)]
    pub common: CommonFields,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    #[serde(flatten)]
    pub common: CommonFields,
    pub material: String,
    pub size: String,
    #[serde(default)]
    pub drainage: bool,
    pub price: f64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
    #[serde(flatten)]
    pub common: CommonFields,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

/// Seasonal planting suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(flatten)]
    pub common: CommonFields,
    pub season: String,
    #[serde(default)]
    pub plants: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(flatten)]
    pub common: CommonFields,
    pub video_url: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(flatten)]
    pub common: CommonFields,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub pages: u32,
    pub price: f64,
}

macro_rules! impl_content_item {
    ($($variant:ty => $kind:expr),+ $(,)?) => {
        $(
            impl ContentItem for $variant {
                const CONTENT_TYPE: ContentType = $kind;

                fn common(&self) -> &CommonFields {
                    &self.common
                }
            }
        )+
    };
}

impl_content_item! {
    Technique => ContentType::Technique,
    Tool => ContentType::Tool,
    Essential => ContentType::Essential,
    Pot => ContentType::Pot,
    Accessory => ContentType::Accessory,
    Suggestion => ContentType::Suggestion,
    Video => ContentType::Video,
    Book => ContentType::Book,
}
