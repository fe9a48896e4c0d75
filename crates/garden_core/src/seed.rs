//! Default catalog used when a collection has no persisted state.
//!
//! Seed entries carry fixed ids and timestamps so a fresh install is
//! reproducible.

use crate::model::content::{CommonFields, Content, ContentItem, ContentStatus};
use crate::model::timestamp::Timestamp;
use crate::model::variants::{
    Accessory, Book, Difficulty, Essential, Pot, Suggestion, Technique, Tool, Video,
};

/// 2024-01-01T00:00:00.000Z
const SEED_EPOCH_MS: i64 = 1_704_067_200_000;

/// Variants that ship with a built-in default collection.
pub trait DefaultCatalog: ContentItem {
    fn default_catalog() -> Vec<Content<Self>>;
}

fn seeded<V>(id: &str, item: V) -> Content<V> {
    let at = Timestamp::from_epoch_millis(SEED_EPOCH_MS).unwrap_or_default();
    Content::new(id, at, item)
}

fn common(title: &str, description: &str, image: &str, status: ContentStatus) -> CommonFields {
    CommonFields::new(title, description, format!("/images/{image}"), status)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

impl DefaultCatalog for Technique {
    fn default_catalog() -> Vec<Content<Self>> {
        vec![
            seeded(
                "technique-pruning",
                Technique {
                    common: common(
                        "Pruning basics",
                        "Shape shrubs and encourage healthy growth.",
                        "pruning.jpg",
                        ContentStatus::Published,
                    )
                    .featured(true),
                    difficulty: Difficulty::Beginner,
                    category: "maintenance".to_string(),
                    steps: strings(&[
                        "Sterilize the shears",
                        "Remove dead or crossing branches",
                        "Cut just above an outward-facing bud",
                    ]),
                    duration: "30 minutes".to_string(),
                },
            ),
            seeded(
                "technique-grafting",
                Technique {
                    common: common(
                        "Whip grafting",
                        "Join scion and rootstock of matching diameter.",
                        "grafting.jpg",
                        ContentStatus::Draft,
                    ),
                    difficulty: Difficulty::Advanced,
                    category: "propagation".to_string(),
                    steps: strings(&[
                        "Make matching sloped cuts",
                        "Align the cambium layers",
                        "Wrap the union tightly",
                    ]),
                    duration: "1 hour".to_string(),
                },
            ),
        ]
    }
}

impl DefaultCatalog for Tool {
    fn default_catalog() -> Vec<Content<Self>> {
        vec![seeded(
            "tool-bypass-pruner",
            Tool {
                common: common(
                    "Bypass pruner",
                    "Clean cuts on live stems up to 2 cm.",
                    "pruner.jpg",
                    ContentStatus::Published,
                ),
                brand: "Felco".to_string(),
                price: 54.9,
                stock: 18,
                category: "cutting".to_string(),
            },
        )]
    }
}

impl DefaultCatalog for Essential {
    fn default_catalog() -> Vec<Content<Self>> {
        vec![seeded(
            "essential-potting-mix",
            Essential {
                common: common(
                    "Potting mix",
                    "Peat-free mix for containers.",
                    "potting-mix.jpg",
                    ContentStatus::Published,
                ),
                category: "soil".to_string(),
                price: 12.5,
                stock: 60,
            },
        )]
    }
}

impl DefaultCatalog for Pot {
    fn default_catalog() -> Vec<Content<Self>> {
        vec![seeded(
            "pot-terracotta-20",
            Pot {
                common: common(
                    "Terracotta pot",
                    "Breathable clay pot, 20 cm.",
                    "terracotta.jpg",
                    ContentStatus::Published,
                ),
                material: "terracotta".to_string(),
                size: "20 cm".to_string(),
                drainage: true,
                price: 9.0,
                stock: 35,
            },
        )]
    }
}

impl DefaultCatalog for Accessory {
    fn default_catalog() -> Vec<Content<Self>> {
        vec![seeded(
            "accessory-plant-labels",
            Accessory {
                common: common(
                    "Plant labels",
                    "Reusable bamboo labels, pack of 50.",
                    "labels.jpg",
                    ContentStatus::Draft,
                ),
                category: "organization".to_string(),
                price: 4.5,
                stock: 120,
            },
        )]
    }
}

impl DefaultCatalog for Suggestion {
    fn default_catalog() -> Vec<Content<Self>> {
        vec![seeded(
            "suggestion-spring-herbs",
            Suggestion {
                common: common(
                    "Spring herb corner",
                    "Fast growers for a sunny windowsill.",
                    "herbs.jpg",
                    ContentStatus::Published,
                ),
                season: "spring".to_string(),
                plants: strings(&["basil", "chives", "parsley"]),
                tips: strings(&["Pinch basil tips weekly", "Water at the base"]),
            },
        )]
    }
}

impl DefaultCatalog for Video {
    fn default_catalog() -> Vec<Content<Self>> {
        vec![seeded(
            "video-repotting",
            Video {
                common: common(
                    "Repotting a root-bound plant",
                    "Loosen roots and move up one pot size.",
                    "repotting.jpg",
                    ContentStatus::Published,
                ),
                video_url: "https://videos.example.org/repotting.mp4".to_string(),
                duration: "8:42".to_string(),
                category: "houseplants".to_string(),
            },
        )]
    }
}

impl DefaultCatalog for Book {
    fn default_catalog() -> Vec<Content<Self>> {
        vec![seeded(
            "book-soil-food-web",
            Book {
                common: common(
                    "Teaming with Microbes",
                    "A gardener's guide to the soil food web.",
                    "microbes.jpg",
                    ContentStatus::Published,
                ),
                author: "Jeff Lowenfels".to_string(),
                isbn: Some("9781604691139".to_string()),
                pages: 220,
                price: 19.95,
            },
        )]
    }
}
