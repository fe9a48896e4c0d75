use garden_core::{
    Book, CommonFields, Content, ContentStatus, ContentType, Difficulty, Technique, Timestamp,
};
use serde_json::json;

fn pruning() -> Technique {
    Technique {
        common: CommonFields::new(
            "Pruning",
            "Shape shrubs",
            "pruning.jpg",
            ContentStatus::Published,
        ),
        difficulty: Difficulty::Intermediate,
        category: "maintenance".to_string(),
        steps: vec!["cut".to_string(), "clean".to_string()],
        duration: "20 minutes".to_string(),
    }
}

#[test]
fn content_serializes_as_one_flat_camel_case_object() {
    let at = Timestamp::parse("2024-04-01T09:30:00.250Z").unwrap();
    let content = Content::new("t-1", at, pruning());

    let value = serde_json::to_value(&content).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "t-1",
            "createdAt": "2024-04-01T09:30:00.250Z",
            "updatedAt": "2024-04-01T09:30:00.250Z",
            "title": "Pruning",
            "description": "Shape shrubs",
            "imageUrl": "pruning.jpg",
            "status": "published",
            "difficulty": "intermediate",
            "category": "maintenance",
            "steps": ["cut", "clean"],
            "duration": "20 minutes"
        })
    );
}

#[test]
fn featured_flag_is_serialized_only_when_set() {
    let at = Timestamp::from_epoch_millis(0).unwrap();
    let mut item = pruning();
    item.common = item.common.featured(false);
    let value = serde_json::to_value(Content::new("t-2", at, item)).unwrap();
    assert_eq!(value["featured"], false);

    let plain = serde_json::to_value(Content::new("t-3", at, pruning())).unwrap();
    assert!(plain.get("featured").is_none());
}

#[test]
fn content_deserializes_from_external_payload() {
    let value = json!({
        "id": "1712345678901",
        "title": "Teaming with Microbes",
        "description": "Soil food web",
        "imageUrl": "/images/microbes.jpg",
        "status": "draft",
        "createdAt": "2024-04-05T19:34:38.901Z",
        "updatedAt": "2024-04-06T08:00:00.000Z",
        "author": "Jeff Lowenfels",
        "pages": 220,
        "price": 20
    });

    let book: Content<Book> = serde_json::from_value(value).unwrap();
    assert_eq!(book.id(), "1712345678901");
    assert_eq!(book.status(), ContentStatus::Draft);
    assert_eq!(book.item.isbn, None);
    assert_eq!(book.item.price, 20.0);
    assert!(book.created_at() < book.updated_at());
}

#[test]
fn unknown_status_is_rejected() {
    let value = json!({
        "id": "x",
        "title": "t",
        "description": "d",
        "imageUrl": "u",
        "status": "archived",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z",
        "author": "a",
        "pages": 1,
        "price": 1.0
    });

    assert!(serde_json::from_value::<Content<Book>>(value).is_err());
}

#[test]
fn from_parts_rejects_reversed_timestamps_and_blank_ids() {
    let earlier = Timestamp::from_epoch_millis(1_000).unwrap();
    let later = Timestamp::from_epoch_millis(2_000).unwrap();

    assert!(Content::from_parts("ok", earlier, later, pruning()).is_ok());
    assert!(Content::from_parts("bad", later, earlier, pruning()).is_err());
    assert!(Content::from_parts("  ", earlier, later, pruning()).is_err());
}

#[test]
fn content_type_identifiers_round_trip() {
    for kind in ContentType::ALL {
        assert_eq!(kind.as_str().parse::<ContentType>().unwrap(), kind);
    }
    assert_eq!(" Tool ".parse::<ContentType>().unwrap(), ContentType::Tool);
    assert!("shrub".parse::<ContentType>().is_err());
}
