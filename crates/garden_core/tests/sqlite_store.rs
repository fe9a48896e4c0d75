use garden_core::{
    storage_key, Book, CommonFields, ContentPatch, ContentRepository, ContentStatus, ContentStore,
    DefaultCatalog, LoadOutcome, Pot, SqliteStore,
};

fn hand_pot() -> Pot {
    Pot {
        common: CommonFields::new("Glazed pot", "Blue glaze", "glazed.png", ContentStatus::Draft),
        material: "ceramic".to_string(),
        size: "30 cm".to_string(),
        drainage: false,
        price: 25.0,
        stock: 4,
    }
}

#[test]
fn slots_round_trip_and_overwrite() {
    let store = SqliteStore::open_in_memory().unwrap();

    assert_eq!(store.load("k").unwrap(), None);
    store.save("k", "[1]").unwrap();
    store.save("k", "[2]").unwrap();
    store.save("other", "[]").unwrap();

    assert_eq!(store.load("k").unwrap().as_deref(), Some("[2]"));
    assert_eq!(store.keys().unwrap(), vec!["k".to_string(), "other".to_string()]);

    store.remove("k").unwrap();
    assert_eq!(store.load("k").unwrap(), None);
}

#[test]
fn repository_state_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garden.db");

    let created_id = {
        let store = SqliteStore::open(&path).unwrap();
        let mut pots = ContentRepository::open(&store, Pot::default_catalog());
        assert_eq!(pots.load_outcome(), &LoadOutcome::Seeded);

        let created = pots.create(hand_pot());
        pots.update(created.id(), &ContentPatch::status(ContentStatus::Published))
            .unwrap();
        assert!(pots.last_save_error().is_none());
        created.id().to_string()
    };

    let store = SqliteStore::open(&path).unwrap();
    let pots = ContentRepository::open(&store, Vec::<garden_core::Content<Pot>>::new());

    assert_eq!(pots.load_outcome(), &LoadOutcome::Restored { count: 2 });
    let reloaded = pots.get_by_id(&created_id).unwrap();
    assert_eq!(reloaded.status(), ContentStatus::Published);
    assert_eq!(pots.list()[0].id(), "pot-terracotta-20");
}

#[test]
fn one_database_holds_independent_collections() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut pots = ContentRepository::<Pot, _>::open(&store, Vec::new());
    let mut books = ContentRepository::open(&store, Book::default_catalog());

    pots.create(hand_pot());
    assert!(books.remove("book-soil-food-web"));

    assert_eq!(
        store.keys().unwrap(),
        vec![storage_key("book"), storage_key("pot")]
    );
    assert_eq!(store.load(&storage_key("book")).unwrap().as_deref(), Some("[]"));
}
