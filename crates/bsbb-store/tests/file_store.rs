//! Directory store persistence through a real `FileSlot` directory.

use bsbb_core::{Deal, DirectorySource, NewBusiness, Review};
use bsbb_store::{DirectoryStore, FileSlot, KeyValueSlot, StoreState, DATA_SLOT};
use chrono::{NaiveDate, Utc};

#[test]
fn mutations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = DirectoryStore::open(FileSlot::new(dir.path())).unwrap();
    assert_eq!(store.source(), Some(DirectorySource::Samples));

    let record = NewBusiness {
        name: "Corner Florist".to_owned(),
        category: "retail".to_owned(),
        address: "4 Rose Ln".to_owned(),
        deal: Some(Deal::new("Free bouquet", "With any order over $50", "").unwrap()),
        ..NewBusiness::default()
    }
    .into_record(Utc::now())
    .unwrap();
    let id = record.id.clone();

    store.add_record(record).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
    store
        .append_review(&id, Review::new("Noah", 4, "Lovely", date).unwrap().verified())
        .unwrap();
    store.toggle_favorite("joescoffee").unwrap();
    drop(store);

    let reopened = DirectoryStore::open(FileSlot::new(dir.path())).unwrap();
    assert_eq!(reopened.state(), StoreState::Loaded(DirectorySource::Persisted));
    assert_eq!(reopened.records().len(), 6);

    let florist = reopened.get(&id).unwrap();
    assert_eq!(florist.deals.len(), 1);
    assert!(florist.reviews[0].verified);
    assert!(reopened.is_favorite("joescoffee"));
}

#[test]
fn corrupt_file_falls_back_to_samples() {
    let dir = tempfile::tempdir().unwrap();
    let mut slot = FileSlot::new(dir.path());
    slot.set(DATA_SLOT, "[1, 2, 3]").unwrap();

    let store = DirectoryStore::open(slot).unwrap();
    assert_eq!(store.source(), Some(DirectorySource::Samples));
    assert_eq!(store.records().len(), 5);
}

#[test]
fn api_key_is_stored_beside_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::open(FileSlot::new(dir.path())).unwrap();
    store.set_api_key("AIza-file").unwrap();

    let reopened = DirectoryStore::open(FileSlot::new(dir.path())).unwrap();
    assert_eq!(reopened.api_key().unwrap().as_deref(), Some("AIza-file"));
    assert!(dir.path().join("bsbb-google-api-key").exists());
}
