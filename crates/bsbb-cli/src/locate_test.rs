use std::path::PathBuf;

use bsbb_core::{AppConfig, DirectorySource, NewBusiness};
use bsbb_providers::{Coordinates, SearchLocation};
use bsbb_store::{DirectoryStore, MemorySlot, DATA_SLOT};
use chrono::Utc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

/// Nothing listens on the discard port, so every request fails fast.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn config_for(base_url: &str, api_key: Option<&str>) -> AppConfig {
    AppConfig {
        data_dir: PathBuf::from(".bsbb"),
        log_level: "info".to_owned(),
        google_api_key: api_key.map(str::to_owned),
        places_base_url: base_url.to_owned(),
        overpass_base_url: base_url.to_owned(),
        geocoder_base_url: base_url.to_owned(),
        request_timeout_secs: 5,
        user_agent: "bsbb-test".to_owned(),
        search_radius_m: 1500,
        result_limit: 50,
    }
}

fn store_with_user_business() -> DirectoryStore<MemorySlot> {
    let mut store = DirectoryStore::open(MemorySlot::new()).unwrap();
    let record = NewBusiness {
        name: "Corner Tailor".to_owned(),
        category: "services".to_owned(),
        address: "9 Elm St".to_owned(),
        phone: String::new(),
        description: String::new(),
        deal: None,
    }
    .into_record(Utc::now())
    .unwrap();
    store.add_record(record).unwrap();
    store
}

fn has_tailor(store: &DirectoryStore<MemorySlot>) -> bool {
    store.records().iter().any(|r| r.name == "Corner Tailor")
}

#[tokio::test]
async fn failed_search_keeps_saved_businesses() {
    let mut store = store_with_user_business();
    let saved = store.serialize().unwrap();

    let source = run_search(
        &mut store,
        &config_for(UNREACHABLE, None),
        SearchLocation::Text("Springfield".to_owned()),
        None,
    )
    .await
    .unwrap();

    assert_eq!(source, DirectorySource::Samples);
    assert!(!store.is_loading());
    assert!(has_tailor(&store));

    let slot = store.into_slot();
    assert_eq!(slot.get(DATA_SLOT).unwrap().as_deref(), Some(saved.as_str()));

    let reopened = DirectoryStore::open(slot).unwrap();
    assert!(has_tailor(&reopened));
}

#[tokio::test]
async fn empty_search_keeps_saved_businesses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "elements": [] })),
        )
        .mount(&server)
        .await;

    let mut store = store_with_user_business();
    let state_before = store.state();
    let source = run_search(
        &mut store,
        &config_for(&server.uri(), None),
        SearchLocation::Coordinates(Coordinates::new(30.27, -97.74)),
        Some("food"),
    )
    .await
    .unwrap();

    assert_eq!(source, DirectorySource::Samples);
    assert!(has_tailor(&store));
    assert_eq!(store.state(), state_before);
}

#[tokio::test]
async fn live_openstreetmap_results_replace_and_persist() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "elements": [
                {
                    "type": "node",
                    "id": 7,
                    "lat": 30.27,
                    "lon": -97.74,
                    "tags": { "name": "Taco Stand", "amenity": "fast_food" }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_with_user_business();
    let source = run_search(
        &mut store,
        &config_for(&server.uri(), None),
        SearchLocation::Coordinates(Coordinates::new(30.27, -97.74)),
        None,
    )
    .await
    .unwrap();

    assert_eq!(source, DirectorySource::Provider);
    assert!(!store.is_loading());
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.records()[0].id, "osm_node_7");

    let reopened = DirectoryStore::open(store.into_slot()).unwrap();
    assert_eq!(reopened.records()[0].name, "Taco Stand");
}

#[tokio::test]
async fn saved_key_selects_places() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .and(query_param("key", "saved-key"))
        .and(query_param("query", "restaurant cafe food in Austin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [
                { "place_id": "xyz", "name": "Bean There", "types": ["cafe"] }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_with_user_business();
    store.set_api_key("saved-key").unwrap();

    let source = run_search(
        &mut store,
        &config_for(&server.uri(), None),
        SearchLocation::Text("Austin".to_owned()),
        Some("food"),
    )
    .await
    .unwrap();

    assert_eq!(source, DirectorySource::Provider);
    assert_eq!(store.records()[0].id, "places_xyz");
    assert!(!has_tailor(&store));
}
