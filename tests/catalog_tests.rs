//! # Catalog Store Tests
//!
//! Integration tests for the file-backed catalog store: id assignment,
//! read-modify-write persistence and the removal contract.

use sights::catalog::{Catalog, CatalogStore, LocalizedText, SightEntry};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> CatalogStore {
    CatalogStore::new(dir.path().join("sights.json"))
}

fn entry(name_en: &str, name_ru: &str) -> SightEntry {
    SightEntry {
        id: 0,
        name: LocalizedText::new(name_en, name_ru),
        description: LocalizedText::new("A fun place", "Весёлое место"),
        fun_fact: LocalizedText::new("Very old", "Очень старое"),
        photo: "photo.jpg".to_string(),
        location: "https://maps.example/x".to_string(),
    }
}

#[test]
fn test_missing_file_loads_as_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let catalog = store.load().unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_append_assigns_sequential_ids() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let first = store.append(entry("Lighthouse", "Маяк")).unwrap();
    let second = store.append(entry("Warehouse", "Склад")).unwrap();
    let third = store.append(entry("Old House", "Старый дом")).unwrap();

    assert_eq!((first.id, second.id, third.id), (1, 2, 3));

    let catalog = store.load().unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.sights[0].id, 1);
    assert_eq!(catalog.sights[2].id, 3);
}

#[test]
fn test_ids_are_never_reused_after_deletion() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.append(entry("Lighthouse", "Маяк")).unwrap();
    let second = store.append(entry("Warehouse", "Склад")).unwrap();
    store.remove_by_id(second.id).unwrap();

    let third = store.append(entry("Old House", "Старый дом")).unwrap();
    assert_eq!(third.id, 3);

    let catalog = store.load().unwrap();
    let ids: Vec<u32> = catalog.sights.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_remove_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.append(entry("Lighthouse", "Маяк")).unwrap();
    let doomed = store.append(entry("Warehouse", "Склад")).unwrap();

    store.remove_by_id(doomed.id).unwrap();
    let after_first = store.load().unwrap();

    // Second removal of the same id is a no-op, not a failure
    store.remove_by_id(doomed.id).unwrap();
    let after_second = store.load().unwrap();

    assert_eq!(after_first.len(), 1);
    assert_eq!(after_first.sights, after_second.sights);
}

#[test]
fn test_remove_unknown_id_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.append(entry("Lighthouse", "Маяк")).unwrap();
    store.remove_by_id(99).unwrap();

    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn test_persisted_document_shape() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.append(entry("Lighthouse", "Маяк")).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("sights.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    // One top-level list of records with two-key language maps
    let sight = &doc["sights"][0];
    assert_eq!(sight["id"], 1);
    assert_eq!(sight["name"]["en"], "Lighthouse");
    assert_eq!(sight["name"]["ru"], "Маяк");
    assert_eq!(sight["fun_fact"]["en"], "Very old");
    assert_eq!(sight["photo"], "photo.jpg");
    assert_eq!(sight["location"], "https://maps.example/x");
}

#[test]
fn test_search_names_matches_both_languages_case_insensitively() {
    let mut catalog = Catalog::default();
    let mut lighthouse = entry("Lighthouse", "Маяк");
    lighthouse.id = 1;
    let mut warehouse = entry("Warehouse", "Склад");
    warehouse.id = 2;
    catalog.sights.push(lighthouse);
    catalog.sights.push(warehouse);

    let matches = catalog.search_names("house");
    assert_eq!(matches.len(), 2);

    let matches = catalog.search_names("СКЛАД");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, 2);

    assert!(catalog.search_names("castle").is_empty());
}

#[test]
fn test_next_id_on_empty_catalog() {
    assert_eq!(Catalog::default().next_id(), 1);
}
