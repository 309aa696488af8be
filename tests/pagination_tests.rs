//! # Pagination Tests
//!
//! Window math for the catalog browser across catalog sizes and pages.

use sights::catalog::{Catalog, LocalizedText, SightEntry};
use sights::errors::BotError;
use sights::pagination::{render_detail, render_page};

fn catalog_of(n: usize) -> Catalog {
    let sights = (1..=n as u32)
        .map(|id| SightEntry {
            id,
            name: LocalizedText::new(format!("Sight {id}"), format!("Место {id}")),
            description: LocalizedText::new("d", "о"),
            fun_fact: LocalizedText::new("f", "ф"),
            photo: format!("sight_{id}.jpg"),
            location: "https://maps.example/x".to_string(),
        })
        .collect();
    Catalog { sights }
}

#[test]
fn test_window_invariants_hold_for_all_sizes() {
    for catalog_size in 0..=12 {
        let catalog = catalog_of(catalog_size);
        for page_size in 1..=4 {
            for page in 0..=6 {
                let view = render_page(&catalog, page, page_size);

                let expected_len = page_size.min(catalog_size.saturating_sub(page * page_size));
                assert_eq!(
                    view.items.len(),
                    expected_len,
                    "size={catalog_size} page={page} per_page={page_size}"
                );
                assert_eq!(view.has_prev, page > 0);
                assert_eq!(view.has_next, (page + 1) * page_size < catalog_size);
            }
        }
    }
}

#[test]
fn test_pages_cover_the_catalog_in_order_without_overlap() {
    let catalog = catalog_of(11);
    let page_size = 4;

    let mut seen: Vec<u32> = Vec::new();
    let mut page = 0;
    loop {
        let view = render_page(&catalog, page, page_size);
        seen.extend(view.items.iter().map(|s| s.id));
        if !view.has_next {
            break;
        }
        page += 1;
    }

    assert_eq!(seen, (1..=11).collect::<Vec<u32>>());
}

#[test]
fn test_detail_of_removed_entry_is_not_found() {
    let mut catalog = catalog_of(3);
    catalog.sights.retain(|s| s.id != 2);

    assert!(render_detail(&catalog, 1).is_ok());
    assert!(matches!(render_detail(&catalog, 2), Err(BotError::NotFound(2))));
}

#[test]
fn test_empty_catalog_pages_are_empty() {
    let catalog = catalog_of(0);
    let view = render_page(&catalog, 0, 5);
    assert!(view.items.is_empty());
    assert!(!view.has_prev);
    assert!(!view.has_next);
}
