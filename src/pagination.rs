//! # Pagination Module
//!
//! Pure page-window math for the catalog browser. Handlers feed these
//! functions a freshly loaded catalog; nothing here touches the transport
//! or the session, which keeps the navigation logic trivially testable.

use crate::catalog::{Catalog, SightEntry};
use crate::errors::BotError;

/// One rendered page of the catalog list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub items: &'a [SightEntry],
    pub has_prev: bool,
    pub has_next: bool,
}

/// Compute the window for a zero-based page. Pages past the end of the
/// catalog yield an empty slice with `has_next == false` rather than an
/// error; the caller decides how to present that.
pub fn render_page(catalog: &Catalog, page: usize, page_size: usize) -> PageView<'_> {
    let len = catalog.len();
    let start = page.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);

    PageView {
        items: &catalog.sights[start..end],
        has_prev: page > 0,
        has_next: page.saturating_add(1).saturating_mul(page_size) < len,
    }
}

/// Look up one entry for the detail view. A missing id means the entry was
/// deleted under a stale list view.
pub fn render_detail(catalog: &Catalog, id: u32) -> Result<&SightEntry, BotError> {
    catalog.find_by_id(id).ok_or(BotError::NotFound(id))
}
