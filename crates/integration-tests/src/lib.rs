//! Integration tests for Clementine.
//!
//! Everything here runs against the real demo store from
//! `clementine-catalog`, end to end: raw query strings are decoded at the
//! boundary, normalized into product queries by the core, and executed by
//! the in-memory listing engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clementine-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `catalog_pipeline` - Raw request parameters through query building to
//!   listing pages
//! - `catalog_integrity` - Demo-store data invariants and write-path
//!   validation over the real taxonomy

use clementine_catalog::listing::ListingPage;
use clementine_catalog::params::parse_query_str;
use clementine_catalog::store;
use clementine_core::query::{ProductQuery, QueryError, build_query};

/// Build a query against the demo store from a raw query string.
///
/// # Errors
///
/// Returns [`QueryError::UnknownCategory`] when `category` does not
/// resolve in the demo taxonomy.
pub fn demo_query(category: &str, query_str: &str) -> Result<ProductQuery, QueryError> {
    let raw = parse_query_str(query_str);
    build_query(store::tree(), &raw, category)
}

/// Build and run a query against the demo store.
///
/// # Errors
///
/// Returns [`QueryError::UnknownCategory`] when `category` does not
/// resolve in the demo taxonomy.
pub fn demo_page(category: &str, query_str: &str) -> Result<ListingPage, QueryError> {
    Ok(store::listing().list(&demo_query(category, query_str)?))
}

/// The titles on a listing page, in page order.
#[must_use]
pub fn titles(page: &ListingPage) -> Vec<&str> {
    page.products.iter().map(|p| p.title.as_str()).collect()
}
