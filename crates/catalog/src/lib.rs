//! Clementine Catalog - The demo store behind the shared core.
//!
//! Everything stateful about the catalog lives here, one step removed from
//! the pure rules in `clementine-core`:
//!
//! - [`store`] - The store's category taxonomy and product records, built
//!   once at startup from static configuration
//! - [`params`] - Decoding of URL query strings into the canonical
//!   parameter form the core consumes
//! - [`listing`] - The in-memory listing engine that runs a
//!   [`ProductQuery`](clementine_core::query::ProductQuery)
//! - [`integrity`] - Cross-checks over taxonomy and product data, run by
//!   `clementine check` and the test suite

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod integrity;
pub mod listing;
pub mod params;
pub mod store;
