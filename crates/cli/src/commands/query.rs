//! Query building and listing commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the normalized query a request would run
//! clementine query phones "storage=64GB&storage=128GB&priceMax=500"
//!
//! # Actually run it against the demo products
//! clementine list phones "color=black&sort=price-ascending&limit=5"
//! ```
//!
//! Both commands accept the same parameters a storefront request would
//! carry: `page`, `limit`, `search`, `sort`, `priceMin`/`priceMax`, and one
//! key per declared filter field, repeatable for multi-value filters.

use clementine_catalog::{params, store};
use clementine_core::query::{QueryError, build_query};
use thiserror::Error;

/// Errors that can occur while building or running a query.
#[derive(Debug, Error)]
pub enum QueryCommandError {
    /// The query could not be assembled.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Output serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Build the normalized product query and print it.
pub fn build(category: &str, params_str: &str, json: bool) -> Result<(), QueryCommandError> {
    let raw = params::parse_query_str(params_str);
    let query = build_query(store::tree(), &raw, category)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&query)?);
    } else {
        println!("{query:#?}");
    }
    Ok(())
}

/// Run a query against the demo products and print the resulting page.
pub fn list(category: &str, params_str: &str, json: bool) -> Result<(), QueryCommandError> {
    let raw = params::parse_query_str(params_str);
    let query = build_query(store::tree(), &raw, category)?;
    let page = store::listing().list(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    tracing::info!(
        page = page.page,
        total_pages = page.total_pages,
        total = page.total_count,
        in_stock = page.in_stock_count,
        "Listing results"
    );
    for product in &page.products {
        let stock = if product.available { "in stock" } else { "sold out" };
        println!(
            "{:>4}  {:<28} {:>10}  {}",
            product.id, product.title, product.price, stock
        );
    }
    Ok(())
}
