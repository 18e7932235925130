//! Catalog integrity checking.
//!
//! # Usage
//!
//! ```bash
//! # Human-readable report, exit 1 when problems exist
//! clementine check
//!
//! # Problem list as JSON
//! clementine check --json
//! ```

use clementine_catalog::{integrity, store};
use thiserror::Error;

/// Errors that can occur while checking the catalog.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The catalog has integrity problems.
    #[error("{0} integrity problem(s) found")]
    Unsound(usize),

    /// Output serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Check the demo catalog and report problems.
pub fn run(json: bool) -> Result<(), CheckError> {
    let problems = integrity::check_catalog(store::tree(), store::products());

    if json {
        println!("{}", serde_json::to_string_pretty(&problems)?);
    } else if problems.is_empty() {
        tracing::info!(
            categories = store::tree().len(),
            products = store::products().len(),
            "Catalog is sound"
        );
    } else {
        for problem in &problems {
            tracing::warn!("{problem}");
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Unsound(problems.len()))
    }
}
