//! Write-path attribute validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate against the category's declared fields
//! clementine validate tops "size=M&color=navy&material=Organic+cotton"
//!
//! # Apply the stricter product-variant rule (size and color required,
//! # nothing blank) instead of the category rule
//! clementine validate tops "size=M&color=navy" --variant
//! ```

use clementine_catalog::{params, store};
use clementine_core::attributes::{validate_attributes, variant_attributes_valid};
use thiserror::Error;

/// Errors that can occur while validating attributes.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The requested category does not exist.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The submitted attributes failed validation.
    #[error("{0} validation problem(s)")]
    Invalid(usize),

    /// The submitted attributes failed the variant rule.
    #[error("Variant attributes are invalid")]
    InvalidVariant,

    /// Output serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Validate submitted attributes for a category.
pub fn run(
    category_name: &str,
    params_str: &str,
    variant: bool,
    json: bool,
) -> Result<(), ValidateError> {
    let category = store::tree()
        .find_by_name(category_name)
        .ok_or_else(|| ValidateError::UnknownCategory(category_name.to_string()))?;

    let raw = params::parse_query_str(params_str);
    let attributes = params::attribute_map_from_params(&raw, &category.fields);

    if variant {
        if variant_attributes_valid(&attributes) {
            tracing::info!(category = %category.name, "Variant attributes are valid");
            return Ok(());
        }
        return Err(ValidateError::InvalidVariant);
    }

    let problems = validate_attributes(&attributes, &category.fields);

    if json {
        println!("{}", serde_json::to_string_pretty(&problems)?);
    } else if problems.is_empty() {
        tracing::info!(category = %category.name, "Attributes are valid");
    } else {
        for problem in &problems {
            println!("{problem}");
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid(problems.len()))
    }
}
