//! Taxonomy inspection commands.
//!
//! # Usage
//!
//! ```bash
//! # Print the whole tree with ids and declared field names
//! clementine tree
//!
//! # Show one category's fields in detail
//! clementine fields laptops
//! ```

use clementine_catalog::store;
use clementine_core::taxonomy::Category;
use thiserror::Error;

/// Errors that can occur while inspecting the taxonomy.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The requested category does not exist.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Output serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Print the category taxonomy.
pub fn print_tree(json: bool) -> Result<(), TreeError> {
    let tree = store::tree();

    if json {
        println!("{}", serde_json::to_string_pretty(tree)?);
        return Ok(());
    }

    for root in tree.roots() {
        print_category(root, 0);
    }
    Ok(())
}

fn print_category(category: &Category, depth: usize) {
    let indent = "  ".repeat(depth);
    let fields = if category.fields.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = category.fields.iter().map(|f| f.name.as_str()).collect();
        format!("  [{}]", names.join(", "))
    };
    println!("{indent}{}  {}{}", category.id, category.name, fields);

    for child in &category.subcategories {
        print_category(child, depth + 1);
    }
}

/// Print the filter fields a category declares.
pub fn print_fields(category_name: &str, json: bool) -> Result<(), TreeError> {
    let category = store::tree()
        .find_by_name(category_name)
        .ok_or_else(|| TreeError::UnknownCategory(category_name.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&category.fields)?);
        return Ok(());
    }

    if category.fields.is_empty() {
        tracing::info!(category = %category.name, "No filter fields declared");
        return Ok(());
    }

    for field in &category.fields {
        let mut line = format!("{} ({})", field.name, field.kind);
        if field.required {
            line.push_str(" required");
        }
        if !field.options.is_empty() {
            let values: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
            line.push_str(&format!(" [{}]", values.join(", ")));
        }
        if let Some(default) = &field.default_value {
            line.push_str(&format!(" default={default}"));
        }
        println!("{line}");
    }
    Ok(())
}
