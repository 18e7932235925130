//! Catalog integrity checks.
//!
//! The taxonomy and product data are static configuration, so the
//! invariants the rest of the system leans on are verified here rather
//! than enforced by construction: globally unique category ids, sibling
//! names unique case-insensitively, options declared on select and multi
//! fields, unique field names and option values, and denormalized parent
//! ids that agree with the actual nesting. Product records are checked
//! against their category on top, with the same write-path validation a
//! live submission would get.
//!
//! Every check returns a flat list of human-readable problems; an empty
//! list means the catalog is sound. `clementine check` prints the list
//! and fails the process when it is non-empty.

use std::collections::HashSet;

use clementine_core::attributes::validate_attributes;
use clementine_core::taxonomy::{Category, CategoryTree, FieldDefinition, FieldKind};
use clementine_core::types::CategoryId;

use crate::listing::ProductRecord;
use crate::params::tag_attribute_values;

/// Check taxonomy invariants over the whole tree.
#[must_use]
pub fn check_tree(tree: &CategoryTree) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen_ids = HashSet::new();
    check_level(tree.roots(), None, &mut seen_ids, &mut problems);
    problems
}

fn check_level(
    categories: &[Category],
    parent: Option<CategoryId>,
    seen_ids: &mut HashSet<CategoryId>,
    problems: &mut Vec<String>,
) {
    let mut sibling_names = HashSet::new();

    for category in categories {
        // Check the id is globally unique
        if !seen_ids.insert(category.id) {
            problems.push(format!(
                "Duplicate category id {} ({})",
                category.id, category.name
            ));
        }

        // Check sibling names are unique case-insensitively
        if !sibling_names.insert(category.name.to_lowercase()) {
            problems.push(format!(
                "Duplicate sibling name '{}' under {}",
                category.name,
                describe_parent(parent)
            ));
        }

        // Check the denormalized parent id agrees with the nesting
        if category.parent_id != parent {
            let declared = category
                .parent_id
                .map_or_else(|| "no parent".to_string(), |id| format!("parent {id}"));
            problems.push(format!(
                "Category {} ({}) declares {} but sits under {}",
                category.id,
                category.name,
                declared,
                describe_parent(parent)
            ));
        }

        check_fields(category, problems);
        check_level(
            &category.subcategories,
            Some(category.id),
            seen_ids,
            problems,
        );
    }
}

fn describe_parent(parent: Option<CategoryId>) -> String {
    parent.map_or_else(|| "the root".to_string(), |id| format!("parent {id}"))
}

fn check_fields(category: &Category, problems: &mut Vec<String>) {
    let mut names = HashSet::new();
    for field in &category.fields {
        if !names.insert(field.name.as_str()) {
            problems.push(format!(
                "Duplicate field name '{}' in category {} ({})",
                field.name, category.id, category.name
            ));
        }
        check_field(category, field, problems);
    }
}

fn check_field(category: &Category, field: &FieldDefinition, problems: &mut Vec<String>) {
    if matches!(field.kind, FieldKind::Select | FieldKind::Multi) {
        if field.options.is_empty() {
            problems.push(format!(
                "No options declared for {} field '{}' in category {} ({})",
                field.kind, field.name, category.id, category.name
            ));
        }

        if let Some(default) = &field.default_value {
            if !field.has_option_value(default) {
                problems.push(format!(
                    "Default '{}' is not a declared option of field '{}' in category {} ({})",
                    default, field.name, category.id, category.name
                ));
            }
        }
    }

    let mut values = HashSet::new();
    for option in &field.options {
        if !values.insert(option.value.as_str()) {
            problems.push(format!(
                "Duplicate option value '{}' on field '{}' in category {} ({})",
                option.value, field.name, category.id, category.name
            ));
        }
    }
}

/// Check product records against the taxonomy.
///
/// Each record's category must resolve, every attribute key must be
/// declared by that category, and the stored values must pass the same
/// validation a write-path submission would.
#[must_use]
pub fn check_products(tree: &CategoryTree, products: &[ProductRecord]) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen_ids = HashSet::new();

    for record in products {
        if !seen_ids.insert(record.id) {
            problems.push(format!(
                "Duplicate product id {} ({})",
                record.id, record.title
            ));
        }

        let Some(category) = tree.find_by_id(record.category) else {
            problems.push(format!(
                "Unknown category {} for product {} ({})",
                record.category, record.id, record.title
            ));
            continue;
        };

        // Check every attribute key is declared by the category
        for key in record.attributes.keys() {
            if category.field(key).is_none() {
                problems.push(format!(
                    "Undeclared attribute '{}' on product {} ({}) in category {}",
                    key, record.id, record.title, category.name
                ));
            }
        }

        // Run the write-path validation over the stored values
        let attributes = tag_attribute_values(&record.attributes, &category.fields);
        for message in validate_attributes(&attributes, &category.fields) {
            problems.push(format!("Product {} ({}): {message}", record.id, record.title));
        }
    }

    problems
}

/// Check the whole catalog: taxonomy invariants first, then every product.
#[must_use]
pub fn check_catalog(tree: &CategoryTree, products: &[ProductRecord]) -> Vec<String> {
    let mut problems = check_tree(tree);
    problems.extend(check_products(tree, products));
    problems
}
