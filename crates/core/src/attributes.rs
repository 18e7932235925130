//! Attribute validation against a category's field definitions.
//!
//! The write path submits product attributes as a map of field name to
//! value; [`validate_attributes`] checks that map against the declared
//! fields and returns human-readable problems, one per offending field, in
//! field-definition order. An empty list means the submission is valid.
//!
//! A second, stricter rule applies to product variants only:
//! [`variant_attributes_valid`] requires `size` and `color` keys and
//! non-empty values throughout, independent of any category's fields.

use std::collections::BTreeMap;

use crate::taxonomy::{FieldDefinition, FieldKind};

/// A submitted attribute value, tagged by shape.
///
/// The boundary decides the tag from the declared field kind when it
/// assembles the map; validation then only has to match shape against kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Free-form text.
    Text(String),
    /// A single selected option value.
    Selection(String),
    /// Several selected option values.
    MultiSelection(Vec<String>),
}

impl AttributeValue {
    /// The scalar payload, if this value is not a list.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Text(value) | Self::Selection(value) => Some(value),
            Self::MultiSelection(_) => None,
        }
    }

    /// The list payload, if this value is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) | Self::Selection(_) => None,
            Self::MultiSelection(values) => Some(values),
        }
    }
}

/// Submitted attributes keyed by field name.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Validate submitted attributes against a category's field definitions.
///
/// Every field is evaluated; validation never stops at the first failure.
/// Messages come back in field-definition order, at most one per field:
///
/// - a required field that is absent, blank, or an empty list reports
///   "`<label>` is required."
/// - an optional field that is absent or submitted as the empty string is
///   skipped entirely
/// - otherwise the value's shape and content are checked against the
///   field's kind and declared options
///
/// Keys in `attributes` that no field declares are ignored here; catalog
/// integrity checks flag those separately.
#[must_use]
pub fn validate_attributes(attributes: &AttributeMap, fields: &[FieldDefinition]) -> Vec<String> {
    let mut problems = Vec::new();

    for field in fields {
        let value = attributes.get(&field.name);

        if field.required && is_missing(value) {
            problems.push(format!("{} is required.", field.label));
            continue;
        }

        let Some(value) = value else { continue };
        // An optional field submitted as the empty string counts as
        // deliberately left blank. Whitespace-only values do not; they fall
        // through to the kind checks below.
        if value.as_scalar().is_some_and(str::is_empty) {
            continue;
        }

        match field.kind {
            FieldKind::Select => {
                let valid = value
                    .as_scalar()
                    .is_some_and(|scalar| field.has_option_value(scalar));
                if !valid {
                    problems.push(format!("Invalid selection for {}.", field.label));
                }
            }
            FieldKind::Multi => match value.as_list() {
                None => {
                    problems.push(format!("{} must be an array of selections.", field.label));
                }
                Some(values) => {
                    if values.iter().any(|value| !field.has_option_value(value)) {
                        problems.push(format!("Invalid selection(s) for {}.", field.label));
                    }
                }
            },
            FieldKind::Text => {
                if value.as_scalar().is_none() {
                    problems.push(format!("{} must be a text value.", field.label));
                }
            }
        }
    }

    problems
}

fn is_missing(value: Option<&AttributeValue>) -> bool {
    match value {
        None => true,
        Some(AttributeValue::Text(value) | AttributeValue::Selection(value)) => {
            value.trim().is_empty()
        }
        Some(AttributeValue::MultiSelection(values)) => values.is_empty(),
    }
}

/// Keys every product variant must carry.
const REQUIRED_VARIANT_KEYS: [&str; 2] = ["size", "color"];

/// Check the stricter attribute rule for product variants.
///
/// A variant's attribute map is valid when it contains at least the `size`
/// and `color` keys, and every value under every key is either a non-empty
/// scalar or a non-empty list whose elements are all non-blank after
/// trimming. Scalars are deliberately not trimmed; only list elements are.
///
/// This rule is independent of category field definitions and reports a
/// plain verdict rather than messages.
#[must_use]
pub fn variant_attributes_valid(attributes: &AttributeMap) -> bool {
    if !REQUIRED_VARIANT_KEYS
        .iter()
        .all(|key| attributes.contains_key(*key))
    {
        return false;
    }

    attributes.values().all(|value| match value {
        AttributeValue::Text(scalar) | AttributeValue::Selection(scalar) => !scalar.is_empty(),
        AttributeValue::MultiSelection(values) => {
            !values.is_empty() && values.iter().all(|value| !value.trim().is_empty())
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::taxonomy::FieldOption;

    fn storage_field() -> FieldDefinition {
        FieldDefinition::select(
            "storage",
            "Storage",
            vec![
                FieldOption::new("64 GB", "64GB"),
                FieldOption::new("128 GB", "128GB"),
                FieldOption::new("256 GB", "256GB"),
            ],
        )
    }

    fn color_field() -> FieldDefinition {
        FieldDefinition::multi(
            "color",
            "Color",
            vec![
                FieldOption::new("Black", "black"),
                FieldOption::new("White", "white"),
                FieldOption::new("Blue", "blue"),
            ],
        )
    }

    fn engraving_field() -> FieldDefinition {
        FieldDefinition::text("engraving", "Engraving")
    }

    fn attrs(entries: &[(&str, AttributeValue)]) -> AttributeMap {
        entries
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_valid_submission_has_no_problems() {
        let fields = vec![storage_field().required(), color_field(), engraving_field()];
        let attributes = attrs(&[
            ("storage", AttributeValue::Selection("64GB".into())),
            (
                "color",
                AttributeValue::MultiSelection(vec!["black".into(), "blue".into()]),
            ),
            ("engraving", AttributeValue::Text("For Dana".into())),
        ]);
        assert!(validate_attributes(&attributes, &fields).is_empty());
    }

    #[test]
    fn test_required_field_absent() {
        let fields = vec![storage_field().required()];
        assert_eq!(
            validate_attributes(&AttributeMap::new(), &fields),
            vec!["Storage is required."],
        );
    }

    #[test]
    fn test_required_field_whitespace_scalar() {
        let fields = vec![engraving_field().required()];
        let attributes = attrs(&[("engraving", AttributeValue::Text("   ".into()))]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec!["Engraving is required."],
        );
    }

    #[test]
    fn test_required_field_empty_list() {
        let fields = vec![color_field().required()];
        let attributes = attrs(&[("color", AttributeValue::MultiSelection(Vec::new()))]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec!["Color is required."],
        );
    }

    #[test]
    fn test_optional_field_absent_is_skipped() {
        let fields = vec![storage_field(), color_field()];
        assert!(validate_attributes(&AttributeMap::new(), &fields).is_empty());
    }

    #[test]
    fn test_optional_empty_string_is_skipped() {
        // An empty string never reaches the option check, even though "" is
        // not a declared option value.
        let fields = vec![storage_field()];
        let attributes = attrs(&[("storage", AttributeValue::Selection(String::new()))]);
        assert!(validate_attributes(&attributes, &fields).is_empty());
    }

    #[test]
    fn test_optional_whitespace_scalar_is_checked() {
        // Whitespace is not the empty string, so it falls through to the
        // membership check and fails it.
        let fields = vec![storage_field()];
        let attributes = attrs(&[("storage", AttributeValue::Selection("  ".into()))]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec!["Invalid selection for Storage."],
        );
    }

    #[test]
    fn test_select_rejects_unknown_value() {
        let fields = vec![storage_field()];
        let attributes = attrs(&[("storage", AttributeValue::Selection("512GB".into()))]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec!["Invalid selection for Storage."],
        );
    }

    #[test]
    fn test_select_rejects_list_value() {
        let fields = vec![storage_field()];
        let attributes = attrs(&[(
            "storage",
            AttributeValue::MultiSelection(vec!["64GB".into()]),
        )]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec!["Invalid selection for Storage."],
        );
    }

    #[test]
    fn test_multi_rejects_scalar_value() {
        let fields = vec![color_field()];
        let attributes = attrs(&[("color", AttributeValue::Selection("black".into()))]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec!["Color must be an array of selections."],
        );
    }

    #[test]
    fn test_multi_aggregates_bad_elements_into_one_problem() {
        let fields = vec![color_field()];
        let attributes = attrs(&[(
            "color",
            AttributeValue::MultiSelection(vec!["black".into(), "neon".into(), "plaid".into()]),
        )]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec!["Invalid selection(s) for Color."],
        );
    }

    #[test]
    fn test_text_rejects_list_value() {
        let fields = vec![engraving_field()];
        let attributes = attrs(&[(
            "engraving",
            AttributeValue::MultiSelection(vec!["hi".into()]),
        )]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec!["Engraving must be a text value."],
        );
    }

    #[test]
    fn test_text_accepts_any_scalar_shape() {
        // The boundary tags text fields as Text, but a Selection scalar is
        // still a text value as far as the rule is concerned.
        let fields = vec![engraving_field()];
        let attributes = attrs(&[("engraving", AttributeValue::Selection("hello".into()))]);
        assert!(validate_attributes(&attributes, &fields).is_empty());
    }

    #[test]
    fn test_problems_follow_field_order() {
        let fields = vec![
            storage_field().required(),
            color_field(),
            engraving_field().required(),
        ];
        let attributes = attrs(&[(
            "color",
            AttributeValue::MultiSelection(vec!["magenta".into()]),
        )]);
        assert_eq!(
            validate_attributes(&attributes, &fields),
            vec![
                "Storage is required.",
                "Invalid selection(s) for Color.",
                "Engraving is required.",
            ],
        );
    }

    #[test]
    fn test_undeclared_keys_are_ignored() {
        let fields = vec![storage_field()];
        let attributes = attrs(&[("bogus", AttributeValue::Text("whatever".into()))]);
        assert!(validate_attributes(&attributes, &fields).is_empty());
    }

    #[test]
    fn test_variant_valid_map() {
        let attributes = attrs(&[
            ("size", AttributeValue::Selection("M".into())),
            (
                "color",
                AttributeValue::MultiSelection(vec!["black".into()]),
            ),
        ]);
        assert!(variant_attributes_valid(&attributes));
    }

    #[test]
    fn test_variant_missing_required_key() {
        let attributes = attrs(&[("size", AttributeValue::Selection("M".into()))]);
        assert!(!variant_attributes_valid(&attributes));
    }

    #[test]
    fn test_variant_empty_scalar() {
        let attributes = attrs(&[
            ("size", AttributeValue::Selection(String::new())),
            ("color", AttributeValue::Selection("black".into())),
        ]);
        assert!(!variant_attributes_valid(&attributes));
    }

    #[test]
    fn test_variant_scalar_is_not_trimmed() {
        // Scalars only fail when empty; a whitespace scalar passes. List
        // elements are the ones checked after trimming.
        let attributes = attrs(&[
            ("size", AttributeValue::Selection(" ".into())),
            ("color", AttributeValue::Selection("black".into())),
        ]);
        assert!(variant_attributes_valid(&attributes));
    }

    #[test]
    fn test_variant_blank_list_element() {
        let attributes = attrs(&[
            ("size", AttributeValue::Selection("M".into())),
            (
                "color",
                AttributeValue::MultiSelection(vec!["black".into(), "  ".into()]),
            ),
        ]);
        assert!(!variant_attributes_valid(&attributes));
    }

    #[test]
    fn test_variant_empty_list() {
        let attributes = attrs(&[
            ("size", AttributeValue::Selection("M".into())),
            ("color", AttributeValue::MultiSelection(Vec::new())),
        ]);
        assert!(!variant_attributes_valid(&attributes));
    }

    #[test]
    fn test_variant_extra_keys_are_checked_too() {
        let attributes = attrs(&[
            ("size", AttributeValue::Selection("M".into())),
            ("color", AttributeValue::Selection("black".into())),
            ("material", AttributeValue::Text(String::new())),
        ]);
        assert!(!variant_attributes_valid(&attributes));
    }
}
