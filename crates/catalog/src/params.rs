//! Request-parameter decoding for the catalog boundary.
//!
//! URL query strings are ambiguous about scalar versus repeated parameters,
//! so they are normalized exactly once, here at the edge, into the
//! list-of-strings [`RawParams`] form. The same goes for the write path:
//! submitted values are tagged into [`AttributeValue`] shapes according to
//! the declared field kinds before validation ever sees them.

use clementine_core::attributes::{AttributeMap, AttributeValue};
use clementine_core::query::RawParams;
use clementine_core::taxonomy::{FieldDefinition, FieldKind};

/// Decode a URL query string into canonical [`RawParams`].
///
/// Repeated keys accumulate in submission order; keys and values are
/// percent-decoded, and `+` decodes to a space. A leading `?` is tolerated
/// so full request targets can be passed as-is. A key without `=` decodes
/// to the empty-string value, matching form semantics.
#[must_use]
pub fn parse_query_str(query: &str) -> RawParams {
    let mut params = RawParams::new();
    let trimmed = query.trim_start_matches('?');
    for (key, value) in url::form_urlencoded::parse(trimmed.as_bytes()) {
        params.push(key, value);
    }
    params
}

/// Assemble the write-path attribute map for a category's fields.
///
/// Each declared field reads its own parameter values: `Text` and `Select`
/// fields take the first value as a scalar, `Multi` fields take every
/// value as a list. Fields with no submitted values stay out of the map so
/// required-ness is judged by the validator, and parameters no field
/// declares never reach it at all.
#[must_use]
pub fn attribute_map_from_params(raw: &RawParams, fields: &[FieldDefinition]) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    for field in fields {
        if let Some(value) = tag_values(field.kind, raw.all(&field.name)) {
            attributes.insert(field.name.clone(), value);
        }
    }
    attributes
}

/// Tag already-grouped values (field name to value list) the same way
/// [`attribute_map_from_params`] tags raw parameters.
///
/// Used where attribute data arrives pre-grouped rather than as a query
/// string, e.g. integrity checks over stored product records.
#[must_use]
pub fn tag_attribute_values(
    values: &std::collections::BTreeMap<String, Vec<String>>,
    fields: &[FieldDefinition],
) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    for field in fields {
        let Some(list) = values.get(&field.name) else {
            continue;
        };
        if let Some(value) = tag_values(field.kind, list) {
            attributes.insert(field.name.clone(), value);
        }
    }
    attributes
}

fn tag_values(kind: FieldKind, values: &[String]) -> Option<AttributeValue> {
    let first = values.first()?;
    Some(match kind {
        FieldKind::Text => AttributeValue::Text(first.clone()),
        FieldKind::Select => AttributeValue::Selection(first.clone()),
        FieldKind::Multi => AttributeValue::MultiSelection(values.to_vec()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clementine_core::taxonomy::FieldOption;

    #[test]
    fn test_parse_simple_pairs() {
        let params = parse_query_str("page=2&limit=20");
        assert_eq!(params.first("page"), Some("2"));
        assert_eq!(params.first("limit"), Some("20"));
    }

    #[test]
    fn test_parse_repeated_keys_in_order() {
        let params = parse_query_str("color=black&color=white&color=blue");
        assert_eq!(params.all("color"), ["black", "white", "blue"]);
    }

    #[test]
    fn test_parse_percent_and_plus_decoding() {
        let params = parse_query_str("search=wireless+charger&brand=B%26O");
        assert_eq!(params.first("search"), Some("wireless charger"));
        assert_eq!(params.first("brand"), Some("B&O"));
    }

    #[test]
    fn test_parse_leading_question_mark() {
        let params = parse_query_str("?page=3");
        assert_eq!(params.first("page"), Some("3"));
    }

    #[test]
    fn test_parse_key_without_value() {
        // "priceMin" with no '=' still counts as present, which is what
        // opts a query into price filtering.
        let params = parse_query_str("priceMin&search=");
        assert!(params.contains("priceMin"));
        assert_eq!(params.first("priceMin"), Some(""));
        assert_eq!(params.first("search"), Some(""));
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(parse_query_str("").is_empty());
        assert!(parse_query_str("?").is_empty());
    }

    fn phone_fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::select(
                "storage",
                "Storage",
                vec![FieldOption::new("64 GB", "64GB")],
            ),
            FieldDefinition::multi("color", "Color", vec![FieldOption::new("Black", "black")]),
            FieldDefinition::text("engraving", "Engraving"),
        ]
    }

    #[test]
    fn test_attribute_map_tags_by_kind() {
        let raw = parse_query_str("storage=64GB&color=black&color=white&engraving=hi");
        let map = attribute_map_from_params(&raw, &phone_fields());

        assert_eq!(
            map.get("storage").unwrap(),
            &AttributeValue::Selection("64GB".to_string()),
        );
        assert_eq!(
            map.get("color").unwrap(),
            &AttributeValue::MultiSelection(vec!["black".to_string(), "white".to_string()]),
        );
        assert_eq!(
            map.get("engraving").unwrap(),
            &AttributeValue::Text("hi".to_string()),
        );
    }

    #[test]
    fn test_attribute_map_scalar_takes_first_value() {
        let raw = parse_query_str("storage=64GB&storage=128GB");
        let map = attribute_map_from_params(&raw, &phone_fields());
        assert_eq!(
            map.get("storage").unwrap(),
            &AttributeValue::Selection("64GB".to_string()),
        );
    }

    #[test]
    fn test_attribute_map_skips_unsubmitted_and_undeclared() {
        let raw = parse_query_str("bogus=1&page=2");
        let map = attribute_map_from_params(&raw, &phone_fields());
        assert!(map.is_empty());
    }

    #[test]
    fn test_tag_attribute_values_matches_param_tagging() {
        let mut grouped = std::collections::BTreeMap::new();
        grouped.insert("color".to_string(), vec!["black".to_string()]);
        grouped.insert("stray".to_string(), vec!["x".to_string()]);

        let map = tag_attribute_values(&grouped, &phone_fields());
        assert_eq!(
            map.get("color").unwrap(),
            &AttributeValue::MultiSelection(vec!["black".to_string()]),
        );
        assert!(!map.contains_key("stray"));
    }
}
