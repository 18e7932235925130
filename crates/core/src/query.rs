//! Product query assembly from raw request parameters.
//!
//! [`build_query`] turns an untrusted parameter multimap plus a category
//! name into a [`ProductQuery`] the listing engine can run as-is. Numeric
//! parameters degrade gracefully instead of failing the request: absent or
//! unparseable values fall back to defaults and `limit` is clamped into
//! range. The only hard failure is a category name that does not resolve.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::taxonomy::CategoryTree;
use crate::types::CategoryId;

/// First page, used when `page` is absent or malformed.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when `limit` is absent or malformed.
pub const DEFAULT_LIMIT: u32 = 10;
/// Smallest accepted page size; lower values are clamped up.
pub const MIN_LIMIT: u32 = 1;
/// Largest accepted page size; higher values are clamped down.
pub const MAX_LIMIT: u32 = 100;
/// Lower price bound used when `priceMin` is present but unparseable.
pub const DEFAULT_PRICE_MIN: Decimal = Decimal::ZERO;
/// Upper price bound used when `priceMax` is present but unparseable.
pub const DEFAULT_PRICE_MAX: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Raw request parameters in canonical form.
///
/// Every key maps to the full list of values submitted under it, so nothing
/// downstream ever branches on scalar-versus-repeated shape. The boundary
/// that decodes the transport (query string, form body) is responsible for
/// producing this; see `clementine-catalog`'s params module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams(BTreeMap<String, Vec<String>>);

impl RawParams {
    /// An empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Append a value under `key`, preserving submission order per key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// The first value submitted under `key`, if any.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value submitted under `key`, in submission order.
    #[must_use]
    pub fn all(&self, key: &str) -> &[String] {
        self.0.get(key).map_or(&[], |values| values.as_slice())
    }

    /// Whether `key` was submitted at all, even with an empty value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters were submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Inclusive price bounds for a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    /// Inclusive lower bound.
    pub min: Decimal,
    /// Inclusive upper bound.
    pub max: Decimal,
}

/// The normalized, bounded set of parameters used to list products.
///
/// Built fresh for every request by [`build_query`]. Construction
/// guarantees that `page` is at least 1, `limit` sits within
/// [`MIN_LIMIT`]..=[`MAX_LIMIT`], and `attributes` only carries keys the
/// resolved category actually declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Free-text search term, when supplied non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Requested sort key, passed through for the listing engine to
    /// interpret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// The resolved category.
    pub category: CategoryId,
    /// Filter values keyed by declared field name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Vec<String>>,
    /// Price bounds, present only when the request supplied at least one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceRange>,
}

/// Failure to assemble a [`ProductQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The requested category name resolved to nothing. Callers should
    /// surface a not-found state instead of running a listing.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Assemble a [`ProductQuery`] from raw parameters and a category name.
///
/// Scalar parameters read their first submitted value; attribute filters
/// read every value under the declared field's name. Parameters that no
/// field of the resolved category declares never reach the query.
///
/// # Errors
///
/// Returns [`QueryError::UnknownCategory`] when `category_name` does not
/// resolve in `tree` (case-insensitively).
pub fn build_query(
    tree: &CategoryTree,
    raw: &RawParams,
    category_name: &str,
) -> Result<ProductQuery, QueryError> {
    let category = tree
        .find_by_name(category_name)
        .ok_or_else(|| QueryError::UnknownCategory(category_name.to_string()))?;

    let mut attributes = BTreeMap::new();
    for field in &category.fields {
        let values = raw.all(&field.name);
        if !values.is_empty() {
            attributes.insert(field.name.clone(), values.to_vec());
        }
    }

    Ok(ProductQuery {
        page: parse_page(raw),
        limit: parse_limit(raw),
        search: non_empty(raw.first("search")),
        sort: non_empty(raw.first("sort")),
        category: category.id,
        attributes,
        price: parse_price(raw),
    })
}

fn parse_page(raw: &RawParams) -> u32 {
    raw.first("page")
        .and_then(|value| value.trim().parse::<i64>().ok())
        .map_or(DEFAULT_PAGE, |page| {
            clamp_to_u32(page, DEFAULT_PAGE, u32::MAX)
        })
}

fn parse_limit(raw: &RawParams) -> u32 {
    raw.first("limit")
        .and_then(|value| value.trim().parse::<i64>().ok())
        .map_or(DEFAULT_LIMIT, |limit| clamp_to_u32(limit, MIN_LIMIT, MAX_LIMIT))
}

fn clamp_to_u32(value: i64, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(i64::from(min), i64::from(max));
    u32::try_from(clamped).unwrap_or(min)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_string)
}

fn parse_price(raw: &RawParams) -> Option<PriceRange> {
    if !raw.contains("priceMin") && !raw.contains("priceMax") {
        return None;
    }
    // Presence of either parameter opts the query into price filtering;
    // each bound then parses independently or takes its default.
    Some(PriceRange {
        min: parse_bound(raw.first("priceMin")).unwrap_or(DEFAULT_PRICE_MIN),
        max: parse_bound(raw.first("priceMax")).unwrap_or(DEFAULT_PRICE_MAX),
    })
}

fn parse_bound(value: Option<&str>) -> Option<Decimal> {
    value.and_then(|value| value.trim().parse::<Decimal>().ok())
}
