//! The in-memory product listing engine.
//!
//! [`ProductListing`] owns a fixed set of [`ProductRecord`]s and runs
//! [`ProductQuery`]s against them: filter, sort, paginate. Every filter in
//! the query must hold for a record to match (AND across filters); within
//! one attribute field, any requested value suffices (OR within a field).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use clementine_core::query::{MIN_LIMIT, ProductQuery};
use clementine_core::types::{CategoryId, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

/// A product as the listing engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// Unique product id.
    pub id: ProductId,
    /// Display title, searched case-insensitively.
    pub title: String,
    /// Longer copy, also searched.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// The category this product lives in.
    pub category: CategoryId,
    /// Attribute values keyed by the category's declared field names.
    pub attributes: BTreeMap<String, Vec<String>>,
    /// Whether the product is currently in stock.
    pub available: bool,
    /// When the product was added to the store.
    pub created_at: DateTime<Utc>,
}

/// Sort order for listings.
///
/// Parsed from the query's `sort` value; unknown values fall back to
/// [`ListingSort::Newest`] rather than failing the request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListingSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    TitleAsc,
}

impl ListingSort {
    /// Parse from a URL parameter value.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("price-ascending" | "price_asc") => Self::PriceAsc,
            Some("price-descending" | "price_desc") => Self::PriceDesc,
            Some("title-ascending" | "title_asc") => Self::TitleAsc,
            _ => Self::Newest,
        }
    }

    /// Convert to a URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price-ascending",
            Self::PriceDesc => "price-descending",
            Self::TitleAsc => "title-ascending",
        }
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    /// The records on this page, in sort order.
    pub products: Vec<ProductRecord>,
    /// The requested 1-based page number.
    pub page: u32,
    /// Total pages for the current filters; 0 when nothing matches.
    pub total_pages: u32,
    /// Matching products across all pages.
    pub total_count: usize,
    /// Matching products currently available.
    pub in_stock_count: usize,
}

impl ListingPage {
    /// Whether pages beyond this one exist.
    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.page < self.total_pages
    }
}

/// In-memory listing service over a fixed set of product records.
#[derive(Debug, Clone, Default)]
pub struct ProductListing {
    products: Vec<ProductRecord>,
}

impl ProductListing {
    /// Build a listing over the given records.
    #[must_use]
    pub const fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    /// Number of records behind the listing, across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the listing holds no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Run a query: filter, sort, paginate.
    ///
    /// Counts (`total_count`, `in_stock_count`, `total_pages`) always
    /// describe the full match set, so a `page` past the end comes back
    /// with empty `products` but intact totals.
    #[instrument(skip(self))]
    #[must_use]
    pub fn list(&self, query: &ProductQuery) -> ListingPage {
        let mut matches: Vec<&ProductRecord> = self
            .products
            .iter()
            .filter(|product| Self::matches(product, query))
            .collect();

        let total_count = matches.len();
        let in_stock_count = matches.iter().filter(|product| product.available).count();
        tracing::debug!(total_count, in_stock_count, "listing query matched");

        sort_records(&mut matches, ListingSort::parse(query.sort.as_deref()));

        let limit = usize::try_from(query.limit.max(MIN_LIMIT)).unwrap_or(usize::MAX);
        let offset = usize::try_from(query.page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(limit);
        let products: Vec<ProductRecord> = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        ListingPage {
            products,
            page: query.page,
            total_pages: u32::try_from(total_count.div_ceil(limit)).unwrap_or(u32::MAX),
            total_count,
            in_stock_count,
        }
    }

    fn matches(product: &ProductRecord, query: &ProductQuery) -> bool {
        if product.category != query.category {
            return false;
        }

        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            let in_title = product.title.to_lowercase().contains(&needle);
            let in_description = product.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }

        if let Some(price) = &query.price {
            if product.price < price.min || product.price > price.max {
                return false;
            }
        }

        for (field, wanted) in &query.attributes {
            let Some(values) = product.attributes.get(field) else {
                return false;
            };
            if !wanted.iter().any(|wanted| values.contains(wanted)) {
                return false;
            }
        }

        true
    }
}

fn sort_records(records: &mut [&ProductRecord], sort: ListingSort) {
    match sort {
        ListingSort::Newest => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ListingSort::PriceAsc => records.sort_by(|a, b| a.price.cmp(&b.price)),
        ListingSort::PriceDesc => records.sort_by(|a, b| b.price.cmp(&a.price)),
        ListingSort::TitleAsc => records.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clementine_core::query::PriceRange;

    fn record(
        id: i32,
        title: &str,
        price_cents: i64,
        available: bool,
        day: u32,
    ) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            title: title.to_string(),
            description: format!("{title} for the demo store"),
            price: Decimal::new(price_cents, 2),
            category: CategoryId::new(2),
            attributes: BTreeMap::new(),
            available,
            created_at: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
        }
    }

    fn with_attrs(mut record: ProductRecord, entries: &[(&str, &[&str])]) -> ProductRecord {
        record.attributes = entries
            .iter()
            .map(|(name, values)| {
                (
                    (*name).to_string(),
                    values.iter().map(ToString::to_string).collect(),
                )
            })
            .collect();
        record
    }

    fn phones_query() -> ProductQuery {
        ProductQuery {
            page: 1,
            limit: 10,
            search: None,
            sort: None,
            category: CategoryId::new(2),
            attributes: BTreeMap::new(),
            price: None,
        }
    }

    fn sample_listing() -> ProductListing {
        let mut other = record(9, "Garden Hose", 1999, true, 1);
        other.category = CategoryId::new(7);

        ProductListing::new(vec![
            with_attrs(
                record(1, "Aster Phone 64", 39_900, true, 3),
                &[("storage", &["64GB"]), ("color", &["black"])],
            ),
            with_attrs(
                record(2, "Aster Phone 128", 44_900, false, 5),
                &[("storage", &["128GB"]), ("color", &["white"])],
            ),
            with_attrs(
                record(3, "Borealis Phone", 59_900, true, 9),
                &[("storage", &["256GB"]), ("color", &["black", "blue"])],
            ),
            other,
        ])
    }

    #[test]
    fn test_category_scopes_the_listing() {
        let page = sample_listing().list(&phones_query());
        assert_eq!(page.total_count, 3);
        assert!(page.products.iter().all(|p| p.category == CategoryId::new(2)));
    }

    #[test]
    fn test_newest_first_is_the_default_sort() {
        let page = sample_listing().list(&phones_query());
        let ids: Vec<i32> = page.products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_price_sorts() {
        let mut query = phones_query();
        query.sort = Some("price-ascending".to_string());
        let ids: Vec<i32> = sample_listing()
            .list(&query)
            .products
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        query.sort = Some("price-descending".to_string());
        let ids: Vec<i32> = sample_listing()
            .list(&query)
            .products
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_newest() {
        let mut query = phones_query();
        query.sort = Some("bestselling".to_string());
        let ids: Vec<i32> = sample_listing()
            .list(&query)
            .products
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_search_matches_title_and_description() {
        let mut query = phones_query();
        query.search = Some("ASTER".to_string());
        let page = sample_listing().list(&query);
        assert_eq!(page.total_count, 2);

        // "demo store" only appears in descriptions.
        query.search = Some("demo store".to_string());
        let page = sample_listing().list(&query);
        assert_eq!(page.total_count, 3);

        query.search = Some("zeppelin".to_string());
        assert_eq!(sample_listing().list(&query).total_count, 0);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let mut query = phones_query();
        query.price = Some(PriceRange {
            min: Decimal::new(39_900, 2),
            max: Decimal::new(44_900, 2),
        });
        let page = sample_listing().list(&query);
        let ids: Vec<i32> = page.products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_attribute_filter_any_within_field() {
        let mut query = phones_query();
        query.attributes.insert(
            "storage".to_string(),
            vec!["64GB".to_string(), "256GB".to_string()],
        );
        let page = sample_listing().list(&query);
        let ids: Vec<i32> = page.products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_attribute_filters_and_across_fields() {
        let mut query = phones_query();
        query
            .attributes
            .insert("storage".to_string(), vec!["256GB".to_string()]);
        query
            .attributes
            .insert("color".to_string(), vec!["blue".to_string()]);
        let page = sample_listing().list(&query);
        assert_eq!(page.total_count, 1);
        assert_eq!(page.products.first().unwrap().id, ProductId::new(3));
    }

    #[test]
    fn test_attribute_filter_on_missing_field_excludes() {
        let mut query = phones_query();
        query
            .attributes
            .insert("connectivity".to_string(), vec!["wireless".to_string()]);
        assert_eq!(sample_listing().list(&query).total_count, 0);
    }

    #[test]
    fn test_pagination_and_counts() {
        let mut query = phones_query();
        query.limit = 2;

        let first = sample_listing().list(&query);
        assert_eq!(first.products.len(), 2);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_count, 3);
        assert_eq!(first.in_stock_count, 2);
        assert!(first.has_more_pages());

        query.page = 2;
        let second = sample_listing().list(&query);
        assert_eq!(second.products.len(), 1);
        assert!(!second.has_more_pages());
    }

    #[test]
    fn test_page_past_the_end_keeps_totals() {
        let mut query = phones_query();
        query.page = 40;
        let page = sample_listing().list(&query);
        assert!(page.products.is_empty());
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 40);
    }

    #[test]
    fn test_empty_match_set_has_zero_pages() {
        let mut query = phones_query();
        query.category = CategoryId::new(999);
        let page = sample_listing().list(&query);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.in_stock_count, 0);
        assert!(!page.has_more_pages());
    }

    #[test]
    fn test_sort_parse_round_trip() {
        for sort in [
            ListingSort::Newest,
            ListingSort::PriceAsc,
            ListingSort::PriceDesc,
            ListingSort::TitleAsc,
        ] {
            assert_eq!(ListingSort::parse(Some(sort.as_str())), sort);
        }
        assert_eq!(ListingSort::parse(None), ListingSort::Newest);
        assert_eq!(ListingSort::parse(Some("price_asc")), ListingSort::PriceAsc);
    }

    #[test]
    fn test_page_serializes_for_cli_output() {
        let page = sample_listing().list(&phones_query());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json.get("total_count").unwrap(), 3);
        assert!(json.get("products").unwrap().is_array());
    }
}
