//! The Clementine demo store: taxonomy and product records.
//!
//! Both are static configuration, built once on first access and immutable
//! afterwards. The taxonomy declares which filter fields exist per
//! category; the product records carry attribute values keyed by those
//! field names. `clementine check` and the integrity tests keep the two
//! sides consistent.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use clementine_core::taxonomy::{Category, CategoryTree, FieldDefinition, FieldOption};
use clementine_core::types::{CategoryId, ProductId};
use rust_decimal::Decimal;

use crate::listing::{ProductListing, ProductRecord};

static TREE: LazyLock<CategoryTree> = LazyLock::new(build_tree);
static PRODUCTS: LazyLock<Vec<ProductRecord>> = LazyLock::new(build_products);
static LISTING: LazyLock<ProductListing> = LazyLock::new(|| ProductListing::new(PRODUCTS.clone()));

/// The store's category taxonomy.
#[must_use]
pub fn tree() -> &'static CategoryTree {
    &TREE
}

/// The store's product records.
#[must_use]
pub fn products() -> &'static [ProductRecord] {
    &PRODUCTS
}

/// A listing engine over the store's products.
#[must_use]
pub fn listing() -> &'static ProductListing {
    &LISTING
}

fn node(
    id: i32,
    parent: Option<i32>,
    name: &str,
    href: &str,
    fields: Vec<FieldDefinition>,
    subcategories: Vec<Category>,
) -> Category {
    Category {
        id: CategoryId::new(id),
        parent_id: parent.map(CategoryId::new),
        name: name.to_string(),
        href: Some(href.to_string()),
        fields,
        subcategories,
    }
}

fn build_tree() -> CategoryTree {
    CategoryTree::new(vec![
        node(
            1,
            None,
            "Electronics",
            "/collections/electronics",
            Vec::new(),
            vec![
                node(
                    2,
                    Some(1),
                    "Phones",
                    "/collections/phones",
                    vec![
                        FieldDefinition::select(
                            "storage",
                            "Storage",
                            vec![
                                FieldOption::new("64 GB", "64GB"),
                                FieldOption::new("128 GB", "128GB"),
                                FieldOption::new("256 GB", "256GB"),
                            ],
                        )
                        .required()
                        .with_default("128GB"),
                        FieldDefinition::multi(
                            "color",
                            "Color",
                            vec![
                                FieldOption::new("Black", "black"),
                                FieldOption::new("White", "white"),
                                FieldOption::new("Blue", "blue"),
                            ],
                        ),
                        FieldDefinition::text("engraving", "Engraving")
                            .with_placeholder("Up to 20 characters")
                            .with_description("Engraved on the back of the device"),
                    ],
                    vec![node(
                        11,
                        Some(2),
                        "Accessories",
                        "/collections/phone-accessories",
                        vec![
                            FieldDefinition::select(
                                "kind",
                                "Kind",
                                vec![
                                    FieldOption::new("Case", "case"),
                                    FieldOption::new("Charger", "charger"),
                                    FieldOption::new("Cable", "cable"),
                                ],
                            )
                            .required(),
                            FieldDefinition::multi(
                                "color",
                                "Color",
                                vec![
                                    FieldOption::new("Black", "black"),
                                    FieldOption::new("White", "white"),
                                ],
                            ),
                        ],
                        Vec::new(),
                    )],
                ),
                node(
                    3,
                    Some(1),
                    "Laptops",
                    "/collections/laptops",
                    vec![
                        FieldDefinition::select(
                            "memory",
                            "Memory",
                            vec![
                                FieldOption::new("8 GB", "8GB"),
                                FieldOption::new("16 GB", "16GB"),
                                FieldOption::new("32 GB", "32GB"),
                            ],
                        )
                        .required(),
                        FieldDefinition::select(
                            "screen",
                            "Screen Size",
                            vec![
                                FieldOption::new("13-inch", "13in"),
                                FieldOption::new("15-inch", "15in"),
                                FieldOption::new("16-inch", "16in"),
                            ],
                        ),
                    ],
                    Vec::new(),
                ),
                node(
                    4,
                    Some(1),
                    "Audio",
                    "/collections/audio",
                    vec![
                        FieldDefinition::multi(
                            "connectivity",
                            "Connectivity",
                            vec![
                                FieldOption::new("Wired", "wired"),
                                FieldOption::new("Wireless", "wireless"),
                            ],
                        ),
                        FieldDefinition::multi(
                            "color",
                            "Color",
                            vec![
                                FieldOption::new("Black", "black"),
                                FieldOption::new("White", "white"),
                            ],
                        ),
                    ],
                    Vec::new(),
                ),
            ],
        ),
        node(
            5,
            None,
            "Apparel",
            "/collections/apparel",
            Vec::new(),
            vec![
                node(
                    6,
                    Some(5),
                    "Tops",
                    "/collections/tops",
                    vec![
                        FieldDefinition::select(
                            "size",
                            "Size",
                            vec![
                                FieldOption::new("XS", "XS"),
                                FieldOption::new("S", "S"),
                                FieldOption::new("M", "M"),
                                FieldOption::new("L", "L"),
                                FieldOption::new("XL", "XL"),
                            ],
                        )
                        .required(),
                        FieldDefinition::multi(
                            "color",
                            "Color",
                            vec![
                                FieldOption::new("White", "white"),
                                FieldOption::new("Navy", "navy"),
                                FieldOption::new("Olive", "olive"),
                            ],
                        ),
                        FieldDefinition::text("material", "Material")
                            .with_description("Shown on the listing page"),
                    ],
                    Vec::new(),
                ),
                node(
                    7,
                    Some(5),
                    "Bottoms",
                    "/collections/bottoms",
                    vec![
                        FieldDefinition::select(
                            "size",
                            "Size",
                            vec![
                                FieldOption::new("28", "28"),
                                FieldOption::new("30", "30"),
                                FieldOption::new("32", "32"),
                                FieldOption::new("34", "34"),
                            ],
                        )
                        .required(),
                        FieldDefinition::multi(
                            "color",
                            "Color",
                            vec![
                                FieldOption::new("Stone", "stone"),
                                FieldOption::new("Navy", "navy"),
                                FieldOption::new("Black", "black"),
                            ],
                        ),
                    ],
                    Vec::new(),
                ),
            ],
        ),
        node(
            8,
            None,
            "Courses",
            "/collections/courses",
            Vec::new(),
            vec![
                node(
                    9,
                    Some(8),
                    "Programming",
                    "/collections/programming-courses",
                    vec![
                        FieldDefinition::select(
                            "level",
                            "Level",
                            vec![
                                FieldOption::new("Beginner", "beginner"),
                                FieldOption::new("Intermediate", "intermediate"),
                                FieldOption::new("Advanced", "advanced"),
                            ],
                        )
                        .with_default("beginner"),
                        FieldDefinition::multi(
                            "topic",
                            "Topic",
                            vec![
                                FieldOption::new("Rust", "rust"),
                                FieldOption::new("Web", "web"),
                                FieldOption::new("Data", "data"),
                            ],
                        ),
                        FieldDefinition::select(
                            "format",
                            "Format",
                            vec![
                                FieldOption::new("Self-paced", "self-paced"),
                                FieldOption::new("Cohort", "cohort"),
                            ],
                        )
                        .required(),
                    ],
                    Vec::new(),
                ),
                node(
                    10,
                    Some(8),
                    "Design",
                    "/collections/design-courses",
                    vec![
                        FieldDefinition::select(
                            "level",
                            "Level",
                            vec![
                                FieldOption::new("Beginner", "beginner"),
                                FieldOption::new("Advanced", "advanced"),
                            ],
                        ),
                        FieldDefinition::select(
                            "format",
                            "Format",
                            vec![
                                FieldOption::new("Self-paced", "self-paced"),
                                FieldOption::new("Cohort", "cohort"),
                            ],
                        )
                        .required(),
                    ],
                    Vec::new(),
                ),
            ],
        ),
    ])
}

fn launched(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn attrs(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(name, values)| {
            (
                (*name).to_string(),
                values.iter().map(ToString::to_string).collect(),
            )
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    category: i32,
    title: &str,
    description: &str,
    price_cents: i64,
    available: bool,
    added: DateTime<Utc>,
    attributes: &[(&str, &[&str])],
) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        price: Decimal::new(price_cents, 2),
        category: CategoryId::new(category),
        attributes: attrs(attributes),
        available,
        created_at: added,
    }
}

fn build_products() -> Vec<ProductRecord> {
    vec![
        product(
            1,
            2,
            "Aster One",
            "A compact phone with a week of standby and an honest camera.",
            39_900,
            true,
            launched(2025, 3, 10),
            &[("storage", &["64GB"]), ("color", &["black"])],
        ),
        product(
            2,
            2,
            "Aster One Plus",
            "The bigger Aster, with a brighter panel and twice the storage.",
            49_900,
            true,
            launched(2025, 4, 2),
            &[("storage", &["128GB"]), ("color", &["white", "black"])],
        ),
        product(
            3,
            2,
            "Borealis Edge",
            "Flagship phone with satellite messaging and an always-on display.",
            64_900,
            false,
            launched(2025, 5, 18),
            &[("storage", &["256GB"]), ("color", &["blue"])],
        ),
        product(
            4,
            2,
            "Cobalt Mini",
            "Small phone, big battery. Fits in any pocket.",
            32_900,
            true,
            launched(2025, 6, 7),
            &[("storage", &["64GB"]), ("color", &["white"])],
        ),
        product(
            5,
            3,
            "Fern 13",
            "A quiet fanless laptop for writing and browsing.",
            89_900,
            true,
            launched(2025, 2, 20),
            &[("memory", &["8GB"]), ("screen", &["13in"])],
        ),
        product(
            6,
            3,
            "Fern 15",
            "The everyday Fern with a larger screen and a second USB-C port.",
            109_900,
            true,
            launched(2025, 3, 30),
            &[("memory", &["16GB"]), ("screen", &["15in"])],
        ),
        product(
            7,
            3,
            "Redwood Pro 16",
            "Workstation-class laptop for builds, renders, and heavy tabs.",
            189_900,
            false,
            launched(2025, 6, 25),
            &[("memory", &["32GB"]), ("screen", &["16in"])],
        ),
        product(
            8,
            4,
            "Drift Buds",
            "Wireless earbuds with six hours of playback per charge.",
            12_900,
            true,
            launched(2025, 1, 15),
            &[("connectivity", &["wireless"]), ("color", &["white"])],
        ),
        product(
            9,
            4,
            "Drift Buds Pro",
            "Noise-cancelling buds with a wireless charging case.",
            19_900,
            true,
            launched(2025, 5, 2),
            &[("connectivity", &["wireless"]), ("color", &["black", "white"])],
        ),
        product(
            10,
            4,
            "Studio Cans",
            "Over-ear headphones that work wired or wireless.",
            24_900,
            true,
            launched(2025, 4, 11),
            &[("connectivity", &["wired", "wireless"]), ("color", &["black"])],
        ),
        product(
            11,
            6,
            "Citrus Tee",
            "Everyday tee in heavyweight organic cotton.",
            2_900,
            true,
            launched(2025, 3, 5),
            &[
                ("size", &["M"]),
                ("color", &["white"]),
                ("material", &["Organic cotton"]),
            ],
        ),
        product(
            12,
            6,
            "Grove Hoodie",
            "Brushed fleece hoodie with a double-lined hood.",
            5_900,
            true,
            launched(2025, 2, 8),
            &[
                ("size", &["L"]),
                ("color", &["navy"]),
                ("material", &["Fleece"]),
            ],
        ),
        product(
            13,
            6,
            "Peel Longsleeve",
            "Light longsleeve for cool mornings.",
            3_900,
            false,
            launched(2025, 5, 27),
            &[
                ("size", &["S"]),
                ("color", &["olive", "white"]),
                ("material", &["Cotton blend"]),
            ],
        ),
        product(
            14,
            7,
            "Harbor Chinos",
            "Straight-cut chinos with a touch of stretch.",
            6_900,
            true,
            launched(2025, 4, 19),
            &[("size", &["32"]), ("color", &["stone"])],
        ),
        product(
            15,
            9,
            "Rust Foundations",
            "Ownership, borrowing, and the standard library, from zero.",
            7_900,
            true,
            launched(2025, 1, 28),
            &[
                ("level", &["beginner"]),
                ("topic", &["rust"]),
                ("format", &["self-paced"]),
            ],
        ),
        product(
            16,
            9,
            "Async Services in Rust",
            "Build and operate production network services, cohort-based.",
            12_900,
            true,
            launched(2025, 6, 12),
            &[
                ("level", &["advanced"]),
                ("topic", &["rust", "web"]),
                ("format", &["cohort"]),
            ],
        ),
        product(
            17,
            11,
            "Aster Clear Case",
            "Slim case that shows the phone off and survives drops.",
            1_900,
            true,
            launched(2025, 3, 22),
            &[("kind", &["case"]), ("color", &["black"])],
        ),
        product(
            18,
            11,
            "Loop Charger 30W",
            "Compact wall charger that tops an Aster up in forty minutes.",
            3_900,
            true,
            launched(2025, 2, 14),
            &[("kind", &["charger"]), ("color", &["white"])],
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_shape() {
        let tree = tree();
        assert_eq!(tree.roots().len(), 3);
        assert_eq!(tree.len(), 11);
        assert_eq!(tree.find_by_name("accessories").unwrap().id.as_i32(), 11);
    }

    #[test]
    fn test_every_product_category_resolves() {
        for record in products() {
            assert!(
                tree().find_by_id(record.category).is_some(),
                "product {} points at a missing category",
                record.id,
            );
        }
    }

    #[test]
    fn test_listing_is_backed_by_all_products() {
        assert_eq!(listing().len(), products().len());
    }
}
