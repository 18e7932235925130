//! The category taxonomy: a static tree of categories, each declaring the
//! typed filter fields available to products underneath it.
//!
//! The tree is built once from configuration at process start and treated as
//! immutable afterwards. Lookup by id or name walks the tree depth-first in
//! pre-order: a category is checked before its subcategories are descended
//! into, and the first match wins.
//!
//! Two invariants are expected of the data (and checked by catalog
//! integrity validation rather than enforced here): category ids are
//! globally unique, and sibling names are unique case-insensitively.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// How a filter field is represented and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-form text input.
    Text,
    /// A single choice among the declared options.
    Select,
    /// Multiple choices among the declared options.
    Multi,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Select => write!(f, "select"),
            Self::Multi => write!(f, "multi"),
        }
    }
}

impl std::str::FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "select" => Ok(Self::Select),
            "multi" => Ok(Self::Multi),
            _ => Err(format!("invalid field kind: {s}")),
        }
    }
}

/// A selectable option on a [`FieldKind::Select`] or [`FieldKind::Multi`]
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Human-readable label, e.g. "64 GB".
    pub label: String,
    /// Submitted and stored value, e.g. "64GB". Unique within the field.
    pub value: String,
}

impl FieldOption {
    /// Create an option from a label and its stored value.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A typed filter/attribute slot declared by a category.
///
/// Field definitions drive both directions of the catalog: on the read path
/// the `name` doubles as the query parameter products are filtered by, and
/// on the write path submitted attributes are validated against the declared
/// kind and options (see [`crate::attributes::validate_attributes`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name, unique within the owning category's field list.
    pub name: String,
    /// Human-readable label used in validation messages.
    pub label: String,
    /// Field kind.
    pub kind: FieldKind,
    /// Whether a value must be submitted on the write path.
    #[serde(default)]
    pub required: bool,
    /// Declared options. Expected non-empty for `Select`/`Multi` fields.
    #[serde(default)]
    pub options: Vec<FieldOption>,
    /// Pre-selected value, if any. Display metadata only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Help text shown alongside the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input placeholder for text fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldDefinition {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            options: Vec::new(),
            default_value: None,
            description: None,
            placeholder: None,
        }
    }

    /// A free-form text field.
    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// A single-choice field with the given options.
    #[must_use]
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self {
            options,
            ..Self::new(name, label, FieldKind::Select)
        }
    }

    /// A multiple-choice field with the given options.
    #[must_use]
    pub fn multi(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self {
            options,
            ..Self::new(name, label, FieldKind::Multi)
        }
    }

    /// Mark the field as required on the write path.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the pre-selected default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the help text.
    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Set the input placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Whether `value` is one of the declared option values.
    #[must_use]
    pub fn has_option_value(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

/// A node in the category taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Globally unique id within the tree.
    pub id: CategoryId,
    /// Id of the parent category, `None` for roots. Denormalized from the
    /// nesting; catalog integrity checks verify the two agree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    /// Display name. Unique among siblings, compared case-insensitively.
    pub name: String,
    /// Storefront path for this category, if it is routable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Filter fields declared for products in this category.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Child categories, in display order.
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl Category {
    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn matches(&self, lookup: &CategoryLookup<'_>) -> bool {
        match lookup {
            CategoryLookup::Id(id) => self.id == *id,
            CategoryLookup::Name(name) => self.name.to_lowercase() == name.to_lowercase(),
        }
    }
}

/// Lookup key for [`find_category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryLookup<'a> {
    /// Exact id match.
    Id(CategoryId),
    /// Case-insensitive name match.
    Name(&'a str),
}

/// Find a category among `categories` and their descendants.
///
/// The walk is depth-first in pre-order: each category in the given slice is
/// checked before its subcategories are descended into, and the first match
/// wins. With unique ids and sibling names this makes the result
/// deterministic; an ancestor always shadows a deeper node that would also
/// match.
#[must_use]
pub fn find_category<'t>(
    categories: &'t [Category],
    lookup: &CategoryLookup<'_>,
) -> Option<&'t Category> {
    for category in categories {
        if category.matches(lookup) {
            return Some(category);
        }
        if let Some(found) = find_category(&category.subcategories, lookup) {
            return Some(found);
        }
    }
    None
}

/// The immutable category taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTree {
    roots: Vec<Category>,
}

impl CategoryTree {
    /// Build a tree from its root categories.
    #[must_use]
    pub const fn new(roots: Vec<Category>) -> Self {
        Self { roots }
    }

    /// The root categories, in display order.
    #[must_use]
    pub fn roots(&self) -> &[Category] {
        &self.roots
    }

    /// Find a category by id or name.
    #[must_use]
    pub fn find(&self, lookup: &CategoryLookup<'_>) -> Option<&Category> {
        find_category(&self.roots, lookup)
    }

    /// Find a category by exact id.
    #[must_use]
    pub fn find_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.find(&CategoryLookup::Id(id))
    }

    /// Find a category by case-insensitive name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.find(&CategoryLookup::Name(name))
    }

    /// Iterate over every category in pre-order.
    #[must_use]
    pub fn iter(&self) -> CategoryIter<'_> {
        CategoryIter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Total number of categories in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the tree has no categories at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl<'t> IntoIterator for &'t CategoryTree {
    type Item = &'t Category;
    type IntoIter = CategoryIter<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over every category in a [`CategoryTree`].
#[derive(Debug)]
pub struct CategoryIter<'t> {
    stack: Vec<&'t Category>,
}

impl<'t> Iterator for CategoryIter<'t> {
    type Item = &'t Category;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Children are pushed in reverse so the first child is visited first.
        for child in next.subcategories.iter().rev() {
            self.stack.push(child);
        }
        Some(next)
    }
}
