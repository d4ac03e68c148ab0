//! Catalog product records and keyword matching.
//!
//! A catalog entry is an open JSON object. Only `title`, `brand` and
//! `category` take part in search, and only when they hold strings; any
//! other key is carried through to clients untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One catalog entry.
///
/// Serializes back to exactly the object it was read from, including key order.
///
/// ```
/// use loopcart_core::Product;
///
/// let product: Product = serde_json::from_str(
///     r#"{"id": "p1", "title": "iPhone 14", "brand": "Apple", "price": 999}"#,
/// ).unwrap();
///
/// assert_eq!(product.title(), "iPhone 14");
/// assert_eq!(product.category(), "");
/// assert_eq!(product.id().as_deref(), Some("p1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Map<String, Value>);

impl Product {
    /// Keys inspected by keyword search, in evaluation order.
    pub const SEARCH_FIELDS: [&'static str; 3] = ["title", "brand", "category"];

    /// Returns the string value stored under `key`.
    ///
    /// Absent keys and non-string values both read as the empty string.
    #[must_use]
    pub fn text_field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.text_field("title")
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        self.text_field("brand")
    }

    #[must_use]
    pub fn category(&self) -> &str {
        self.text_field("category")
    }

    /// Returns the product identifier, if any.
    ///
    /// Numeric ids are rendered in decimal so they compare equal to a path
    /// segment.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the product and returns the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Product {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A lowercased search needle.
///
/// Lowercasing happens once per query rather than once per product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    needle: String,
}

impl ProductQuery {
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// The lowercased query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Whether the needle occurs in the lowercased title, brand or category.
    ///
    /// An empty needle matches every product.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        Product::SEARCH_FIELDS
            .iter()
            .any(|key| product.text_field(key).to_lowercase().contains(&self.needle))
    }
}

/// Keep the products matching `query`, preserving catalog order.
#[must_use]
pub fn filter_products<I>(products: I, query: &str) -> Vec<Product>
where
    I: IntoIterator<Item = Product>,
{
    let query = ProductQuery::new(query);
    products
        .into_iter()
        .filter(|product| query.matches(product))
        .collect()
}
