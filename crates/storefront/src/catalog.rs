//! Product catalog loaded from a JSON file.
//!
//! The file is a JSON array of objects and is re-read on every call, so edits
//! show up on the next request without a restart. A missing or malformed file
//! is reported as [`CatalogLoad::Unavailable`]; callers that serve lists turn
//! that into an empty result with [`CatalogLoad::into_products_or_empty`].

use std::path::{Path, PathBuf};

use loopcart_core::{Product, filter_products};
use thiserror::Error;
use tracing::instrument;

/// Why the catalog could not be read.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of objects.
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of loading the catalog.
#[derive(Debug)]
pub enum CatalogLoad {
    Loaded(Vec<Product>),
    Unavailable(CatalogError),
}

impl CatalogLoad {
    /// The loaded products, or an empty list when the catalog is unavailable.
    ///
    /// The failure is logged here so it is not silently absorbed.
    #[must_use]
    pub fn into_products_or_empty(self) -> Vec<Product> {
        match self {
            Self::Loaded(products) => products,
            Self::Unavailable(error) => {
                tracing::warn!(error = %error, "Catalog unavailable, serving empty results");
                Vec::new()
            }
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Handle to the catalog file.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
}

impl Catalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole catalog file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> CatalogLoad {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(source) => {
                return CatalogLoad::Unavailable(CatalogError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<Vec<Product>>(&bytes) {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Catalog loaded");
                CatalogLoad::Loaded(products)
            }
            Err(source) => CatalogLoad::Unavailable(CatalogError::Parse {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// All products in file order, or none when the catalog is unavailable.
    pub async fn products(&self) -> Vec<Product> {
        self.load().await.into_products_or_empty()
    }

    /// Products whose title, brand or category contains `query`,
    /// case-insensitively, in file order.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        filter_products(self.products().await, query)
    }

    /// The first product whose `id` equals `id`.
    pub async fn find(&self, id: &str) -> Option<Product> {
        self.products()
            .await
            .into_iter()
            .find(|product| product.id().as_deref() == Some(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    const PHONES: &str = r#"[
        {"id": "p1", "title": "iPhone 14", "brand": "Apple", "category": "Phones"},
        {"id": "p2", "title": "Galaxy S21", "brand": "Samsung", "category": "Phones"}
    ]"#;

    fn catalog_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_valid_catalog() {
        let file = catalog_file(PHONES);
        let load = Catalog::new(file.path()).load().await;

        assert!(load.is_available());
        assert_eq!(load.into_products_or_empty().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let load = Catalog::new(dir.path().join("product.json")).load().await;

        assert!(matches!(
            load,
            CatalogLoad::Unavailable(CatalogError::Io { .. })
        ));
        assert!(load.into_products_or_empty().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_unavailable() {
        let file = catalog_file("[{\"title\": ");
        let load = Catalog::new(file.path()).load().await;

        assert!(matches!(
            load,
            CatalogLoad::Unavailable(CatalogError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_array_is_unavailable() {
        let file = catalog_file(r#"{"title": "iPhone 14"}"#);
        assert!(!Catalog::new(file.path()).load().await.is_available());
    }

    #[tokio::test]
    async fn test_empty_array() {
        let file = catalog_file("[]");
        let load = Catalog::new(file.path()).load().await;
        assert!(load.is_available());
        assert!(load.into_products_or_empty().is_empty());
    }

    #[tokio::test]
    async fn test_search_scenarios() {
        let file = catalog_file(PHONES);
        let catalog = Catalog::new(file.path());

        let phones = catalog.search("phone").await;
        let titles: Vec<&str> = phones.iter().map(Product::title).collect();
        assert_eq!(titles, vec!["iPhone 14", "Galaxy S21"]);

        let apple = catalog.search("apple").await;
        assert_eq!(apple.len(), 1);
        assert_eq!(apple.first().unwrap().title(), "iPhone 14");
    }

    #[tokio::test]
    async fn test_search_unreadable_catalog_is_empty() {
        let file = catalog_file("not json");
        assert!(Catalog::new(file.path()).search("phone").await.is_empty());
    }

    #[tokio::test]
    async fn test_reload_sees_file_changes() {
        let file = catalog_file("[]");
        let catalog = Catalog::new(file.path());
        assert!(catalog.search("phone").await.is_empty());

        std::fs::write(file.path(), PHONES).unwrap();
        assert_eq!(catalog.search("phone").await.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let file = catalog_file(PHONES);
        let catalog = Catalog::new(file.path());

        assert_eq!(catalog.find("p2").await.unwrap().title(), "Galaxy S21");
        assert!(catalog.find("p9").await.is_none());
    }
}
