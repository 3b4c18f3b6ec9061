//! The three curated rows loaded once at startup. Each row is fetched and
//! reported on its own.

use scenero_api::traits::{CatalogItem, CatalogProvider, Category};

/// Fetch one row. Failures are logged and yield an empty row.
pub async fn load_row<P: CatalogProvider>(provider: &P, category: Category) -> Vec<CatalogItem> {
    match provider.list_by_category(category).await {
        Ok(items) => {
            tracing::debug!(category = category.as_path(), count = items.len(), "catalog row loaded");
            items
        }
        Err(e) => {
            tracing::warn!("Error fetching {}: {e}", category.as_path());
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogRows {
    upcoming: Vec<CatalogItem>,
    popular: Vec<CatalogItem>,
    top_rated: Vec<CatalogItem>,
}

impl CatalogRows {
    pub fn get(&self, category: Category) -> &[CatalogItem] {
        match category {
            Category::Upcoming => &self.upcoming,
            Category::Popular => &self.popular,
            Category::TopRated => &self.top_rated,
        }
    }

    pub fn set(&mut self, category: Category, items: Vec<CatalogItem>) {
        match category {
            Category::Upcoming => self.upcoming = items,
            Category::Popular => self.popular = items,
            Category::TopRated => self.top_rated = items,
        }
    }

    /// Rows in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[CatalogItem])> {
        Category::ALL.iter().map(|&c| (c, self.get(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubCatalog;

    #[tokio::test]
    async fn test_load_row_returns_items() {
        let provider = StubCatalog::new().with_row(Category::Popular, &["Heat", "Alien"]);

        let items = load_row(&provider, Category::Popular).await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "Alien");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_row_is_empty() {
        let provider = StubCatalog::new().with_row(Category::Upcoming, &["Dune: Part Three"]);

        assert!(load_row(&provider, Category::TopRated).await.is_empty());
        assert_eq!(load_row(&provider, Category::Upcoming).await.len(), 1);
    }

    #[test]
    fn test_iter_in_display_order() {
        let mut rows = CatalogRows::default();
        rows.set(Category::TopRated, Vec::new());
        let order: Vec<_> = rows.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Category::ALL);
    }
}
