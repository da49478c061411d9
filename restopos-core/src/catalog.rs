//! Menu catalog
//!
//! Cached read model over the store. `refresh()` fans out the remote
//! reads concurrently and recomputes category counts once per data
//! refresh; page renders read from the cache.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use shared::PosResult;
use shared::models::{
    Category, MenuItem, MenuItemCreate, MenuItemFilter, MenuItemUpdate,
};
use tracing::debug;

use crate::store::PosStore;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};

/// Item count for one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category_id: String,
    pub name: String,
    pub count: usize,
}

/// Aggregated per-category counts, recomputed once per refresh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub total_items: usize,
    pub per_category: Vec<CategoryCount>,
}

/// Count items per category, preserving category order
pub fn compute_category_counts(categories: &[Category], items: &[MenuItem]) -> CategoryCounts {
    let per_category = categories
        .iter()
        .map(|category| CategoryCount {
            category_id: category.id.clone(),
            name: category.name.clone(),
            count: items.iter().filter(|i| i.category_id == category.id).count(),
        })
        .collect();
    CategoryCounts {
        total_items: items.len(),
        per_category,
    }
}

/// Cached menu catalog
pub struct CatalogService {
    store: Arc<dyn PosStore>,
    items: RwLock<Vec<MenuItem>>,
    categories: RwLock<Vec<Category>>,
    counts: RwLock<CategoryCounts>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn PosStore>) -> Self {
        Self {
            store,
            items: RwLock::new(Vec::new()),
            categories: RwLock::new(Vec::new()),
            counts: RwLock::new(CategoryCounts::default()),
        }
    }

    /// Reload categories and items (concurrent fan-out) and recompute
    /// the category counts
    pub async fn refresh(&self) -> PosResult<()> {
        let filter = MenuItemFilter::default();
        let (categories, items) = tokio::try_join!(
            self.store.list_categories(),
            self.store.list_menu_items(&filter),
        )?;
        let counts = compute_category_counts(&categories, &items);
        debug!(
            categories = categories.len(),
            items = items.len(),
            "Catalog refreshed"
        );
        *self.categories.write() = categories;
        *self.counts.write() = counts;
        *self.items.write() = items;
        Ok(())
    }

    // ========== Cached reads ==========

    pub fn items(&self) -> Vec<MenuItem> {
        self.items.read().clone()
    }

    /// Items orderable right now
    pub fn available_items(&self) -> Vec<MenuItem> {
        self.items
            .read()
            .iter()
            .filter(|i| i.is_available)
            .cloned()
            .collect()
    }

    pub fn items_by_category(&self, category_id: &str) -> Vec<MenuItem> {
        self.items
            .read()
            .iter()
            .filter(|i| i.is_available && i.category_id == category_id)
            .cloned()
            .collect()
    }

    pub fn popular_items(&self, limit: usize) -> Vec<MenuItem> {
        self.items
            .read()
            .iter()
            .filter(|i| i.is_popular && i.is_available)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.read().clone()
    }

    pub fn category_counts(&self) -> CategoryCounts {
        self.counts.read().clone()
    }

    // ========== CRUD (menu management page) ==========

    pub async fn create_item(&self, payload: MenuItemCreate) -> PosResult<MenuItem> {
        validate_create(&payload)?;
        let item = self.store.create_menu_item(payload).await?;
        self.refresh().await?;
        Ok(item)
    }

    pub async fn update_item(&self, id: &str, payload: MenuItemUpdate) -> PosResult<MenuItem> {
        validate_update(&payload)?;
        let item = self.store.update_menu_item(id, payload).await?;
        self.refresh().await?;
        Ok(item)
    }

    pub async fn delete_item(&self, id: &str) -> PosResult<()> {
        self.store.delete_menu_item(id).await?;
        self.refresh().await?;
        Ok(())
    }
}

fn validate_create(payload: &MenuItemCreate) -> PosResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category_id, "category_id", MAX_NAME_LEN)?;
    validate_non_negative(payload.price, "price")?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(prep_time) = payload.prep_time {
        validate_non_negative(prep_time as i64, "prep_time")?;
    }
    Ok(())
}

fn validate_update(payload: &MenuItemUpdate) -> PosResult<()> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_non_negative(price, "price")?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(prep_time) = payload.prep_time {
        validate_non_negative(prep_time as i64, "prep_time")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use shared::PosError;

    fn item_create(name: &str, category_id: &str, price: i64) -> MenuItemCreate {
        MenuItemCreate {
            name: name.to_string(),
            description: None,
            price,
            category_id: category_id.to_string(),
            image_url: None,
            prep_time: Some(10),
            is_popular: None,
            is_available: None,
        }
    }

    #[tokio::test]
    async fn test_counts_recomputed_on_refresh_only() {
        let store = Arc::new(MemoryStore::new());
        let mains = store.insert_category("Mains", None);
        let drinks = store.insert_category("Drinks", None);
        let catalog = CatalogService::new(store.clone());

        catalog.refresh().await.unwrap();
        assert_eq!(catalog.category_counts().total_items, 0);

        // Direct store write: the cache does not see it until refresh
        store
            .create_menu_item(item_create("Pad Thai", &mains.id, 1000))
            .await
            .unwrap();
        assert_eq!(catalog.category_counts().total_items, 0);

        catalog.refresh().await.unwrap();
        let counts = catalog.category_counts();
        assert_eq!(counts.total_items, 1);
        let mains_count = counts
            .per_category
            .iter()
            .find(|c| c.category_id == mains.id)
            .unwrap();
        assert_eq!(mains_count.count, 1);
        let drinks_count = counts
            .per_category
            .iter()
            .find(|c| c.category_id == drinks.id)
            .unwrap();
        assert_eq!(drinks_count.count, 0);
    }

    #[tokio::test]
    async fn test_crud_refreshes_cache() {
        let store = Arc::new(MemoryStore::new());
        let mains = store.insert_category("Mains", None);
        let catalog = CatalogService::new(store.clone());
        catalog.refresh().await.unwrap();

        let item = catalog
            .create_item(item_create("Pad Thai", &mains.id, 1000))
            .await
            .unwrap();
        assert_eq!(catalog.items().len(), 1);

        catalog
            .update_item(
                &item.id,
                MenuItemUpdate {
                    is_available: Some(false),
                    ..MenuItemUpdate::default()
                },
            )
            .await
            .unwrap();
        assert!(catalog.available_items().is_empty());
        assert_eq!(catalog.items().len(), 1);

        catalog.delete_item(&item.id).await.unwrap();
        assert!(catalog.items().is_empty());
        assert_eq!(catalog.category_counts().total_items, 0);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let store = Arc::new(MemoryStore::new());
        let mains = store.insert_category("Mains", None);
        let catalog = CatalogService::new(store.clone());

        let err = catalog
            .create_item(item_create("", &mains.id, 1000))
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::Validation { .. }));

        let err = catalog
            .create_item(item_create("Pad Thai", &mains.id, -5))
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_popular_items_limit() {
        let store = Arc::new(MemoryStore::new());
        let mains = store.insert_category("Mains", None);
        let catalog = CatalogService::new(store.clone());

        for i in 0..8 {
            let mut payload = item_create(&format!("Dish {}", i), &mains.id, 900);
            payload.is_popular = Some(true);
            store.create_menu_item(payload).await.unwrap();
        }
        catalog.refresh().await.unwrap();
        assert_eq!(catalog.popular_items(6).len(), 6);
    }
}
