use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Menu, RepositoryError, RepositoryResult};

/// Trait defining the interface for menu data access operations
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Find all menus
    async fn find_all(&self) -> RepositoryResult<Vec<Menu>>;

    /// Find a menu by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Menu>>;

    /// Find all menus containing the given product
    async fn find_all_by_product_id(&self, product_id: Uuid) -> RepositoryResult<Vec<Menu>>;

    /// Persist a new menu
    async fn save(&self, menu: Menu) -> RepositoryResult<Menu>;

    /// Update an existing menu
    async fn update(&self, menu: Menu) -> RepositoryResult<Menu>;
}

/// In-memory implementation of the MenuRepository trait
#[derive(Default)]
pub struct InMemoryMenuRepository {
    store: RwLock<HashMap<Uuid, Menu>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Menu>> {
        let store = self.store.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Menu>> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_all_by_product_id(&self, product_id: Uuid) -> RepositoryResult<Vec<Menu>> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .filter(|menu| {
                menu.menu_products
                    .iter()
                    .any(|menu_product| menu_product.product.id == product_id)
            })
            .cloned()
            .collect())
    }

    async fn save(&self, menu: Menu) -> RepositoryResult<Menu> {
        let mut store = self.store.write().await;
        if store.contains_key(&menu.id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("Menu already exists: {}", menu.id),
            });
        }
        debug!(menu_id = %menu.id, "Saving menu");
        store.insert(menu.id, menu.clone());
        Ok(menu)
    }

    async fn update(&self, menu: Menu) -> RepositoryResult<Menu> {
        let mut store = self.store.write().await;
        if !store.contains_key(&menu.id) {
            return Err(RepositoryError::NotFound);
        }
        store.insert(menu.id, menu.clone());
        Ok(menu)
    }
}
