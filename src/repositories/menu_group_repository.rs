use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{MenuGroup, RepositoryError, RepositoryResult};

/// Trait defining the interface for menu group data access operations
#[async_trait]
pub trait MenuGroupRepository: Send + Sync {
    /// Find all menu groups
    async fn find_all(&self) -> RepositoryResult<Vec<MenuGroup>>;

    /// Find a menu group by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<MenuGroup>>;

    /// Persist a new menu group
    async fn save(&self, menu_group: MenuGroup) -> RepositoryResult<MenuGroup>;
}

/// In-memory implementation of the MenuGroupRepository trait
#[derive(Default)]
pub struct InMemoryMenuGroupRepository {
    store: RwLock<HashMap<Uuid, MenuGroup>>,
}

impl InMemoryMenuGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuGroupRepository for InMemoryMenuGroupRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<MenuGroup>> {
        let store = self.store.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<MenuGroup>> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, menu_group: MenuGroup) -> RepositoryResult<MenuGroup> {
        let mut store = self.store.write().await;
        if store.contains_key(&menu_group.id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("Menu group already exists: {}", menu_group.id),
            });
        }
        store.insert(menu_group.id, menu_group.clone());
        Ok(menu_group)
    }
}
