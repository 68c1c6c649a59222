use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Product, RepositoryError, RepositoryResult};

/// Trait defining the interface for product data access operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find all products
    async fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// Find a product by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Product>>;

    /// Find all products whose ID is in the given set; missing IDs are
    /// silently absent from the result
    async fn find_all_by_id_in(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Product>>;

    /// Persist a new product
    async fn save(&self, product: Product) -> RepositoryResult<Product>;

    /// Update an existing product
    async fn update(&self, product: Product) -> RepositoryResult<Product>;
}

/// In-memory implementation of the ProductRepository trait
#[derive(Default)]
pub struct InMemoryProductRepository {
    store: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_all_by_id_in(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Product>> {
        let wanted: HashSet<Uuid> = ids.iter().copied().collect();
        let store = self.store.read().await;
        Ok(store
            .values()
            .filter(|product| wanted.contains(&product.id))
            .cloned()
            .collect())
    }

    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        let mut store = self.store.write().await;
        if store.contains_key(&product.id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("Product already exists: {}", product.id),
            });
        }
        store.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> RepositoryResult<Product> {
        let mut store = self.store.write().await;
        if !store.contains_key(&product.id) {
            return Err(RepositoryError::NotFound);
        }
        store.insert(product.id, product.clone());
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProductRequest;
    use rust_decimal_macros::dec;

    fn sample_product(name: &str) -> Product {
        Product::new(CreateProductRequest {
            name: name.to_string(),
            price: dec!(6000),
        })
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repository = InMemoryProductRepository::new();
        let product = sample_product("Fried Chicken");

        repository.save(product.clone()).await.unwrap();

        let found = repository.find_by_id(product.id).await.unwrap();
        assert_eq!(found, Some(product));
    }

    #[tokio::test]
    async fn test_find_all_by_id_in_skips_missing_ids() {
        let repository = InMemoryProductRepository::new();
        let chicken = sample_product("Fried Chicken");
        let beer = sample_product("Beer");
        repository.save(chicken.clone()).await.unwrap();
        repository.save(beer.clone()).await.unwrap();

        let found = repository
            .find_all_by_id_in(&[chicken.id, Uuid::new_v4()])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, chicken.id);
    }

    #[tokio::test]
    async fn test_update() {
        let repository = InMemoryProductRepository::new();
        let mut product = sample_product("Fried Chicken");
        repository.save(product.clone()).await.unwrap();

        product.change_price(dec!(6500));
        repository.update(product.clone()).await.unwrap();

        let found = repository.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(found.price, dec!(6500));

        let missing = repository.update(sample_product("Ghost")).await;
        assert!(matches!(missing, Err(RepositoryError::NotFound)));
    }
}
