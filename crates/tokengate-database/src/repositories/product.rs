//! Product repository implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_core::traits::Repository;
use tokengate_entity::Product;

/// Repository for product records.
#[derive(Debug, Default)]
pub struct ProductRepository {
    products: DashMap<Uuid, Product>,
}

impl ProductRepository {
    /// Create an empty product repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Product, Uuid> for ProductRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Product>> {
        Ok(self.products.get(id).map(|p| p.clone()))
    }

    async fn find_all(&self, limit: usize) -> AppResult<Vec<Product>> {
        let mut products: Vec<Product> = self.products.iter().map(|p| p.clone()).collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        products.truncate(limit);
        Ok(products)
    }

    async fn create(&self, entity: &Product) -> AppResult<Product> {
        if self.products.contains_key(&entity.id) {
            return Err(AppError::conflict("Product already exists"));
        }
        self.products.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn update(&self, entity: &Product) -> AppResult<Product> {
        match self.products.get_mut(&entity.id) {
            Some(mut stored) => {
                *stored = entity.clone();
                Ok(entity.clone())
            }
            None => Err(AppError::not_found("Product not found")),
        }
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        Ok(self.products.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.products.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tokengate_core::error::ErrorKind;
    use tokengate_entity::product::NewProduct;

    use super::*;

    fn widget() -> Product {
        Product::create(
            NewProduct {
                name: "Widget".into(),
                description: "A widget".into(),
                price: 9.5,
            },
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let repo = ProductRepository::new();
        let created = repo.create(&widget()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        let mut changed = created.clone();
        changed.price = 12.0;
        repo.update(&changed).await.unwrap();
        assert_eq!(repo.find_by_id(&created.id).await.unwrap().unwrap().price, 12.0);

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = ProductRepository::new();
        let err = repo.update(&widget()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
