//! Generic repository trait for record storage.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic key-value repository trait.
///
/// Each entity gets a strongly typed store through the type parameters.
/// Entity-specific lookups live on narrower traits built on top of this one.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Return up to `limit` entities, oldest first.
    async fn find_all(&self, limit: usize) -> AppResult<Vec<Entity>>;

    /// Store a new entity and return it.
    async fn create(&self, entity: &Entity) -> AppResult<Entity>;

    /// Replace an existing entity and return the stored version.
    async fn update(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: &Id) -> AppResult<bool>;

    /// Count stored entities.
    async fn count(&self) -> AppResult<u64>;
}
