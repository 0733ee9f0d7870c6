//! Product CRUD guarded by scopes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use tokengate_auth::{AuthorizationEngine, Requirement};
use tokengate_core::error::AppError;
use tokengate_core::traits::{Clock, Repository};
use tokengate_entity::Scope;
use tokengate_entity::product::{NewProduct, Product};

use crate::context::RequestContext;

/// Most products returned by a listing.
pub const MAX_LIST: usize = 100;

const MIN_NAME_LENGTH: usize = 3;

/// Product catalogue operations.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn Repository<Product, Uuid>>,
    authz: Arc<AuthorizationEngine>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

fn validate(fields: &NewProduct) -> Result<(), AppError> {
    if fields.name.trim().chars().count() < MIN_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Name must be at least {MIN_NAME_LENGTH} characters"
        )));
    }
    if !fields.price.is_finite() || fields.price < 0.0 {
        return Err(AppError::validation("Price must be positive"));
    }
    Ok(())
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(
        repo: Arc<dyn Repository<Product, Uuid>>,
        authz: Arc<AuthorizationEngine>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, authz, clock }
    }

    /// Lists products, oldest first. Requires `read`.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Product>, AppError> {
        self.authz
            .require(&ctx.claims, &Requirement::scope(Scope::Read))?;
        self.repo.find_all(MAX_LIST).await
    }

    /// Fetches one product. Requires `read`.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Product, AppError> {
        self.authz
            .require(&ctx.claims, &Requirement::scope(Scope::Read))?;
        self.find(id).await
    }

    /// Creates a product owned by the caller. Requires `write`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        fields: NewProduct,
    ) -> Result<Product, AppError> {
        self.authz
            .require(&ctx.claims, &Requirement::scope(Scope::Write))?;
        validate(&fields)?;

        let product = Product::create(fields, ctx.user_id(), self.clock.now());
        let product = self.repo.create(&product).await?;

        info!(product_id = %product.id, user_id = %ctx.user_id(), "Product created");

        Ok(product)
    }

    /// Replaces a product's fields, keeping its owner and creation time.
    /// Requires `write`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        fields: NewProduct,
    ) -> Result<Product, AppError> {
        self.authz
            .require(&ctx.claims, &Requirement::scope(Scope::Write))?;
        validate(&fields)?;

        let mut product = self.find(id).await?;
        product.apply(fields);
        let product = self.repo.update(&product).await?;

        info!(product_id = %id, user_id = %ctx.user_id(), "Product updated");

        Ok(product)
    }

    /// Deletes a product. Requires `delete`.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.authz
            .require(&ctx.claims, &Requirement::scope(Scope::Delete))?;

        if !self.repo.delete(&id).await? {
            return Err(AppError::not_found("Product not found"));
        }

        info!(product_id = %id, user_id = %ctx.user_id(), client = %ctx.client, "Product deleted");

        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }
}
