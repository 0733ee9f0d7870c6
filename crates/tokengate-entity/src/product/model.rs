//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalogue item, the resource protected by scopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// Product name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Non-negative price.
    pub price: f64,
    /// User who created the product.
    pub created_by: Uuid,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied product fields for create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    /// Product name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Non-negative price.
    pub price: f64,
}

impl Product {
    /// Builds a new product owned by `created_by`.
    pub fn create(fields: NewProduct, created_by: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            created_by,
            created_at,
        }
    }

    /// Replaces the mutable fields, keeping identity, owner, and creation time.
    pub fn apply(&mut self, fields: NewProduct) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
    }
}
