//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tokengate_entity::Role;
use tokengate_entity::product::NewProduct;
use tokengate_service::RegisterUser;

/// Registration request body.
///
/// Length minimums are configurable and enforced by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Display handle.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role; defaults to `user`.
    #[serde(default)]
    pub role: Option<Role>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            username: req.username,
            password: req.password,
            role: req.role,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Product create/update body. Field rules are enforced by the product
/// service after authorization.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductRequest {
    /// Product name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Price.
    pub price: f64,
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}
