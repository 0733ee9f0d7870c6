//! Product domain entities.

pub mod model;

pub use model::{NewProduct, Product};
