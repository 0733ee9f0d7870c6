//! Product catalogue operations.

pub mod service;

pub use service::ProductService;
