//! Products

pub mod data;
pub mod errors;
mod memory;
pub mod models;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use memory::MemoryProductsService;
pub use service::*;
