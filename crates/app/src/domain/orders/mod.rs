//! Orders

pub mod errors;
mod memory;
pub mod models;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use memory::MemoryOrdersService;
pub use service::*;
