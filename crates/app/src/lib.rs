//! Application services for the Gazalla shop: catalog, orders, accounts and authentication,
//! each backed by `PostgreSQL` or by process memory.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
