//! Authentication

mod errors;
mod models;
mod password;
mod service;

pub use errors::*;
pub use models::*;
pub use password::{digest_password, verify_password};
pub use service::*;
