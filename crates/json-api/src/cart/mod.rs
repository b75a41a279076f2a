//! Cart

pub(crate) mod add;
