//! Auth Handlers

pub(crate) mod login;
pub(crate) mod signup;
