//! # authgate_core
//!
//! Core credential lifecycle logic for Authgate: the credential directory,
//! the renewal token store, and the access token issuer.

pub mod auth;
pub mod migrate;
pub mod models;
