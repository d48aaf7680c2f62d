//! storerate backend core.
//!
//! The store-rating application itself (store CRUD, ratings, dashboards) is
//! plumbing owned by collaborating services; what lives here is the part with
//! a real contract: issuing signed session tokens, admitting or rejecting
//! requests per role, and honouring logout through an external TTL denylist.

pub mod config;
pub mod error;
pub mod identity;
pub mod security;
pub mod server;
