//! Per-resource operations against the backend. Free async functions taking
//! an [`ApiClient`](crate::client::ApiClient), one module per endpoint
//! family.

pub mod admin_tools;
pub mod compliance;
pub mod databases;
pub mod roles;
pub mod sites;
