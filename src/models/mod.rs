//! Data-transfer shapes mirrored from backend JSON.

pub mod compliance;
pub mod database;
pub mod monitor;
pub mod roles;
pub mod site;
