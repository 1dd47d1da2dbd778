pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod models;
