pub mod api;
pub mod config;
pub mod error;
pub mod record;
pub mod session;
pub mod store;
