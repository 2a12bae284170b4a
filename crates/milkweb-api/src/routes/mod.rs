//! Route modules for the API server
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and shared helpers
//! - api.rs: JSON API endpoints
//! - page.rs: HTMX page rendering

pub mod customers;
pub mod period;
pub mod statements;
