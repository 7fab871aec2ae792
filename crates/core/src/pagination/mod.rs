//! Cursor-based pagination
//!
//! Pages are fetched strictly one after another: each page URL carries the
//! cursor handed out by the previous page.

pub mod paginator;

pub use paginator::Paginator;
