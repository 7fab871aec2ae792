//! # rsblox Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP executor
//! - Configuration loading (file + environment)
//! - Logging initialisation
//! - Session construction
//!
//! ## Architecture
//! - Implements traits defined in `rsblox-core`
//! - Depends on `rsblox-domain` and `rsblox-core`
//! - Contains all "impure" code (network, files, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::{init_tracing, LogFormat};
pub use session::{build_client, build_session, session_with_client};
