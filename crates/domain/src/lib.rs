//! # rsblox Domain
//!
//! Plain data types shared by every rsblox crate.
//!
//! This crate contains:
//! - Request / response value types (`RequestSpec`, `ApiResponse`,
//!   `ResponseEnvelope`, `CallFailure`)
//! - Session material (`Credential`, `MutationToken`)
//! - Pagination values (`Page`, `Collected`, `StopReason`)
//! - Client configuration structures
//! - Domain error types and Result definitions
//! - Wire constants of the remote platform
//!
//! ## Architecture
//! - No dependencies on other rsblox crates
//! - Only external dependencies allowed
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
