//! # rsblox Core
//!
//! Shared execution layer of the rsblox client - no HTTP stack.
//!
//! This crate contains:
//! - The `RequestExecutor` port every call goes through
//! - Response decoding and failure classification
//! - The mutation-token state machine (`AuthContext`)
//! - Cursor pagination (`Paginator`)
//! - The `Session` facade consumed by resource call sites
//!
//! ## Architecture Principles
//! - Only depends on `rsblox-domain`
//! - No network, file, or environment access
//! - All I/O via the `RequestExecutor` trait
//! - Failures are values; nothing here panics or rejects

pub mod auth;
pub mod codec;
pub mod failure;
pub mod pagination;
pub mod session;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::{extract_token, AuthContext, TokenState};
pub use codec::{decode, decode_as, decode_response, decode_str};
pub use failure::{classify, describe};
pub use pagination::Paginator;
pub use session::{body_or_none, Session};
pub use transport::RequestExecutor;
