//! Domain types and models

pub mod credential;
pub mod outcome;
pub mod page;
pub mod request;
pub mod response;
pub mod user;

// Re-export for convenience
pub use credential::{Credential, MutationToken};
pub use outcome::{CallFailure, CallOutcome, DecodeError, FailureKind};
pub use page::{Collected, Page, StopReason};
pub use request::{HttpMethod, RequestSpec};
pub use response::{ApiResponse, RawBody, ResponseEnvelope};
pub use user::UserId;
