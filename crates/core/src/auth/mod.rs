//! Mutation token lifecycle for one session
//!
//! The platform hands out anti-forgery tokens only when it rejects a
//! mutating call that lacks one. [`AuthContext`] exploits that: it probes a
//! mutating endpoint without a token and reads the fresh token off the
//! rejection. The lifecycle is modelled as the explicit [`TokenState`]
//! machine.

pub mod context;
pub mod state;

pub use context::{extract_token, AuthContext};
pub use state::TokenState;
