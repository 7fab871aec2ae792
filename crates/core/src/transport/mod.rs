//! Request execution port

pub mod ports;

pub use ports::RequestExecutor;
