//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` for `BackendError`

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{status_for, BackendError};
