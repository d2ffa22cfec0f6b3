//! Backend Module
//!
//! All server-side code: the collaborative file-session coordinator and the
//! Axum HTTP server around it. Only compiled with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`collab`** - session registry, access arbitration, edit buffer, coordinator
//! - **`storage`** - storage gateways (disk, in-memory)
//! - **`auth`** - identity providers, JWT sessions, login/logout
//! - **`settings`** - per-user key/value settings
//! - **`middleware`** - bearer-token authentication
//! - **`error`** - `BackendError` and its HTTP conversion
//! - **`server`** - application state, configuration loading, initialization
//! - **`routes`** - route table and router assembly
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - coedit-server binary
//! ├── collab/         - File-session coordinator
//! ├── storage/        - Storage gateways
//! ├── auth/           - Authentication
//! ├── settings/       - User settings
//! ├── middleware/     - Request middleware
//! ├── error/          - Error types
//! ├── server/         - Server initialization and state
//! └── routes/         - Route configuration
//! ```
//!
//! # Request Flow
//!
//! Router → auth middleware → handler → `CollabState` (arbiter consults the
//! registry, storage I/O, registry mutation, all under one mutex) → response.
//!
//! # Error Handling
//!
//! Handlers return `BackendError`, which converts coordinator errors to
//! status codes: conflict 409, invalid state and validation 400, not found
//! 404, storage failure 500, missing credentials 401.

/// Collaborative file sessions
pub mod collab;

/// Storage gateways
pub mod storage;

/// Authentication and sessions
pub mod auth;

/// User settings
pub mod settings;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Re-export commonly used types
pub use collab::CollabState;
pub use error::BackendError;
pub use server::create_app;
