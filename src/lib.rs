//! Coedit - Main Library
//!
//! Coedit is the server side of a browser-based code editor. It authenticates
//! users, stores per-user files, and lets several users open the same file at
//! once for viewing or editing while buffering their incremental edits until
//! the next save.
//!
//! # Overview
//!
//! The heart of the library is the collaborative file-session coordinator:
//! - Tracks which users have which files open, and in which mode
//! - Arbitrates conflicting open/save/delete requests
//! - Buffers an ordered log of opaque edit operations per session
//!
//! Everything around it (HTTP routing, authentication, storage, settings) is
//! thin glue over narrow contracts.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that clients and the server agree on
//!   - Identities, file handles, edit modes and edit operations
//!   - Error taxonomy and status kinds
//!   - Application configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Session coordinator (registry, arbitration, edit buffer)
//!   - Storage gateways (disk, in-memory)
//!   - Identity providers and JWT sessions
//!   - Axum router, handlers and middleware
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use coedit::backend::server::init::create_app;
//! use coedit::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder().build()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The session registry sits behind a single process-wide mutex. Every
//! open/save/delete workflow runs start to finish while holding it, storage
//! I/O included, so all file-session activity is serialized.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
