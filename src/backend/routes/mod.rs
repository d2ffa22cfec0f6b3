//! Routes Module
//!
//! - **`router`** - assembles the full router with middleware
//! - **`api_routes`** - authenticated file, edit, settings and session routes

pub mod router;

pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
