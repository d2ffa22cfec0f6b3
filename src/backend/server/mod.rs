//! Server Module
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - configuration loading from the environment
//! - **`init`** - state construction and router assembly

pub mod state;

pub mod config;

pub mod init;

// Re-export commonly used types
pub use config::load_config;
pub use init::{build_state, create_app};
pub use state::AppState;
