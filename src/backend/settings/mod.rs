//! Settings Module
//!
//! Per-user string settings used by the editor front end.
//!
//! - **`state`** - the in-memory store
//! - **`handlers`** - HTTP endpoints under `/settings`

pub mod state;

pub mod handlers;

pub use handlers::{delete_setting, get_setting, list_settings, save_settings};
pub use state::SettingsState;
