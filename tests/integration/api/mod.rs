//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod edit_test;
mod file_test;
mod settings_test;
