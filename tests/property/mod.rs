//! Property-based tests for the session coordinator

mod edit_buffer_proptest;
