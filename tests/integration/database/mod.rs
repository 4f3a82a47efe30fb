//! PostgreSQL store tests

pub mod store_test;
