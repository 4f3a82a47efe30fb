//! Test suite for docsync
//!
//! This module organizes all tests

pub mod common;
#[cfg(feature = "ssr")]
pub mod integration;
pub mod property;
