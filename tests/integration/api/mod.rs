//! HTTP route tests
