//! Tests for the verification code lifecycle

mod cleanup_tests;
mod store_tests;
