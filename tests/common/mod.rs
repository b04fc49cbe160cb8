//! Common test utilities for gapfill.
//!
//! This module provides shared utilities for the integration tests.

#![allow(dead_code)]

// Re-export all common test utilities
pub mod assertions;
pub mod test_data;
