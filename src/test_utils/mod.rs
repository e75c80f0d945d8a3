//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory repository implementations for mocking persistence
//! - Helper builders for constructing app state with test dependencies

mod app_state_builder;
mod deal_mocks;
mod factories;
mod inquiry_mocks;
mod listing_mocks;

pub use app_state_builder::*;
pub use deal_mocks::*;
pub use factories::*;
pub use inquiry_mocks::*;
pub use listing_mocks::*;
