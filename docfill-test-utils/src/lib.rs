//! Shared test environment for docfill.
//!
//! Tests are set up in two phases. [`TestBuilder`] declares tables, fixtures & mock endpoints,
//! then [`TestContext`] exposes the in-memory database, session & mock document server while
//! the test runs.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        fixtures::factory, test_setup_with_tables, TestBuilder, TestContext, TestError,
    };
}
