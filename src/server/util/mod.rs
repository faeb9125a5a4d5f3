//! Utility functions and helpers for server operations.
//!
//! Building the URLs the document builder service calls back to, and helpers shared by
//! tests.

pub mod url;
