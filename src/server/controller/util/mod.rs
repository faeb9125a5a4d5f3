//! Utility functions for controller request handling.
//!
//! This module provides reusable helpers used across controllers for resolving the acting
//! user, either from the session of protected endpoints or from the security token of
//! callback endpoints.

pub mod get_user;
