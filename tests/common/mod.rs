//! Common test utilities for earthcmap.

pub mod assertions;
pub mod fixtures;
