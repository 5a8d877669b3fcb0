//! Test utilities for builder-bindgen unit tests.

pub mod fixtures;
