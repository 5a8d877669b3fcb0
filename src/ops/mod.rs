//! High-level operations.
//!
//! This module contains the implementation of builder-bindgen's actions.

pub mod generate;

pub use generate::{
    check, dump_methods, generate, render, safe_signatures, scan_header, Destination,
    GenerateOptions,
};
