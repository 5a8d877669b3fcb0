//! builder-bindgen - Rust bindings for the C++ parser's builder interface
//!
//! This crate scans the `struct builder` callback table declared in the
//! parser's C++ header and generates the Rust side of that boundary: a
//! `#[repr(C)]` function-pointer struct, one `unsafe extern "C"` trampoline
//! per callback, and the static table wiring them together.

pub mod bindings;
pub mod ops;
pub mod util;

/// Header fixtures for unit tests.
#[cfg(test)]
pub mod test_support;

pub use bindings::{BindgenError, HeaderScanner, Method, Parameter, RustEmitter, TypeCatalog};
pub use ops::{Destination, GenerateOptions};
pub use util::config::Config;
