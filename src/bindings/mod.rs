//! Builder interface binding generation.
//!
//! This module scans the C++ parser's `struct builder` callback table and
//! renders the matching Rust function-pointer table and trampolines.

pub mod catalog;
pub mod errors;
pub mod parser;
pub mod rust;
pub mod types;

pub use catalog::{TypeCatalog, NODE_ID, SELF_TYPE};
pub use errors::BindgenError;
pub use parser::{HeaderScanner, STRUCT_MARKER};
pub use rust::{write_output, RustEmitter, DEFAULT_BANNER, DEFAULT_COOKIE};
pub use types::{IntegrityCheck, Method, ParamRole, Parameter};
