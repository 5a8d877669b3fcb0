//! Generation error types and diagnostics.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error while generating builder bindings.
///
/// All variants are fatal: generation never produces partial output.
#[derive(Debug, Error, Diagnostic)]
pub enum BindgenError {
    #[error("unknown C type: `{spelling}`")]
    #[diagnostic(
        code(bindgen::scan::unknown_type),
        help("Add a mapping for `{spelling}` to the type catalog, or fix the header")
    )]
    UnknownType { spelling: String },

    #[error("failed to match `{marker}` body in header")]
    #[diagnostic(
        code(bindgen::scan::struct_not_found),
        help("Check that --header points at the builder interface header")
    )]
    StructNotFound { marker: String },

    #[error("bad definition: '{line}' ({reason})")]
    #[diagnostic(
        code(bindgen::scan::malformed_declaration),
        help("Members must have the form `foreign_ptr(*name)(self_ptr builder, ...);` with no trailing comments")
    )]
    MalformedDeclaration { line: String, reason: String },

    #[error("failed to read header: {}", path.display())]
    #[diagnostic(code(bindgen::io::header_read))]
    HeaderRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open '{}'", path.display())]
    #[diagnostic(code(bindgen::io::destination_open))]
    DestinationOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write generated output to {}", path.display())]
    #[diagnostic(code(bindgen::io::destination_write))]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("generated bindings in {} are out of date", path.display())]
    #[diagnostic(
        code(bindgen::check::stale),
        help("Regenerate the file with `builder-bindgen --rs <FILE>`")
    )]
    Stale { path: PathBuf },
}

impl BindgenError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        BindgenError::MalformedDeclaration {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
