//! Rust module generation for the builder interface.
//!
//! Output layout, in order: banner, `#[repr(C)] struct BuilderInterface`,
//! one trampoline per method, and the `CALLBACKS` table wiring each field to
//! the trampoline of the same name.

use std::path::Path;

use super::errors::BindgenError;
use super::types::{IntegrityCheck, Method};

/// Value the integrity check compares the receiver's cookie against.
pub const DEFAULT_COOKIE: u64 = 12345678;

/// Tool name written into the generated-file banner.
pub const DEFAULT_BANNER: &str = "builder-bindgen";

/// Generator for the Rust side of the builder interface.
#[derive(Debug, Clone)]
pub struct RustEmitter {
    banner: String,
    integrity_check: IntegrityCheck,
    cookie: u64,
}

impl Default for RustEmitter {
    fn default() -> Self {
        RustEmitter {
            banner: DEFAULT_BANNER.to_string(),
            integrity_check: IntegrityCheck::Off,
            cookie: DEFAULT_COOKIE,
        }
    }
}

impl RustEmitter {
    /// Create an emitter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tool name shown in the banner.
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Enable or disable the receiver identity assertion.
    pub fn with_integrity_check(mut self, check: IntegrityCheck) -> Self {
        self.integrity_check = check;
        self
    }

    /// Set the cookie value the integrity check expects.
    pub fn with_cookie(mut self, cookie: u64) -> Self {
        self.cookie = cookie;
        self
    }

    /// Render the complete generated module.
    pub fn render(&self, methods: &[Method]) -> String {
        let mut output = String::new();

        output.push_str(&format!("// This file is autogenerated by {}\n", self.banner));
        output.push_str("// DO NOT MODIFY\n");
        output.push_str("#[repr(C)]\n");
        output.push_str("struct BuilderInterface {\n");
        for method in methods {
            output.push_str(&format!("\t{},\n", method.struct_field_signature()));
        }
        output.push_str("}\n");
        output.push_str("\n\n");

        for method in methods {
            output.push_str(&method.trampoline_definition(self.integrity_check, self.cookie));
        }
        output.push_str("\n\n");

        output.push_str("static CALLBACKS: BuilderInterface = BuilderInterface {\n");
        for method in methods {
            output.push_str(&format!("\t{}: {},\n", method.name, method.name));
        }
        output.push_str("};\n");

        output
    }

    /// Render the safe method signatures, one per line.
    pub fn render_safe_signatures(&self, methods: &[Method]) -> String {
        methods
            .iter()
            .map(|m| format!("{};\n", m.safe_signature()))
            .collect()
    }
}

/// Write generated text to `path`.
///
/// Opening and writing are reported separately so an unwritable destination
/// is distinguishable from a failed write.
pub fn write_output(path: &Path, contents: &str) -> Result<(), BindgenError> {
    use std::io::Write;

    let mut file = std::fs::File::create(path).map_err(|source| BindgenError::DestinationOpen {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|source| BindgenError::DestinationWrite {
            path: path.to_path_buf(),
            source,
        })
}
