//! Generate, check, and inspect builder bindings.
//!
//! Every operation scans and renders fully in memory before touching the
//! destination, so a scan failure never truncates an existing output file.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::bindings::{write_output, BindgenError, HeaderScanner, Method, RustEmitter, TypeCatalog};
use crate::util::config::{default_header_path, Config};
use crate::util::fs::read_if_exists;

/// Where generated text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output
    Stdout,
    /// A file, truncated and overwritten
    File(PathBuf),
}

impl Destination {
    /// `--rs` with no value means stdout.
    pub fn from_flag(value: Option<PathBuf>) -> Self {
        match value {
            Some(path) => Destination::File(path),
            None => Destination::Stdout,
        }
    }
}

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Header to scan
    pub header: PathBuf,
    /// Type catalog used by the scanner
    pub catalog: TypeCatalog,
    /// Emitter settings
    pub emitter: RustEmitter,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            header: default_header_path(),
            catalog: TypeCatalog::default(),
            emitter: RustEmitter::default(),
        }
    }
}

impl GenerateOptions {
    /// Build options from a loaded config.
    pub fn from_config(config: &Config) -> Self {
        GenerateOptions {
            header: config
                .generate
                .header
                .clone()
                .unwrap_or_else(default_header_path),
            catalog: TypeCatalog::default(),
            emitter: config.emitter(),
        }
    }

    /// Set the header path.
    pub fn with_header(mut self, header: impl Into<PathBuf>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the type catalog.
    pub fn with_catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the emitter.
    pub fn with_emitter(mut self, emitter: RustEmitter) -> Self {
        self.emitter = emitter;
        self
    }
}

/// Scan the configured header.
pub fn scan_header(opts: &GenerateOptions) -> Result<Vec<Method>, BindgenError> {
    HeaderScanner::with_catalog(opts.catalog.clone()).scan_file(&opts.header)
}

/// Scan the header and render the generated module.
pub fn render(opts: &GenerateOptions) -> Result<String, BindgenError> {
    let methods = scan_header(opts)?;
    Ok(opts.emitter.render(&methods))
}

/// Regenerate and write to `dest`; `stdout` receives output for [`Destination::Stdout`].
pub fn generate(opts: &GenerateOptions, dest: &Destination, stdout: &mut dyn Write) -> Result<()> {
    let text = render(opts)?;

    match dest {
        Destination::Stdout => {
            stdout
                .write_all(text.as_bytes())
                .context("failed to write generated bindings to stdout")?;
        }
        Destination::File(path) => {
            write_output(path, &text)?;
            tracing::info!("Generated {}", path.display());
        }
    }

    Ok(())
}

/// Fail with [`BindgenError::Stale`] unless `path` holds exactly what would be generated.
pub fn check(opts: &GenerateOptions, path: &Path) -> Result<()> {
    let expected = render(opts)?;
    let existing = read_if_exists(path)?;

    if existing.as_deref() != Some(expected.as_str()) {
        return Err(BindgenError::Stale {
            path: path.to_path_buf(),
        }
        .into());
    }

    tracing::info!("{} is up to date", path.display());
    Ok(())
}

/// Scanned methods as pretty-printed JSON.
pub fn dump_methods(opts: &GenerateOptions) -> Result<String> {
    let methods = scan_header(opts)?;
    serde_json::to_string_pretty(&methods).context("failed to serialize builder methods")
}

/// Safe signatures for the hand-written implementation.
pub fn safe_signatures(opts: &GenerateOptions) -> Result<String> {
    let methods = scan_header(opts)?;
    Ok(opts.emitter.render_safe_signatures(&methods))
}
