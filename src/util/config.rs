//! Configuration file support for builder-bindgen.
//!
//! An optional TOML file passed with `--config` can set generation options:
//!
//! ```toml
//! [generate]
//! integrity_check = "on"
//! cookie = 12345678
//! header = "third_party/parser/include/ruby_parser/builder.hh"
//! banner = "builder-bindgen"
//! ```
//!
//! Command-line flags take precedence over the file, which takes precedence
//! over built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bindings::{IntegrityCheck, RustEmitter, DEFAULT_BANNER, DEFAULT_COOKIE};

/// builder-bindgen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Generation settings
    pub generate: GenerateConfig,
}

/// Generation-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Emit a receiver identity assertion in every trampoline
    pub integrity_check: Option<IntegrityCheck>,

    /// Cookie value the identity assertion expects
    pub cookie: Option<u64>,

    /// Header to scan instead of the bundled one
    pub header: Option<PathBuf>,

    /// Tool name written in the generated banner
    pub banner: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.generate.integrity_check.is_some() {
            self.generate.integrity_check = other.generate.integrity_check;
        }
        if other.generate.cookie.is_some() {
            self.generate.cookie = other.generate.cookie;
        }
        if other.generate.header.is_some() {
            self.generate.header = other.generate.header;
        }
        if other.generate.banner.is_some() {
            self.generate.banner = other.generate.banner;
        }
    }

    /// Effective integrity check setting.
    pub fn integrity_check(&self) -> IntegrityCheck {
        self.generate.integrity_check.unwrap_or_default()
    }

    /// Build an emitter from these settings.
    pub fn emitter(&self) -> RustEmitter {
        RustEmitter::new()
            .with_banner(self.generate.banner.as_deref().unwrap_or(DEFAULT_BANNER))
            .with_integrity_check(self.integrity_check())
            .with_cookie(self.generate.cookie.unwrap_or(DEFAULT_COOKIE))
    }
}

/// Header scanned when neither `--header` nor the config names one.
///
/// Fixed relative to this crate's own location.
pub fn default_header_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("include")
        .join("ruby_parser")
        .join("builder.hh")
}
