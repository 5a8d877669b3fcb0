//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use builder_bindgen::bindings::IntegrityCheck;
use builder_bindgen::util::config::{Config, GenerateConfig};
use builder_bindgen::Destination;

/// builder-bindgen - generate Rust bindings for the parser's builder interface
#[derive(Parser)]
#[command(name = "builder-bindgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Generate the Rust module into FILE, or to stdout when FILE is omitted
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub rs: Option<Option<PathBuf>>,

    /// Fail if FILE differs from what would be generated
    #[arg(long, value_name = "FILE", conflicts_with_all = ["rs", "dump_methods", "safe_signatures"])]
    pub check: Option<PathBuf>,

    /// Print the scanned methods as JSON
    #[arg(long, conflicts_with_all = ["rs", "safe_signatures"])]
    pub dump_methods: bool,

    /// Print the safe method signatures to implement
    #[arg(long, conflicts_with = "rs")]
    pub safe_signatures: bool,

    /// Header to scan instead of the bundled builder.hh
    #[arg(long, value_name = "PATH")]
    pub header: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit a receiver identity assertion in every trampoline (off, on)
    #[arg(long, value_name = "MODE")]
    pub integrity_check: Option<IntegrityCheck>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a single invocation does.
#[derive(Debug)]
pub enum Action {
    Generate(Destination),
    Check(PathBuf),
    DumpMethods,
    SafeSignatures,
}

impl Cli {
    /// The requested action; `None` means nothing to do.
    pub fn action(&self) -> Option<Action> {
        if let Some(value) = &self.rs {
            Some(Action::Generate(Destination::from_flag(value.clone())))
        } else if let Some(path) = &self.check {
            Some(Action::Check(path.clone()))
        } else if self.dump_methods {
            Some(Action::DumpMethods)
        } else if self.safe_signatures {
            Some(Action::SafeSignatures)
        } else {
            None
        }
    }

    /// Settings given on the command line, as a config layer.
    pub fn overrides(&self) -> Config {
        Config {
            generate: GenerateConfig {
                integrity_check: self.integrity_check,
                header: self.header.clone(),
                ..Default::default()
            },
        }
    }
}
