//! builder-bindgen CLI

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;

use builder_bindgen::ops;
use builder_bindgen::util::fs::resolve_relative;
use builder_bindgen::{BindgenError, Config, GenerateOptions};
use cli::{Action, Cli};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = e.downcast_ref::<BindgenError>().and_then(|d| d.help()) {
            eprintln!("help: {}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for generated text
    let filter = if cli.verbose {
        EnvFilter::new("builder_bindgen=debug")
    } else {
        EnvFilter::new("builder_bindgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let Some(action) = cli.action() else {
        tracing::debug!("no action requested");
        return Ok(());
    };

    let config = load_config(&cli)?;
    let opts = GenerateOptions::from_config(&config);
    tracing::debug!("header: {}", opts.header.display());

    let mut stdout = std::io::stdout().lock();
    match action {
        Action::Generate(dest) => ops::generate(&opts, &dest, &mut stdout),
        Action::Check(path) => ops::check(&opts, &path),
        Action::DumpMethods => {
            let json = ops::dump_methods(&opts)?;
            writeln!(stdout, "{}", json)?;
            Ok(())
        }
        Action::SafeSignatures => {
            write!(stdout, "{}", ops::safe_signatures(&opts)?)?;
            Ok(())
        }
    }
}

/// Layer defaults, the config file, and command-line flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::default();

    if let Some(path) = &cli.config {
        let mut file_config = Config::load(path)?;

        // A relative header path in the config is relative to the config file
        if let (Some(header), Some(dir)) = (&file_config.generate.header, path.parent()) {
            file_config.generate.header = Some(resolve_relative(dir, header));
        }
        config.merge(file_config);
    }

    config.merge(cli.overrides());
    Ok(config)
}
