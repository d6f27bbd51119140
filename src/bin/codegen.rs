//! Code generation CLI
//!
//! Loads the schema directory and writes one generated Go file per field
//! group, plus the shared version file, into the output directory.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use fieldgen::{codegen, Config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fieldgen-codegen")]
#[command(about = "Generate Go type declarations from field-group schemas")]
struct Cli {
    /// Schema directory containing .yml files
    #[arg(long, default_value = "schemas/")]
    schema: PathBuf,

    /// Output directory for generated .go files
    #[arg(long, default_value = "code/go/ecs")]
    out: PathBuf,

    /// Schema version stamped into the generated code (required)
    #[arg(long)]
    version: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new(cli.schema, cli.out, cli.version);
    let artifacts = codegen::generate(&config)?;

    fs::create_dir_all(&config.out_dir)?;
    for artifact in &artifacts {
        fs::write(config.out_dir.join(&artifact.name), &artifact.content)?;
    }

    println!(
        "Wrote {} files to {}",
        artifacts.len(),
        config.out_dir.display()
    );
    Ok(())
}
