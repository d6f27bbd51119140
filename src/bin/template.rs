//! Index-template CLI
//!
//! Compiles the schema directory into an Elasticsearch legacy index-template
//! document and prints it to standard output.

use std::path::PathBuf;

use clap::Parser;
use fieldgen::{template, Config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fieldgen-template")]
#[command(about = "Compile field-group schemas into an index-template document")]
struct Cli {
    /// Schema directory containing .yml files
    #[arg(long, default_value = "schemas/")]
    schema: PathBuf,

    /// Schema version recorded in the template metadata (required)
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
    let config = Config::new(cli.schema, PathBuf::from("code/go/ecs"), cli.version);
    let rendered = template::generate(&config)?;
    print!("{}", rendered);
    Ok(())
}
