//! godoc CLI: search the Go package index and read package documentation from a terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use godoc_client::{GoDocClient, PackageSource};
use godoc_core::{AppConfig, Package};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// godoc - Go package documentation as Markdown
#[derive(Parser, Debug)]
#[command(name = "godoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for packages by name or keyword
    Search {
        /// Package name or keywords
        query: String,
    },
    /// Print the documentation of a package page
    Details {
        /// Package page URL, e.g. https://pkg.go.dev/net/http
        url: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let client = GoDocClient::new(&config)?;

    let output = match cli.command {
        Commands::Search { query } => {
            let packages = client.search(&query).await?;
            if cli.json { serde_json::to_string_pretty(&packages)? } else { format_search(&packages) }
        }
        Commands::Details { url } => {
            let package = client.details(&url).await?;
            if cli.json { serde_json::to_string_pretty(&package)? } else { format_details(&package) }
        }
    };

    writeln_safe(&output);
    Ok(())
}

/// One package per line: name, then URL.
fn format_search(packages: &[Package]) -> String {
    if packages.is_empty() {
        return "no packages found".to_string();
    }

    let width = packages.iter().map(|p| p.name.len()).max().unwrap_or(0);
    packages
        .iter()
        .map(|p| format!("{:width$}  {}", p.name, p.url))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Documentation with a metadata frontmatter block.
fn format_details(package: &Package) -> String {
    let mut output = String::from("---\n");
    output.push_str(&format!("name: {}\n", package.name));
    output.push_str(&format!("url: {}\n", package.url));
    if !package.version.is_empty() {
        output.push_str(&format!("version: {}\n", package.version));
    }
    if !package.description.is_empty() {
        output.push_str(&format!("description: {}\n", package.description));
    }
    output.push_str("---\n");
    output.push_str(&package.documentation);
    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{s}") {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {e}");
        std::process::exit(1);
    }
}
