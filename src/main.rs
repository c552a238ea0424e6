//! Command line front end for the davkit WebDAV client
//!
//! Usage: davkit --base-url https://dav.example.com/files <COMMAND>
//!
//! Connection settings can also come from `DAVKIT_BASE_URL`, `DAVKIT_HEADERS`
//! and `DAVKIT_TIMEOUT_MS`, optionally loaded from a `.env` file. Command line
//! values take precedence; headers from both sources are sent.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use davkit::webdav::config::parse_header_pair;
use davkit::{ContentSource, DavOutcome, TransportOptions, WebDAVClient, WebDAVConfig};

#[derive(Parser)]
#[command(name = "davkit")]
#[command(about = "Read, write and organize files on a WebDAV server")]
struct Args {
    /// Base URL of the WebDAV root collection
    #[arg(long)]
    base_url: Option<String>,

    /// Extra request header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download a resource
    Get {
        path: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Upload a local file
    Put { local: PathBuf, path: String },
    /// Move a resource
    Mv {
        source: String,
        destination: String,
        /// Fail instead of replacing an existing destination
        #[arg(long)]
        no_overwrite: bool,
    },
    /// Copy a resource
    Cp {
        source: String,
        destination: String,
        /// Fail instead of replacing an existing destination
        #[arg(long)]
        no_overwrite: bool,
    },
    /// Delete a resource or collection
    Rm { path: String },
    /// Create a collection
    Mkdir {
        path: String,
        /// Create missing parent collections as well
        #[arg(short, long)]
        parents: bool,
    },
}

fn build_config(args: &Args) -> Result<WebDAVConfig> {
    let mut headers = Vec::new();
    for raw in &args.headers {
        headers.push(parse_header_pair(raw)?);
    }

    let mut transport_options = TransportOptions::new();
    if let Some(timeout_ms) = args.timeout_ms {
        transport_options = transport_options.with("timeout_ms", timeout_ms);
    }

    let overrides = WebDAVConfig {
        base_url: args.base_url.clone().unwrap_or_default(),
        headers,
        transport_options,
    };

    let env = WebDAVConfig::env_overrides().context("Invalid DAVKIT_* environment variable")?;
    debug!("Environment base URL set: {}", !env.base_url.is_empty());

    let defaults = WebDAVConfig::merge(&WebDAVConfig::new(""), &env);
    let config = WebDAVConfig::merge(&defaults, &overrides);
    config
        .validate()
        .context("A base URL is required (--base-url or DAVKIT_BASE_URL)")?;
    Ok(config)
}

fn describe(outcome: &DavOutcome) -> &'static str {
    match outcome {
        DavOutcome::Body(_) => "downloaded",
        DavOutcome::Created => "created",
        DavOutcome::Updated => "updated",
        DavOutcome::Moved => "moved",
        DavOutcome::Copied => "copied",
        DavOutcome::Deleted => "deleted",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so `get` can stream to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("davkit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    info!("Using WebDAV server at {}", config.base_url);

    let client = WebDAVClient::new(config)?;

    let outcome = match args.command {
        Command::Get { path, output } => {
            let body = client
                .get(&path)
                .await
                .with_context(|| format!("Failed to download {}", path))?;
            match output {
                Some(file) => tokio::fs::write(&file, &body)
                    .await
                    .with_context(|| format!("Failed to write {}", file.display()))?,
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(&body)?;
                }
            }
            DavOutcome::Body(body)
        }
        Command::Put { local, path } => client
            .put(&path, ContentSource::FilePath(local))
            .await
            .with_context(|| format!("Failed to upload {}", path))?,
        Command::Mv { source, destination, no_overwrite } => client
            .move_resource_with_overwrite(&source, &destination, !no_overwrite)
            .await
            .with_context(|| format!("Failed to move {} to {}", source, destination))?,
        Command::Cp { source, destination, no_overwrite } => client
            .copy_resource_with_overwrite(&source, &destination, !no_overwrite)
            .await
            .with_context(|| format!("Failed to copy {} to {}", source, destination))?,
        Command::Rm { path } => client
            .delete(&path)
            .await
            .with_context(|| format!("Failed to delete {}", path))?,
        Command::Mkdir { path, parents } => {
            let result = if parents {
                client.mkcol_recursive(&path).await
            } else {
                client.mkcol(&path).await
            };
            result.with_context(|| format!("Failed to create collection {}", path))?
        }
    };

    info!("Done: {}", describe(&outcome));
    Ok(())
}
