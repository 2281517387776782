use std::path::{Path, PathBuf};

use anyhow::Context;
use autodocstring::server::{bind_tcp, ServerRegistry};
use autodocstring::{create_service, discover_settings, load_settings, lookup_signature, Settings};
use clap::{Parser, Subcommand};
use tower_lsp::Server;
use tracing_subscriber::EnvFilter;

/// Python signature lookup server for docstring generation.
#[derive(Debug, Parser)]
#[command(name = "autodocstring", version, about)]
struct Cli {
    /// Settings file (default: nearest autodocstring.toml above the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `autodocstring=trace`. RUST_LOG wins.
    #[arg(long, global = true)]
    log_filter: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve over stdin/stdout (default).
    Stdio,
    /// Serve over TCP, one session per connection.
    Tcp {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the signature enclosing LINE of FILE as JSON.
    Lookup { file: PathBuf, line: usize },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => load_settings(path),
        None => {
            let cwd = std::env::current_dir().context("cannot read working directory")?;
            discover_settings(&cwd).0
        }
    };

    init_tracing(cli.log_filter.as_deref().or(settings.log_filter()));

    match cli.command.unwrap_or(Command::Stdio) {
        Command::Stdio => serve_stdio().await,
        Command::Tcp { host, port } => serve_tcp(&settings, host, port).await?,
        Command::Lookup { file, line } => lookup(&file, line)?,
    }
    Ok(())
}

/// Log to stderr; stdout carries the protocol in stdio mode.
fn init_tracing(filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or("info")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve_stdio() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_service();
    Server::new(stdin, stdout, socket).serve(service).await;
}

async fn serve_tcp(
    settings: &Settings,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let host = host.as_deref().unwrap_or(settings.host());
    let port = port.unwrap_or(settings.port());

    let registry = ServerRegistry::new();
    let server = bind_tcp(&registry, host, port).await?;
    server.serve().await?;
    Ok(())
}

fn lookup(file: &Path, line: usize) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let record = lookup_signature(&source, line)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
