//! Refboard CLI — entry point.
//!
//! Runs one render cycle against a collection endpoint and writes the
//! resulting container HTML to stdout or a file. Failure is reported
//! the same way the library reports it everywhere: as the error banner
//! inside the container.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use refboard::{CollectionClient, CollectionRenderer, HtmlTarget, DEFAULT_ENDPOINT};

#[derive(Parser)]
#[command(
    name = "refboard",
    about = "Render a bibliographic collection endpoint as an APA HTML bibliography",
    version
)]
struct Cli {
    /// Collection endpoint: absolute URL, or a path joined onto --base.
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Base origin for relative endpoints (e.g. https://refs.example.org).
    #[arg(short, long)]
    base: Option<String>,

    /// Write the container HTML here instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Request timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let mut client = CollectionClient::new(cli.timeout_ms);
    if let Some(base) = &cli.base {
        client = client.with_base(url::Url::parse(base)?);
    }
    let renderer = CollectionRenderer::new(client);

    let endpoint = cli.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let mut target = HtmlTarget::new("div").with_attribute("id", "refs");
    renderer.render(&endpoint, &mut target).await;

    let html = target.to_html();
    match cli.out {
        Some(path) => std::fs::write(&path, html)?,
        None => println!("{html}"),
    }

    Ok(())
}
