use clap::Parser;
use color_eyre::Result;
use rangefetch::downloader::config::{DEFAULT_CHUNK_SIZE_KB, DEFAULT_OUTPUT, DEFAULT_URL};
use rangefetch::{DownloaderBuilder, ProgressBarOpts, ProgressEvent};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Download a file in byte ranges and print its SHA-256 digest.
#[derive(Parser, Debug)]
#[command(name = "rangefetch", version, about)]
struct Cli {
    /// The server URL to download from
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// The output file name
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Chunk size in kilobytes
    #[arg(long = "chunk-size", value_name = "KB", default_value_t = DEFAULT_CHUNK_SIZE_KB)]
    chunk_size: u64,

    /// Expected SHA-256 digest of the downloaded file
    #[arg(long, value_name = "HEX")]
    sha256: Option<String>,

    /// Retries allowed per byte range
    #[arg(long)]
    retries: Option<u32>,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

/// Keep only arguments the parser accepts, so unknown or malformed flags are
/// ignored and their defaults apply.
fn accepted_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .enumerate()
        .filter(|(i, arg)| {
            if *i == 0 {
                return true;
            }
            if matches!(arg.as_str(), "--help" | "-h" | "--version" | "-V" | "--quiet") {
                return true;
            }
            let Some((name, value)) = arg.split_once('=') else {
                return false;
            };
            match name {
                "--url" | "--output" | "--sha256" => !value.is_empty(),
                "--chunk-size" => value.parse::<u64>().is_ok_and(|kb| kb > 0),
                "--retries" => value.parse::<u32>().is_ok(),
                _ => false,
            }
        })
        .map(|(_, arg)| arg)
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(accepted_args(std::env::args()));

    println!("Using server: {}", cli.url);
    println!("Output file: {}", cli.output.display());
    println!("Chunk size: {} KB\n", cli.chunk_size);

    let mut builder = DownloaderBuilder::new()
        .url(cli.url)
        .output(cli.output)
        .chunk_size_kb(cli.chunk_size)
        .on_progress(|event| {
            if let ProgressEvent::ChunkFailed { .. } = event {
                eprintln!("{}", event);
            }
        });
    if let Some(retries) = cli.retries {
        builder = builder.retries(retries);
    }
    if let Some(digest) = cli.sha256 {
        builder = builder.expected_sha256(digest);
    }
    if cli.quiet {
        builder = builder.progress_bar(ProgressBarOpts::hidden());
    }

    let summary = builder.build().download().await?;

    println!("\nDownload complete.");
    println!("SHA-256: {}", summary.digest());

    Ok(())
}
