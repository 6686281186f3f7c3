use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devnorm", about = "Normalize heterogeneous device-telemetry records")]
struct Cli {
    /// Path to a JSON file holding one raw telemetry record.
    input: PathBuf,
    /// Emit compact single-line JSON instead of pretty-printing.
    #[arg(long)]
    compact: bool,
    /// Write debug logs to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = devnorm_core::config::Config::load()?;

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.filter)),
            )
            .init();
    }

    let raw = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let record: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {} as JSON", cli.input.display()))?;

    if let Some(shape) = record.as_object() {
        if let Ok(format) = devnorm_core::detect(shape) {
            tracing::debug!(%format, "record shape detected");
        }
    }

    let canonical = devnorm_core::normalize(&record)
        .with_context(|| format!("normalizing {}", cli.input.display()))?;

    let rendered = if cli.compact || !cfg.output.pretty {
        serde_json::to_string(&canonical)?
    } else {
        serde_json::to_string_pretty(&canonical)?
    };
    println!("{rendered}");
    Ok(())
}
