use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use components::config::RecordsConfig;
use components::shell::Shell;
use components::storage::student_file::StudentFile;

mod components;
#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = RecordsConfig::from_env();
    tracing::info!(
        "Using records file {} ({:?} output)",
        config.data_file.display(),
        config.output_format
    );

    let store = StudentFile::new(&config.data_file);
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut shell = Shell::new(
        store,
        config.output_format,
        stdin.lock(),
        BufWriter::new(stdout.lock()),
    );
    shell.run().context("terminal I/O failed")?;

    Ok(())
}

/// Diagnostics go to stderr so they never interleave with the menu on stdout.
fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
