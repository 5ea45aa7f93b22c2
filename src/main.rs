use anyhow::Context;
use std::io::Read;
use tracing_subscriber::EnvFilter;

use vartha::{
    config::Config,
    scoring::{StyleAnalyzer, TextAnalyzer},
};

/// Score the first argument, or stdin when no argument is given, and print
/// the full report as JSON.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let text = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let analyzer = StyleAnalyzer::new(Default::default(), config.preprocess_cache_capacity());
    let report = analyzer.analyze(&text);

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );
    Ok(())
}
