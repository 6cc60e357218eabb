//! Normalizes a raw provider quote and prints the canonical quote as JSON.
//!
//! ```text
//! echo '{"base":"usd","quote":"eur","bid":0.90,"ask":0.92}' \
//!     | normalize_quote --provider-id 7 --amount 100
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use fx_quotes::application::services::{ExpiryPolicy, QuoteNormalizer, QuoteRanker};
use fx_quotes::domain::entities::CanonicalQuote;
use fx_quotes::domain::value_objects::{ProviderId, RawQuote};
use fx_quotes::infrastructure::settings::Settings;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Normalize an FX provider quote payload.
#[derive(Debug, Parser)]
#[command(name = "normalize_quote", version, about)]
struct Cli {
    /// Raw quote JSON file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Provider identifier attached to the canonical quote.
    #[arg(short, long, default_value_t = 0)]
    provider_id: u64,

    /// Amount to convert at the effective rate.
    #[arg(short, long)]
    amount: Option<f64>,

    /// Fail on an unparsable `expires_at` instead of using the default TTL.
    #[arg(long)]
    strict: bool,

    /// Print the JSON schema of the canonical quote and exit.
    #[arg(long)]
    schema: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if cli.schema {
        let schema = schemars::schema_for!(CanonicalQuote);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let mut config = Settings::load().context("loading settings")?.normalizer;
    if cli.strict {
        config = config.with_expiry_policy(ExpiryPolicy::Strict);
    }

    let text = read_input(cli.input.as_deref())?;
    let raw = RawQuote::from_json_str(&text).context("parsing raw quote")?;
    let quote = QuoteNormalizer::new(config)
        .normalize_with_policy(&raw, ProviderId::new(cli.provider_id))
        .context("normalizing quote")?;

    let mut output = serde_json::to_value(&quote)?;
    if let (Some(amount), Some(fields)) = (cli.amount, output.as_object_mut()) {
        fields.insert(
            "effective_rate".into(),
            QuoteRanker::effective_rate(&quote).into(),
        );
        fields.insert(
            "converted_amount".into(),
            QuoteRanker::converted_amount(&quote, amount).into(),
        );
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
