//! Command-line interface for field-coerce
//!
//! # Usage Examples
//!
//! ## Normalize records
//! ```bash
//! # Normalize a JSONL file, skipping records that do not fit the schema
//! field-coerce normalize \
//!   --schema places.yaml \
//!   --input places.jsonl \
//!   --output places.normalized.jsonl
//!
//! # Stop at the first bad record and save dynamically mapped fields
//! cat places.jsonl | field-coerce normalize \
//!   --schema places.yaml \
//!   --fail-fast \
//!   --mappings-out places.mapped.yaml
//! ```
//!
//! ## Coerce a single value
//! ```bash
//! field-coerce convert --to unsigned 123
//! field-coerce convert --to geo_point 45.0,-122.0
//! field-coerce convert --to bool '"True"'
//! ```
//!
//! Set `RUST_LOG=debug` to see per-field mapping decisions.

use anyhow::Context;
use clap::{Parser, Subcommand};
use field_coerce::coerce::FieldType;
use field_coerce::json::{coerced_to_json, json_to_dynamic};
use field_coerce::{jsonl, NormalizeOpts};

#[derive(Parser)]
#[command(name = "field-coerce")]
#[command(about = "Coerce loosely-typed record fields into index field types")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize JSONL records against an index schema
    Normalize {
        #[command(flatten)]
        opts: NormalizeOpts,
    },

    /// Coerce a single value and print it as JSON
    Convert {
        /// Target field type (text, keyword, numeric, unsigned, integer, bool, geo_point)
        #[arg(long)]
        to: FieldType,

        /// Value as a JSON literal; anything that is not valid JSON is taken as a string
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize { opts } => {
            jsonl::run_normalize(&opts)?;
        }
        Commands::Convert { to, value } => {
            let json = serde_json::from_str(&value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
            let dynamic = json_to_dynamic(json);
            tracing::debug!("Converting {} value to {to}", dynamic.type_name());

            let coerced = to
                .coerce(&dynamic)
                .with_context(|| format!("Cannot convert '{value}' to {to}"))?;
            println!("{}", coerced_to_json(&coerced));
        }
    }

    Ok(())
}
