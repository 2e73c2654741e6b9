//! field-coerce library
//!
//! Normalizes loosely-typed records into the field types an index declares.
//!
//! # Features
//!
//! - Scalar coercion: text, float, unsigned, int and bool from any decoded value
//! - Geo points: `"lat,lon"` parsing with range validation
//! - Index schemas: declared field types loaded from YAML, with dynamic mapping
//! - JSONL normalization: stream records through a schema
//!
//! # CLI Usage
//!
//! ```bash
//! # Normalize a JSONL file against a schema
//! field-coerce normalize --schema places.yaml --input places.jsonl --output out.jsonl
//!
//! # Coerce a single value
//! field-coerce convert --to geo_point '"45.0,-122.0"'
//! ```

use clap::Parser;
use std::path::PathBuf;

pub mod jsonl;

// Re-export the coercion crates for convenience
pub use coerce_core as coerce;
pub use json_values as json;

#[derive(Parser, Clone, Debug)]
pub struct NormalizeOpts {
    /// Index schema file (YAML)
    #[arg(long, value_name = "PATH", env = "FIELD_COERCE_SCHEMA")]
    pub schema: PathBuf,

    /// JSONL input file (reads stdin when omitted)
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// JSONL output file (writes stdout when omitted)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Abort on the first rejected record instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,

    /// Write the schema, including dynamically mapped fields, to this file
    #[arg(long, value_name = "PATH")]
    pub mappings_out: Option<PathBuf>,
}
