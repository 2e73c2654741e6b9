//! JSONL normalization.
//!
//! Reads one JSON object per line, normalizes it against an index schema
//! and writes the normalized object as one JSON line.

use crate::NormalizeOpts;
use anyhow::{bail, Context, Result};
use coerce_core::{IndexSchema, NormalizeStats, Normalizer};
use json_values::{document_from_str, normalized_to_json};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

/// Outcome of a JSONL normalization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonlSummary {
    /// Counters from the normalizer
    pub stats: NormalizeStats,

    /// Lines that were not a JSON object
    pub malformed_lines: usize,
}

/// Normalize every record from `reader`, writing results to `writer`.
///
/// Blank lines are ignored. Malformed lines and rejected records are
/// skipped with a warning unless the normalizer is in fail-fast mode.
pub fn normalize_reader<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    normalizer: &mut Normalizer,
) -> Result<JsonlSummary> {
    let fail_fast = normalizer.fail_fast();
    let mut summary = JsonlSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let document = match document_from_str(&line) {
            Ok(document) => document,
            Err(e) if fail_fast => bail!("Line {line_no}: {e}"),
            Err(e) => {
                tracing::warn!("Skipping line {line_no}: {e}");
                summary.malformed_lines += 1;
                continue;
            }
        };

        let normalized = normalizer
            .normalize(&document)
            .with_context(|| format!("Line {line_no}: record rejected"))?;

        if let Some(normalized) = normalized {
            serde_json::to_writer(&mut *writer, &normalized_to_json(&normalized))
                .with_context(|| format!("Failed to write record from line {line_no}"))?;
            writer.write_all(b"\n")?;
        }
    }

    writer.flush()?;
    summary.stats = normalizer.stats();
    Ok(summary)
}

/// Run the `normalize` command.
pub fn run_normalize(opts: &NormalizeOpts) -> Result<JsonlSummary> {
    tracing::info!("Loading schema from {:?}", opts.schema);
    let schema = IndexSchema::from_file(&opts.schema)
        .with_context(|| format!("Failed to load schema {:?}", opts.schema))?;
    tracing::debug!(
        "Index '{}' declares {} fields (dynamic: {:?})",
        schema.name,
        schema.fields.len(),
        schema.dynamic
    );

    let reader: Box<dyn BufRead> = match &opts.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input {path:?}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut writer: Box<dyn Write> = match &opts.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create output {path:?}"))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let mut normalizer = Normalizer::new(schema, opts.fail_fast);
    let summary = normalize_reader(reader, &mut writer, &mut normalizer)?;

    tracing::info!(
        "Normalized {} of {} records ({} rejected, {} malformed lines, {} new fields)",
        summary.stats.normalized,
        summary.stats.documents,
        summary.stats.rejected,
        summary.malformed_lines,
        summary.stats.fields_mapped
    );

    if let Some(path) = &opts.mappings_out {
        let yaml = serde_yaml::to_string(normalizer.schema())
            .context("Failed to serialize schema")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write mappings to {path:?}"))?;
        tracing::info!("Wrote mappings to {path:?}");
    }

    Ok(summary)
}
