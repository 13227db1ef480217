use super::vocab::SOURCE_OPTIONS;
use crate::args::Flags;
use anyhow::{Context, Result};
use musicbert_vocab::handle_vocab;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Write;

/// Executes the index command
///
/// Prints `{"index_to_token": {...}, "token_to_index": {...}}` with keys in
/// sorted order.
pub fn execute(args: &[String], out: &mut dyn Write) -> Result<()> {
    let flags = Flags::parse(args, &SOURCE_OPTIONS, &[])?;

    let csv_dir = flags.path("--csv-dir");
    let path = flags.path("--path");
    let (itos, stoi) = handle_vocab(csv_dir.as_deref(), flags.value("--feature"), path.as_deref())
        .context("Failed to build index mappings")?;

    let itos: BTreeMap<i64, String> = itos.into_iter().collect();
    let stoi: BTreeMap<String, i64> = stoi.into_iter().collect();
    let report = json!({
        "index_to_token": itos,
        "token_to_index": stoi,
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}
