use crate::args::{Flags, split_list};
use anyhow::{Context, Result};
use musicbert_vocab::{FrequencyScope, SortMode, VocabConfig, get_vocab};
use std::io::Write;
use tracing::info;

pub(crate) const SOURCE_OPTIONS: [&str; 3] = ["--csv-dir", "--feature", "--path"];
const CONFIG_OPTIONS: [&str; 4] = ["--sort", "--specials", "--frequency-scope", "--config"];

/// Executes the vocab command
pub fn execute(args: &[String], out: &mut dyn Write) -> Result<()> {
    let options: Vec<&str> = SOURCE_OPTIONS.iter().chain(&CONFIG_OPTIONS).copied().collect();
    let flags = Flags::parse(args, &options, &["--json"])?;
    let config = resolve_config(&flags)?;

    let csv_dir = flags.path("--csv-dir");
    let path = flags.path("--path");
    let vocab = get_vocab(
        csv_dir.as_deref(),
        flags.value("--feature"),
        path.as_deref(),
        &config,
    )
    .context("Failed to build vocabulary")?;

    info!("Vocabulary has {} tokens", vocab.len());

    if flags.has("--json") {
        writeln!(out, "{}", serde_json::to_string_pretty(&vocab)?)?;
    } else {
        for token in &vocab {
            writeln!(out, "{}", token)?;
        }
    }
    Ok(())
}

/// Config file first (if any), then individual flags on top.
fn resolve_config(flags: &Flags) -> Result<VocabConfig> {
    let mut config = match flags.path("--config") {
        Some(path) => VocabConfig::from_file(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => VocabConfig::default(),
    };

    if let Some(sort) = flags.parsed::<SortMode>("--sort")? {
        config.sort = sort;
    }
    if let Some(scope) = flags.parsed::<FrequencyScope>("--frequency-scope")? {
        config.frequency_scope = scope;
    }
    if let Some(raw) = flags.value("--specials") {
        config.specials = split_list(raw);
    }

    config.validate()?;
    Ok(config)
}
