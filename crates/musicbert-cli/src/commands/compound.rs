use crate::args::Flags;
use anyhow::{Result, anyhow};
use musicbert_vocab::{CompoundShape, DEFAULT_COMPOUND_RATIO};
use std::io::Write;

/// Executes the compound command
pub fn execute(args: &[String], out: &mut dyn Write) -> Result<()> {
    let flags = Flags::parse(args, &["--length", "--batch", "--ratio", "--past"], &[])?;

    let length = flags
        .parsed::<usize>("--length")?
        .ok_or_else(|| anyhow!("--length is required"))?;
    let batch = flags.parsed::<usize>("--batch")?.unwrap_or(1);
    let ratio = flags
        .parsed::<usize>("--ratio")?
        .unwrap_or(DEFAULT_COMPOUND_RATIO);
    let past = flags.parsed::<usize>("--past")?.unwrap_or(0);

    let shape = CompoundShape::new(batch, length, ratio)?;
    let (rows, cols) = shape.attention_mask_shape(past);

    writeln!(out, "raw_seq_len: {}", shape.raw_seq_len())?;
    writeln!(out, "ratio: {}", shape.ratio())?;
    writeln!(out, "logical_seq_len: {}", shape.logical_seq_len())?;
    writeln!(out, "attention_mask_shape: [{}, {}]", rows, cols)?;
    Ok(())
}
