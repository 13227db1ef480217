//! Sequence-length bookkeeping for compound (OctupleMIDI) inputs.
//!
//! Each musical event is encoded as `ratio` consecutive input ids, so a
//! model's raw input length is `ratio` times the number of positions the
//! encoder attends over. Attention masks must be built from the logical
//! length, not the raw one.

use crate::{Result, VocabError};

/// Input ids per event in the OctupleMIDI encoding.
pub const DEFAULT_COMPOUND_RATIO: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundShape {
    batch_size: usize,
    raw_seq_len: usize,
    ratio: usize,
}

impl CompoundShape {
    /// Fails unless `ratio` is non-zero and divides `raw_seq_len`.
    pub fn new(batch_size: usize, raw_seq_len: usize, ratio: usize) -> Result<Self> {
        if ratio == 0 {
            return Err(VocabError::Compound(
                "Compound ratio must be greater than zero".to_string(),
            ));
        }
        if raw_seq_len % ratio != 0 {
            return Err(VocabError::Compound(format!(
                "Sequence length must be divisible by {} (got {})",
                ratio, raw_seq_len
            )));
        }
        Ok(Self {
            batch_size,
            raw_seq_len,
            ratio,
        })
    }

    pub fn octuple(batch_size: usize, raw_seq_len: usize) -> Result<Self> {
        Self::new(batch_size, raw_seq_len, DEFAULT_COMPOUND_RATIO)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn raw_seq_len(&self) -> usize {
        self.raw_seq_len
    }

    pub fn ratio(&self) -> usize {
        self.ratio
    }

    pub fn logical_seq_len(&self) -> usize {
        self.raw_seq_len / self.ratio
    }

    /// `(batch, logical_len + past_len)`, the shape of the all-ones
    /// attention mask used when the caller supplies none.
    pub fn attention_mask_shape(&self, past_len: usize) -> (usize, usize) {
        (self.batch_size, self.logical_seq_len() + past_len)
    }
}
