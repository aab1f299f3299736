//! Errors produced while building a training example.

use std::fmt;

use thiserror::Error;

/// Which side of the pair a length failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExampleError {
    /// The encoded sentence plus its reserved slots does not fit in `seq_len`.
    /// `capacity` is the number of content tokens that would have fit.
    #[error("{side} sequence too long: {tokens} tokens, room for {capacity}")]
    SequenceTooLong {
        side: Side,
        tokens: usize,
        capacity: usize,
    },

    /// The target vocabulary does not define a reserved symbol.
    #[error("target vocabulary has no id for reserved token {0:?}")]
    UnknownReservedToken(String),

    /// The raw record has no sentence for the configured language.
    #[error("record {index} has no sentence for language {lang:?}")]
    MissingLanguage { index: usize, lang: String },

    /// The raw dataset returned nothing for this index.
    #[error("index {index} out of range for dataset of {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    /// The tokenizer failed to encode a sentence.
    #[error("failed to encode {lang:?} sentence: {message}")]
    Encoding { lang: String, message: String },

    /// `seq_len` cannot hold the encoder's two reserved tokens.
    #[error("seq_len must be at least 2, got {0}")]
    InvalidSeqLen(usize),
}
