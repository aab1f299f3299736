// ============================================================
// Layer 3 — Reserved Token Set
// ============================================================
// Every sequence the builder emits is framed with three
// reserved ids taken from the TARGET vocabulary:
//
//   [SOS]  start of sequence  (encoder side only)
//   [EOS]  end of sequence
//   [PAD]  filler up to seq_len
//
// They are resolved once when the builder is constructed.
// A vocabulary missing any of them is a misconfigured
// tokenizer and fails construction immediately.

use serde::{Deserialize, Serialize};

use crate::domain::error::ExampleError;
use crate::domain::traits::TokenEncoder;

pub const SOS_TOKEN: &str = "[SOS]";
pub const EOS_TOKEN: &str = "[EOS]";
pub const PAD_TOKEN: &str = "[PAD]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedTokens {
    pub sos: u32,
    pub eos: u32,
    pub pad: u32,
}

impl ReservedTokens {
    /// Resolve [SOS], [EOS] and [PAD] from `encoder`'s vocabulary.
    pub fn resolve<E: TokenEncoder + ?Sized>(encoder: &E) -> Result<Self, ExampleError> {
        let lookup = |symbol: &str| {
            encoder
                .token_to_id(symbol)
                .ok_or_else(|| ExampleError::UnknownReservedToken(symbol.to_string()))
        };

        Ok(Self {
            sos: lookup(SOS_TOKEN)?,
            eos: lookup(EOS_TOKEN)?,
            pad: lookup(PAD_TOKEN)?,
        })
    }
}
