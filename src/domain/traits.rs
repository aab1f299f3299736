// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The example builder never talks to a concrete tokenizer.
// It only needs two capabilities:
//
//   encode(text)         → ordered token ids
//   token_to_id(symbol)  → id of a reserved symbol, if known
//
// Implementations:
//   - tokenizers::Tokenizer (HuggingFace JSON tokenizers),
//     see infra::tokenizer_store
//   - small vocabulary stubs in unit tests
//
// Encoders are shared read-only across data-loading workers,
// so the trait requires Send + Sync.

use anyhow::Result;

// ─── TokenEncoder ─────────────────────────────────────────────────────────────
pub trait TokenEncoder: Send + Sync {
    /// Encode a sentence into token ids, without adding any
    /// special tokens. Framing is the builder's job.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Look up the id of a single vocabulary symbol such as "[PAD]".
    fn token_to_id(&self, symbol: &str) -> Option<u32>;
}

impl<T: TokenEncoder + ?Sized> TokenEncoder for &T {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        (**self).encode(text)
    }

    fn token_to_id(&self, symbol: &str) -> Option<u32> {
        (**self).token_to_id(symbol)
    }
}

impl<T: TokenEncoder + ?Sized> TokenEncoder for std::sync::Arc<T> {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        (**self).encode(text)
    }

    fn token_to_id(&self, symbol: &str) -> Option<u32> {
        (**self).token_to_id(symbol)
    }
}
