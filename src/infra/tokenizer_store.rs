// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads one HuggingFace tokenizer JSON file per language:
//
//   tokenizers/
//     tokenizer_en.json
//     tokenizer_it.json
//
// Tokenizers are trained elsewhere; this store only reads
// them. tokenizers::Tokenizer is adapted to the domain's
// TokenEncoder trait so the example builder never sees the
// concrete type.

use anyhow::{Context, Result};
use std::{ops::Deref, path::PathBuf};
use tokenizers::Tokenizer;

use crate::domain::traits::TokenEncoder;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where the tokenizer for `lang` is expected on disk
    pub fn path_for(&self, lang: &str) -> PathBuf {
        self.dir.join(format!("tokenizer_{lang}.json"))
    }

    /// Load the tokenizer for `lang`
    pub fn load(&self, lang: &str) -> Result<Tokenizer> {
        let path = self.path_for(lang);
        let tokenizer = Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))
            .with_context(|| format!("No usable tokenizer for language '{lang}'"))?;

        tracing::info!(
            "Loaded '{}' tokenizer ({} tokens) from '{}'",
            lang,
            tokenizer.get_vocab_size(true),
            path.display()
        );
        Ok(tokenizer)
    }
}

// ─── TokenEncoder for HuggingFace tokenizers ──────────────────────────────────
// Special tokens are NOT added by the tokenizer's post-processor:
// the example builder frames sequences itself.
//
// `Tokenizer` is a newtype over `TokenizerImpl` and only gets `encode` /
// `token_to_id` through Deref. Calls must go to the inner value
// explicitly, otherwise they resolve back to this trait.
impl TokenEncoder for Tokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let inner = Deref::deref(self);
        let encoding = inner
            .encode(text, false)
            .map_err(|e| anyhow::anyhow!("tokenizer encode failed: {e}"))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn token_to_id(&self, symbol: &str) -> Option<u32> {
        let inner = Deref::deref(self);
        inner.token_to_id(symbol)
    }
}

// ─── Test Fixtures ────────────────────────────────────────────────────────────
// Writes a word-level tokenizer in HuggingFace JSON format with
// [UNK]=0, [PAD]=1, [SOS]=2, [EOS]=3 followed by `words`.
#[cfg(test)]
pub(crate) fn write_word_level(dir: &std::path::Path, lang: &str, words: &[&str]) -> PathBuf {
    let specials = ["[UNK]", "[PAD]", "[SOS]", "[EOS]"];

    let mut vocab = serde_json::Map::new();
    for (id, token) in specials.iter().chain(words).enumerate() {
        vocab.insert(token.to_string(), serde_json::json!(id));
    }

    let added_tokens: Vec<_> = specials
        .iter()
        .enumerate()
        .map(|(id, content)| serde_json::json!({
            "id": id, "content": content, "single_word": false, "lstrip": false,
            "rstrip": false, "normalized": false, "special": true
        }))
        .collect();

    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": added_tokens,
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    });

    let path = dir.join(format!("tokenizer_{lang}.json"));
    std::fs::write(&path, serde_json::to_string_pretty(&tokenizer_json).unwrap()).unwrap();
    path
}
