// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
//   tokenizer_store.rs — Loads per-language HuggingFace
//                        tokenizer files from disk and adapts
//                        them to the TokenEncoder trait.
//
// Reference: Rust Book §7 (Modules)

/// Tokenizer loading and the HuggingFace TokenEncoder adapter
pub mod tokenizer_store;
