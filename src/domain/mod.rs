// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the preparation pipeline:
//
//   - what a raw bilingual record looks like
//   - which reserved tokens frame every sequence
//   - what a tokenizer must be able to do for us
//   - which failures a build can report
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A raw record carrying one sentence per language
pub mod translation;

// The [SOS] / [EOS] / [PAD] ids resolved from the target vocabulary
pub mod reserved;

// Capability traits that tokenizers implement
pub mod traits;

// Typed errors for example construction
pub mod error;
