// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a raw parallel corpus to a fixed-length,
// masked example for one index:
//
//   corpus.jsonl
//       │
//       ▼
//   loader             → reads records into an InMemoryDataset
//       │
//       ▼
//   splitter           → seeded train/validation split
//       │
//       ▼
//   BilingualDataset   → encodes, frames, pads, builds masks
//       │                 (mask.rs supplies the causal mask)
//       ▼
//   tensors            → one example as Burn tensors
//
// Batching across examples happens downstream of this layer.

/// Reads JSON Lines corpora
pub mod loader;

/// Seeded train/validation split
pub mod splitter;

/// Causal and padding attention masks
pub mod mask;

/// The example builder and its output type
pub mod dataset;

/// Conversion of a built example to Burn tensors
pub mod tensors;
