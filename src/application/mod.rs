// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates the data and infrastructure layers to prepare a
// corpus. No framing or masking logic lives here, only the
// order in which things happen and what gets reported.
//
// Reference: Clean Architecture pattern

// Corpus preparation and single-example inspection
pub mod prepare_use_case;
