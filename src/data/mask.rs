// ============================================================
// Layer 4 — Attention Masks
// ============================================================
// Boolean masks consumed as "keep" masks by attention:
// true = this position may be attended to.
//
//   padding_mask(ids)   → [seq_len]            id != [PAD]
//   causal_mask(n)      → [n, n]               j <= i
//   decoder_mask(ids)   → [seq_len, seq_len]   causal AND padding
//
// Causal mask for n = 4:
//
//        j=0 j=1 j=2 j=3
//   i=0   T   F   F   F
//   i=1   T   T   F   F
//   i=2   T   T   T   F
//   i=3   T   T   T   T
//
// Reference: Vaswani et al. (2017) §3.2.3 (masked self-attention)

/// Lower-triangular mask, diagonal included: `(i, j)` is true iff `j <= i`.
pub fn causal_mask(size: usize) -> Vec<Vec<bool>> {
    (0..size)
        .map(|i| (0..size).map(|j| j <= i).collect())
        .collect()
}

/// True wherever `ids` holds a real token rather than `pad`.
pub fn padding_mask(ids: &[u32], pad: u32) -> Vec<bool> {
    ids.iter().map(|&id| id != pad).collect()
}

/// Combine a causal mask with the padding mask of `ids`.
///
/// The padding indicator is broadcast across rows, so entry
/// `(i, j)` survives only if `j <= i` and position `j` is not padding.
/// `causal` must be square with side `ids.len()`.
pub fn decoder_mask(ids: &[u32], pad: u32, causal: &[Vec<bool>]) -> Vec<Vec<bool>> {
    debug_assert_eq!(causal.len(), ids.len());
    let keep = padding_mask(ids, pad);

    causal
        .iter()
        .map(|row| {
            row.iter()
                .zip(&keep)
                .map(|(&visible, &real)| visible && real)
                .collect()
        })
        .collect()
}
