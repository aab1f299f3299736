// ============================================================
// Layer 4 — Example → Tensor Conversion
// ============================================================
// Converts a single TranslationItem into Burn tensors on a
// chosen device. Shapes for a seq_len of S:
//
//   encoder_input  Int  [S]
//   decoder_input  Int  [S]
//   label          Int  [S]
//   encoder_mask   Bool [1, 1, S]   broadcast over query rows
//   decoder_mask   Bool [1, S, S]
//
// Stacking several examples into a batch is left to the
// caller's collation step.
//
// Reference: Burn Book §3 (Tensors)

use burn::{prelude::*, tensor::TensorData};

use crate::data::dataset::TranslationItem;

#[derive(Debug, Clone)]
pub struct TranslationTensors<B: Backend> {
    pub encoder_input: Tensor<B, 1, Int>,
    pub decoder_input: Tensor<B, 1, Int>,
    pub encoder_mask:  Tensor<B, 3, Bool>,
    pub decoder_mask:  Tensor<B, 3, Bool>,
    pub label:         Tensor<B, 1, Int>,
}

impl<B: Backend> TranslationTensors<B> {
    /// Copy `item` onto `device`.
    pub fn from_item(item: &TranslationItem, device: &B::Device) -> Self {
        let seq_len = item.seq_len();

        // u32 → i64 is lossless; the backend then converts to its own
        // int element type
        let ints = |ids: &[u32]| -> Tensor<B, 1, Int> {
            let ids: Vec<i64> = ids.iter().map(|&x| i64::from(x)).collect();
            Tensor::<B, 1, Int>::from_data(TensorData::new(ids, [seq_len]), device)
        };

        let encoder_mask = Tensor::<B, 3, Bool>::from_bool(
            TensorData::new(item.encoder_mask.clone(), [1, 1, seq_len]),
            device,
        );

        // Row-major flatten of the [S, S] mask
        let decoder_flat: Vec<bool> = item.decoder_mask.iter().flatten().copied().collect();
        let decoder_mask = Tensor::<B, 3, Bool>::from_bool(
            TensorData::new(decoder_flat, [1, seq_len, seq_len]),
            device,
        );

        Self {
            encoder_input: ints(&item.encoder_input),
            decoder_input: ints(&item.decoder_input),
            encoder_mask,
            decoder_mask,
            label: ints(&item.label),
        }
    }
}

impl TranslationItem {
    pub fn to_tensors<B: Backend>(&self, device: &B::Device) -> TranslationTensors<B> {
        TranslationTensors::from_item(self, device)
    }
}
