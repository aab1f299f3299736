// ============================================================
// Layer 4 — Bilingual Example Builder
// ============================================================
// Turns one raw (source, target) sentence pair into a fixed
// length training example for an encoder/decoder transformer.
//
// Sequence layouts for seq_len = 10, source ids [5, 6],
// target ids [7, 8, 9], SOS = 1, EOS = 2, PAD = 0:
//
//   encoder_input  [SOS] src [EOS] pad…   [1, 5, 6, 2, 0, 0, 0, 0, 0, 0]
//   decoder_input        tgt [EOS] pad…   [7, 8, 9, 2, 0, 0, 0, 0, 0, 0]
//   label                tgt [PAD] pad…   [7, 8, 9, 0, 0, 0, 0, 0, 0, 0]
//
// The encoder reserves two slots (SOS + EOS), the decoder side
// only one (EOS). The decoder input carries no leading SOS and
// the label ends in PAD rather than EOS.
//
// Sentences that do not fit are rejected with SequenceTooLong.
// They are never truncated.

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::mask::{causal_mask, decoder_mask, padding_mask};
use crate::domain::{
    error::{ExampleError, Side},
    reserved::ReservedTokens,
    traits::TokenEncoder,
    translation::TranslationRecord,
};

pub const DEFAULT_SEQ_LEN: usize = 128;

/// Smallest seq_len that can hold an encoder sequence: [SOS] [EOS].
pub const MIN_SEQ_LEN: usize = 2;

/// One fully framed, padded and masked translation example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationItem {
    /// `[SOS] src [EOS] [PAD]…`, length seq_len
    pub encoder_input: Vec<u32>,

    /// `tgt [EOS] [PAD]…`, length seq_len
    pub decoder_input: Vec<u32>,

    /// Keep mask over encoder_input, logical shape [1, 1, seq_len]
    pub encoder_mask: Vec<bool>,

    /// Causal AND padding mask, logical shape [1, seq_len, seq_len]
    pub decoder_mask: Vec<Vec<bool>>,

    /// `tgt [PAD] [PAD]…`, length seq_len
    pub label: Vec<u32>,

    pub src_text: String,
    pub tgt_text: String,
}

impl TranslationItem {
    pub fn seq_len(&self) -> usize {
        self.encoder_input.len()
    }
}

/// Builds [`TranslationItem`]s on demand from a raw parallel corpus.
///
/// Immutable after construction: every call to [`build`](Self::build)
/// allocates a fresh item, so one instance can be shared by several
/// data-loading threads.
pub struct BilingualDataset<D, S, T> {
    raw:           D,
    src_tokenizer: S,
    tgt_tokenizer: T,
    src_lang:      String,
    tgt_lang:      String,
    seq_len:       usize,
    reserved:      ReservedTokens,
    causal:        Vec<Vec<bool>>,
}

impl<D, S, T> BilingualDataset<D, S, T>
where
    D: Dataset<TranslationRecord>,
    S: TokenEncoder,
    T: TokenEncoder,
{
    /// Create a builder over `raw`.
    ///
    /// The reserved ids come from the TARGET tokenizer.
    ///
    /// # Errors
    /// - [`ExampleError::InvalidSeqLen`] if `seq_len < 2`
    /// - [`ExampleError::UnknownReservedToken`] if the target vocabulary
    ///   lacks `[SOS]`, `[EOS]` or `[PAD]`
    pub fn new(
        raw:           D,
        src_tokenizer: S,
        tgt_tokenizer: T,
        src_lang:      impl Into<String>,
        tgt_lang:      impl Into<String>,
        seq_len:       usize,
    ) -> Result<Self, ExampleError> {
        if seq_len < MIN_SEQ_LEN {
            return Err(ExampleError::InvalidSeqLen(seq_len));
        }

        let reserved = ReservedTokens::resolve(&tgt_tokenizer)?;
        let src_lang = src_lang.into();
        let tgt_lang = tgt_lang.into();

        tracing::debug!(
            "Example builder {}→{} seq_len={} sos={} eos={} pad={}",
            src_lang, tgt_lang, seq_len, reserved.sos, reserved.eos, reserved.pad
        );

        Ok(Self {
            raw,
            src_tokenizer,
            tgt_tokenizer,
            src_lang,
            tgt_lang,
            seq_len,
            reserved,
            // seq_len is fixed for this instance, so the causal part
            // of the decoder mask never changes
            causal: causal_mask(seq_len),
        })
    }

    /// Number of raw pairs in the underlying corpus
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    pub fn reserved(&self) -> ReservedTokens {
        self.reserved
    }

    /// Build the example at `index`.
    ///
    /// # Errors
    /// - [`ExampleError::SequenceTooLong`] if `|src| + 2 > seq_len`
    ///   or `|tgt| + 1 > seq_len`
    /// - [`ExampleError::MissingLanguage`] if the record lacks a language
    /// - [`ExampleError::IndexOutOfRange`] if `index >= size()`
    /// - [`ExampleError::Encoding`] if a tokenizer fails
    pub fn build(&self, index: usize) -> Result<TranslationItem, ExampleError> {
        let record = self.record(index)?;
        let src_text = self.text_of(&record, index, &self.src_lang)?;
        let tgt_text = self.text_of(&record, index, &self.tgt_lang)?;

        let src_ids = encode(&self.src_tokenizer, &self.src_lang, src_text)?;
        let tgt_ids = encode(&self.tgt_tokenizer, &self.tgt_lang, tgt_text)?;

        // ── Budget check ──────────────────────────────────────────────────────
        // Encoder: SOS + EOS. Decoder: EOS only.
        check_fits(Side::Source, src_ids.len(), self.seq_len - 2)?;
        check_fits(Side::Target, tgt_ids.len(), self.seq_len - 1)?;

        let ReservedTokens { sos, eos, pad } = self.reserved;

        // ── Assemble sequences ────────────────────────────────────────────────
        let mut encoder_input = Vec::with_capacity(self.seq_len);
        encoder_input.push(sos);
        encoder_input.extend_from_slice(&src_ids);
        encoder_input.push(eos);
        encoder_input.resize(self.seq_len, pad);

        let mut decoder_input = Vec::with_capacity(self.seq_len);
        decoder_input.extend_from_slice(&tgt_ids);
        decoder_input.push(eos);
        decoder_input.resize(self.seq_len, pad);

        // the slot holding EOS in decoder_input is PAD here
        let mut label = tgt_ids;
        label.resize(self.seq_len, pad);

        debug_assert_eq!(encoder_input.len(), self.seq_len);
        debug_assert_eq!(decoder_input.len(), self.seq_len);
        debug_assert_eq!(label.len(), self.seq_len);

        // ── Masks ─────────────────────────────────────────────────────────────
        let encoder_mask = padding_mask(&encoder_input, pad);
        let decoder_mask = decoder_mask(&decoder_input, pad, &self.causal);

        Ok(TranslationItem {
            encoder_input,
            decoder_input,
            encoder_mask,
            decoder_mask,
            label,
            src_text: src_text.to_string(),
            tgt_text: tgt_text.to_string(),
        })
    }

    /// Encoded (source, target) lengths at `index`, without framing.
    /// Used to size seq_len for a corpus.
    pub fn token_lengths(&self, index: usize) -> Result<(usize, usize), ExampleError> {
        let record = self.record(index)?;
        let src = encode(
            &self.src_tokenizer,
            &self.src_lang,
            self.text_of(&record, index, &self.src_lang)?,
        )?;
        let tgt = encode(
            &self.tgt_tokenizer,
            &self.tgt_lang,
            self.text_of(&record, index, &self.tgt_lang)?,
        )?;
        Ok((src.len(), tgt.len()))
    }

    fn record(&self, index: usize) -> Result<TranslationRecord, ExampleError> {
        self.raw.get(index).ok_or(ExampleError::IndexOutOfRange {
            index,
            len: self.raw.len(),
        })
    }

    fn text_of<'r>(
        &self,
        record: &'r TranslationRecord,
        index:  usize,
        lang:   &str,
    ) -> Result<&'r str, ExampleError> {
        record.text(lang).ok_or_else(|| ExampleError::MissingLanguage {
            index,
            lang: lang.to_string(),
        })
    }
}

fn encode<E: TokenEncoder>(encoder: &E, lang: &str, text: &str) -> Result<Vec<u32>, ExampleError> {
    encoder.encode(text).map_err(|e| ExampleError::Encoding {
        lang:    lang.to_string(),
        message: format!("{e:#}"),
    })
}

fn check_fits(side: Side, tokens: usize, capacity: usize) -> Result<(), ExampleError> {
    if tokens > capacity {
        return Err(ExampleError::SequenceTooLong { side, tokens, capacity });
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::data::dataset::InMemDataset;
    use std::collections::HashMap;

    /// Whitespace word-level encoder over a fixed vocabulary.
    struct WordVocab(HashMap<&'static str, u32>);

    impl WordVocab {
        fn new(words: &[(&'static str, u32)]) -> Self {
            let mut vocab: HashMap<_, _> = words.iter().copied().collect();
            vocab.insert("[PAD]", 0);
            vocab.insert("[SOS]", 1);
            vocab.insert("[EOS]", 2);
            Self(vocab)
        }
    }

    impl TokenEncoder for WordVocab {
        fn encode(&self, text: &str) -> anyhow::Result<Vec<u32>> {
            text.split_whitespace()
                .map(|w| {
                    self.0
                        .get(w)
                        .copied()
                        .ok_or_else(|| anyhow::anyhow!("unknown word {w:?}"))
                })
                .collect()
        }

        fn token_to_id(&self, symbol: &str) -> Option<u32> {
            self.0.get(symbol).copied()
        }
    }

    fn src_vocab() -> WordVocab {
        WordVocab::new(&[("the", 5), ("cat", 6), ("sat", 10), ("down", 11)])
    }

    fn tgt_vocab() -> WordVocab {
        WordVocab::new(&[("il", 7), ("gatto", 8), ("siede", 9), ("giù", 12)])
    }

    fn corpus(pairs: &[(&str, &str)]) -> InMemDataset<TranslationRecord> {
        InMemDataset::new(
            pairs
                .iter()
                .map(|(en, it)| TranslationRecord::from_pairs([("en", *en), ("it", *it)]))
                .collect(),
        )
    }

    fn builder(
        pairs:   &[(&str, &str)],
        seq_len: usize,
    ) -> BilingualDataset<InMemDataset<TranslationRecord>, WordVocab, WordVocab> {
        BilingualDataset::new(corpus(pairs), src_vocab(), tgt_vocab(), "en", "it", seq_len).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let ds = builder(&[("the cat", "il gatto siede")], 10);
        let item = ds.build(0).unwrap();

        assert_eq!(item.encoder_input, vec![1, 5, 6, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(item.decoder_input, vec![7, 8, 9, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(item.label,         vec![7, 8, 9, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(item.src_text, "the cat");
        assert_eq!(item.tgt_text, "il gatto siede");
    }

    #[test]
    fn test_all_sequences_have_seq_len() {
        let ds = builder(&[("the", "il"), ("the cat sat down", "il gatto siede giù")], 16);
        for i in 0..ds.size() {
            let item = ds.build(i).unwrap();
            assert_eq!(item.encoder_input.len(), 16);
            assert_eq!(item.decoder_input.len(), 16);
            assert_eq!(item.label.len(), 16);
            assert_eq!(item.encoder_mask.len(), 16);
            assert_eq!(item.decoder_mask.len(), 16);
            assert!(item.decoder_mask.iter().all(|row| row.len() == 16));
            assert_eq!(item.seq_len(), 16);
        }
    }

    #[test]
    fn test_encoder_mask_marks_content_plus_two() {
        let ds = builder(&[("the cat sat", "il")], 8);
        let item = ds.build(0).unwrap();
        // 3 source tokens + SOS + EOS
        assert_eq!(item.encoder_mask, vec![true, true, true, true, true, false, false, false]);
    }

    #[test]
    fn test_decoder_mask_is_causal_and_padding_aware() {
        let ds = builder(&[("the", "il gatto")], 6);
        let item = ds.build(0).unwrap();
        for i in 0..6 {
            for j in 0..6 {
                let expected = j <= i && item.decoder_input[j] != 0;
                assert_eq!(item.decoder_mask[i][j], expected, "({i}, {j})");
            }
        }
        // il gatto [EOS] → three visible columns at most
        assert_eq!(item.decoder_mask[5].iter().filter(|&&b| b).count(), 3);
    }

    #[test]
    fn test_exact_fit_has_no_padding() {
        // 2 source tokens + 2 specials = 4, 3 target tokens + EOS = 4
        let ds = builder(&[("the cat", "il gatto siede")], 4);
        let item = ds.build(0).unwrap();
        assert_eq!(item.encoder_input, vec![1, 5, 6, 2]);
        assert_eq!(item.decoder_input, vec![7, 8, 9, 2]);
        assert_eq!(item.label, vec![7, 8, 9, 0]);
    }

    #[test]
    fn test_source_too_long() {
        // 3 source tokens need 5 slots
        let ds = builder(&[("the cat sat", "il")], 4);
        assert_eq!(
            ds.build(0),
            Err(ExampleError::SequenceTooLong {
                side: Side::Source,
                tokens: 3,
                capacity: 2,
            })
        );
    }

    #[test]
    fn test_target_too_long() {
        // 4 target tokens need 5 slots, source fits
        let ds = builder(&[("the", "il gatto siede giù")], 4);
        assert!(matches!(
            ds.build(0),
            Err(ExampleError::SequenceTooLong { side: Side::Target, tokens: 4, capacity: 3 })
        ));
    }

    #[test]
    fn test_empty_sentences_at_minimum_seq_len() {
        let ds = builder(&[("", "")], MIN_SEQ_LEN);
        let item = ds.build(0).unwrap();
        assert_eq!(item.encoder_input, vec![1, 2]);
        assert_eq!(item.decoder_input, vec![2, 0]);
        assert_eq!(item.label, vec![0, 0]);
        assert_eq!(item.decoder_mask, vec![vec![true, false], vec![true, false]]);
    }

    #[test]
    fn test_seq_len_below_minimum_is_rejected() {
        let result = BilingualDataset::new(corpus(&[]), src_vocab(), tgt_vocab(), "en", "it", 1);
        assert!(matches!(result, Err(ExampleError::InvalidSeqLen(1))));
    }

    #[test]
    fn test_missing_reserved_token_fails_construction() {
        let mut tgt = tgt_vocab();
        tgt.0.remove("[SOS]");
        let result = BilingualDataset::new(corpus(&[]), src_vocab(), tgt, "en", "it", 8);
        assert!(matches!(
            result,
            Err(ExampleError::UnknownReservedToken(s)) if s == "[SOS]"
        ));
    }

    #[test]
    fn test_reserved_ids_come_from_target_vocabulary() {
        let mut src = src_vocab();
        src.0.remove("[PAD]");
        let ds = BilingualDataset::new(corpus(&[]), src, tgt_vocab(), "en", "it", 8).unwrap();
        assert_eq!(ds.reserved(), ReservedTokens { sos: 1, eos: 2, pad: 0 });
    }

    #[test]
    fn test_missing_language() {
        let raw = InMemDataset::new(vec![TranslationRecord::from_pairs([("en", "the")])]);
        let ds = BilingualDataset::new(raw, src_vocab(), tgt_vocab(), "en", "it", 8).unwrap();
        assert_eq!(
            ds.build(0),
            Err(ExampleError::MissingLanguage { index: 0, lang: "it".into() })
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let ds = builder(&[("the", "il")], 8);
        assert_eq!(ds.build(3), Err(ExampleError::IndexOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_encoding_failure_is_reported() {
        let ds = builder(&[("the dog", "il")], 8);
        match ds.build(0) {
            Err(ExampleError::Encoding { lang, message }) => {
                assert_eq!(lang, "en");
                assert!(message.contains("dog"));
            }
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_size_delegates_to_raw_dataset() {
        let ds = builder(&[("the", "il"), ("cat", "gatto"), ("sat", "siede")], 8);
        assert_eq!(ds.size(), 3);
    }

    #[test]
    fn test_build_is_idempotent() {
        let ds = builder(&[("the cat", "il gatto")], 8);
        assert_eq!(ds.build(0).unwrap(), ds.build(0).unwrap());
    }

    #[test]
    fn test_token_lengths() {
        let ds = builder(&[("the cat sat", "il gatto")], 4);
        assert_eq!(ds.token_lengths(0), Ok((3, 2)));
    }

    #[test]
    fn test_parallel_builds_match_sequential() {
        let pairs = [
            ("the", "il"),
            ("the cat", "il gatto"),
            ("the cat sat", "il gatto siede"),
            ("the cat sat down", "il gatto siede giù"),
        ];
        let ds = builder(&pairs, 5);
        let sequential: Vec<_> = (0..ds.size()).map(|i| ds.build(i)).collect();

        let parallel: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..ds.size())
                .map(|i| {
                    let ds = &ds;
                    s.spawn(move || ds.build(i))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, parallel);
        // the last pair overflows the source side
        assert!(matches!(
            sequential[3],
            Err(ExampleError::SequenceTooLong { side: Side::Source, .. })
        ));
    }
}
