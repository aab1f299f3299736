// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Orchestrates the preparation pipeline in order:
//
//   Step 1: Load raw records          (Layer 4 - data)
//   Step 2: Load both tokenizers      (Layer 6 - infra)
//   Step 3: Split train/validation    (Layer 4 - data)
//   Step 4: Build example datasets    (Layer 4 - data)
//   Step 5: Measure token lengths     (this file)
//   Step 6: Build every example       (Layer 4 - data)
//
// Examples that are too long, or whose record lacks one of the
// two languages, are logged and counted as skipped. Any other
// failure aborts the run.

use anyhow::{Context, Result};
use burn::data::dataset::{Dataset, InMemDataset};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use tokenizers::Tokenizer;

use crate::data::{
    dataset::{BilingualDataset, TranslationItem, DEFAULT_SEQ_LEN},
    loader::{load_jsonl, load_records},
    splitter::split_train_val,
    tensors::TranslationTensors,
};
use crate::domain::{
    error::ExampleError,
    traits::TokenEncoder,
    translation::TranslationRecord,
};
use crate::infra::tokenizer_store::TokenizerStore;

type RecordSet = InMemDataset<TranslationRecord>;
type SharedTokenizer = Arc<Tokenizer>;
pub type CorpusDataset = BilingualDataset<RecordSet, SharedTokenizer, SharedTokenizer>;

// ─── Configuration ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    pub data_path:      String,
    pub tokenizer_dir:  String,
    pub src_lang:       String,
    pub tgt_lang:       String,
    pub seq_len:        usize,
    pub train_fraction: f64,
    pub seed:           u64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_path:      "data/opus_books.jsonl".to_string(),
            tokenizer_dir:  "tokenizers".to_string(),
            src_lang:       "en".to_string(),
            tgt_lang:       "it".to_string(),
            seq_len:        DEFAULT_SEQ_LEN,
            train_fraction: 0.9,
            seed:           42,
        }
    }
}

impl PrepareConfig {
    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))
    }
}

// ─── Length Statistics ────────────────────────────────────────────────────────
/// Token length summary over a corpus, used to choose seq_len.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthStats {
    pub records:        usize,
    pub max_src_tokens: usize,
    pub max_tgt_tokens: usize,
    /// Records that would fail with SequenceTooLong at the given seq_len
    pub overflowing:    usize,
}

impl LengthStats {
    /// Encode every record of `ds` and record the longest sides.
    /// Records lacking a language are left out of the counts.
    pub fn scan<D, S, T>(ds: &BilingualDataset<D, S, T>) -> Result<Self, ExampleError>
    where
        D: Dataset<TranslationRecord>,
        S: TokenEncoder,
        T: TokenEncoder,
    {
        let mut stats = Self::default();
        for index in 0..ds.size() {
            let (src, tgt) = match ds.token_lengths(index) {
                Ok(lengths) => lengths,
                Err(ExampleError::MissingLanguage { .. }) => continue,
                Err(e) => return Err(e),
            };
            stats.records += 1;
            stats.max_src_tokens = stats.max_src_tokens.max(src);
            stats.max_tgt_tokens = stats.max_tgt_tokens.max(tgt);
            if src + 2 > ds.seq_len() || tgt + 1 > ds.seq_len() {
                stats.overflowing += 1;
            }
        }
        Ok(stats)
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            records:        self.records + other.records,
            max_src_tokens: self.max_src_tokens.max(other.max_src_tokens),
            max_tgt_tokens: self.max_tgt_tokens.max(other.max_tgt_tokens),
            overflowing:    self.overflowing + other.overflowing,
        }
    }

    /// Smallest seq_len that fits every scanned record
    pub fn required_seq_len(&self) -> usize {
        (self.max_src_tokens + 2).max(self.max_tgt_tokens + 1)
    }
}

// ─── Build Counts ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCounts {
    pub built:            usize,
    pub too_long:         usize,
    pub missing_language: usize,
}

impl BuildCounts {
    /// Build every example in `ds`, skipping the ones that cannot be framed.
    pub fn collect<D, S, T>(ds: &BilingualDataset<D, S, T>) -> Result<Self, ExampleError>
    where
        D: Dataset<TranslationRecord>,
        S: TokenEncoder,
        T: TokenEncoder,
    {
        let mut counts = Self::default();
        for index in 0..ds.size() {
            match ds.build(index) {
                Ok(_) => counts.built += 1,
                Err(e @ ExampleError::SequenceTooLong { .. }) => {
                    tracing::warn!("Skipping example {}: {}", index, e);
                    counts.too_long += 1;
                }
                Err(e @ ExampleError::MissingLanguage { .. }) => {
                    tracing::warn!("Skipping example {}: {}", index, e);
                    counts.missing_language += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(counts)
    }

    pub fn skipped(&self) -> usize {
        self.too_long + self.missing_language
    }
}

// ─── Report ───────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareReport {
    pub src_lang:         String,
    pub tgt_lang:         String,
    pub seq_len:          usize,
    pub train_records:    usize,
    pub val_records:      usize,
    pub lengths:          LengthStats,
    pub required_seq_len: usize,
    pub train:            BuildCounts,
    pub val:              BuildCounts,
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline and report what was built.
    pub fn execute(&self) -> Result<PrepareReport> {
        let cfg = &self.config;

        // ── Step 1 + 2: Records and tokenizers ────────────────────────────────
        let records = load_records(&cfg.data_path)?;
        let (src_tok, tgt_tok) = self.load_tokenizers()?;

        // ── Step 3: Split ─────────────────────────────────────────────────────
        let (train_records, val_records) =
            split_train_val(records, cfg.train_fraction, cfg.seed);
        tracing::info!(
            "Split into {} training and {} validation records",
            train_records.len(),
            val_records.len()
        );

        // ── Step 4: Example datasets ──────────────────────────────────────────
        let train_ds = self.dataset(InMemDataset::new(train_records), &src_tok, &tgt_tok)?;
        let val_ds   = self.dataset(InMemDataset::new(val_records), &src_tok, &tgt_tok)?;

        // ── Step 5: Length statistics ─────────────────────────────────────────
        let lengths = LengthStats::scan(&train_ds)?.merge(LengthStats::scan(&val_ds)?);
        tracing::info!(
            "Max source length: {}, max target length: {}",
            lengths.max_src_tokens,
            lengths.max_tgt_tokens
        );
        if lengths.overflowing > 0 {
            tracing::warn!(
                "{} records do not fit seq_len={} (needs {})",
                lengths.overflowing,
                cfg.seq_len,
                lengths.required_seq_len()
            );
        }

        // ── Step 6: Build ─────────────────────────────────────────────────────
        let train = BuildCounts::collect(&train_ds).context("Building training examples")?;
        let val   = BuildCounts::collect(&val_ds).context("Building validation examples")?;
        tracing::info!(
            "Built {} training and {} validation examples ({} skipped)",
            train.built,
            val.built,
            train.skipped() + val.skipped()
        );

        Ok(PrepareReport {
            src_lang:         cfg.src_lang.clone(),
            tgt_lang:         cfg.tgt_lang.clone(),
            seq_len:          cfg.seq_len,
            train_records:    train_ds.size(),
            val_records:      val_ds.size(),
            required_seq_len: lengths.required_seq_len(),
            lengths,
            train,
            val,
        })
    }

    /// Build a single example from the unsplit corpus.
    pub fn show(&self, index: usize) -> Result<TranslationItem> {
        let raw = load_jsonl(&self.config.data_path)?;
        let (src_tok, tgt_tok) = self.load_tokenizers()?;
        let ds = self.dataset(raw, &src_tok, &tgt_tok)?;
        let reserved = ds.reserved();
        tracing::debug!(
            "Reserved ids from '{}': sos={} eos={} pad={}",
            self.config.tgt_lang, reserved.sos, reserved.eos, reserved.pad
        );

        let item = ds
            .build(index)
            .with_context(|| format!("Cannot build example {index}"))?;

        let device = Default::default();
        let tensors: TranslationTensors<burn::backend::NdArray> = item.to_tensors(&device);
        tracing::info!(
            "Example {}: encoder_input {:?}, decoder_input {:?}, label {:?}, \
             encoder_mask {:?}, decoder_mask {:?}",
            index,
            tensors.encoder_input.dims(),
            tensors.decoder_input.dims(),
            tensors.label.dims(),
            tensors.encoder_mask.dims(),
            tensors.decoder_mask.dims(),
        );

        Ok(item)
    }

    fn load_tokenizers(&self) -> Result<(SharedTokenizer, SharedTokenizer)> {
        let store = TokenizerStore::new(&self.config.tokenizer_dir);
        let src = store.load(&self.config.src_lang)?;
        let tgt = store.load(&self.config.tgt_lang)?;
        Ok((Arc::new(src), Arc::new(tgt)))
    }

    fn dataset(
        &self,
        raw:     RecordSet,
        src_tok: &SharedTokenizer,
        tgt_tok: &SharedTokenizer,
    ) -> Result<CorpusDataset> {
        let cfg = &self.config;
        BilingualDataset::new(
            raw,
            Arc::clone(src_tok),
            Arc::clone(tgt_tok),
            cfg.src_lang.as_str(),
            cfg.tgt_lang.as_str(),
            cfg.seq_len,
        )
        .with_context(|| format!(
            "Cannot prepare {}→{} examples", cfg.src_lang, cfg.tgt_lang
        ))
    }
}
