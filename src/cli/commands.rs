// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands: `prepare` and `show`.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::prepare_use_case::PrepareConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every example of a corpus and report counts as JSON
    Prepare(PrepareArgs),

    /// Build one example and print it as JSON
    Show(ShowArgs),
}

/// Where the corpus and tokenizers live and how to frame examples.
///
/// Every flag is optional. Flags given on the command line override the
/// `--config` file; anything left unset falls back to the file, then to
/// `PrepareConfig::default()`.
#[derive(Args, Debug, Clone, Default)]
pub struct PrepareArgs {
    /// JSON Lines corpus, one {"translation": {...}} record per line [default: data/opus_books.jsonl]
    #[arg(long)]
    pub data_path: Option<String>,

    /// Directory holding tokenizer_{lang}.json files [default: tokenizers]
    #[arg(long)]
    pub tokenizer_dir: Option<String>,

    /// Source language code [default: en]
    #[arg(long)]
    pub src_lang: Option<String>,

    /// Target language code; reserved tokens come from its tokenizer [default: it]
    #[arg(long)]
    pub tgt_lang: Option<String>,

    /// Fixed length of every encoder/decoder sequence [default: 128]
    #[arg(long)]
    pub seq_len: Option<usize>,

    /// Share of records used for training [default: 0.9]
    #[arg(long)]
    pub train_fraction: Option<f64>,

    /// Seed for the train/validation shuffle [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON config file; explicit flags above take precedence over it
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Index of the record in the unsplit corpus
    #[arg(long)]
    pub index: usize,

    #[command(flatten)]
    pub data: PrepareArgs,
}

impl PrepareArgs {
    /// Resolve the effective config: defaults, then the file, then the flags.
    pub fn into_config(self) -> anyhow::Result<PrepareConfig> {
        let mut cfg = match &self.config {
            Some(path) => PrepareConfig::from_file(path)?,
            None       => PrepareConfig::default(),
        };
        let from_file = self.config.is_some();

        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {$(
                if let Some(value) = self.$field {
                    if from_file {
                        tracing::info!(
                            "--{} overrides the config file value",
                            stringify!($field).replace('_', "-")
                        );
                    }
                    cfg.$field = value;
                }
            )*};
        }
        overlay!(data_path, tokenizer_dir, src_lang, tgt_lang, seq_len, train_fraction, seed);

        Ok(cfg)
    }
}
