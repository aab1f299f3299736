// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
//   1. `prepare` — build every example, print a JSON report
//   2. `show`    — build one example, print it as JSON
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PrepareArgs, ShowArgs};

use crate::application::prepare_use_case::PrepareUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "bilingual-prep",
    version = "0.1.0",
    about = "Frame, pad and mask bilingual sentence pairs for seq2seq training."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Show(args)    => run_show(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    let config = args.into_config()?;
    tracing::info!("Preparing {}→{} examples from: {}", config.src_lang, config.tgt_lang, config.data_path);

    let report = PrepareUseCase::new(config).execute()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = args.data.into_config()?;
    let item = PrepareUseCase::new(config).show(args.index)?;
    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}
