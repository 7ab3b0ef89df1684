//! Command-line inspector for block markup.
//!
//! Reads persisted markup and prints the resolved attribute record as JSON,
//! or takes a JSON record and prints the markup the current version would
//! save. Useful for auditing legacy content migrations from the shell.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use blockbind_blocks::builtin_registry;
use blockbind_engine::{AttributeRecord, Loaded};

#[derive(Parser)]
#[command(name = "blockbind", about = "Inspect and rewrite block markup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered block names.
    Blocks,
    /// Load a markup file and print the resolved record as JSON.
    Load {
        /// Block name, e.g. `cgb/block-feature`.
        #[arg(long)]
        block: String,
        /// Markup file; `-` reads stdin.
        file: PathBuf,
    },
    /// Read a JSON record from stdin and print the saved markup.
    Save {
        #[arg(long)]
        block: String,
        /// Merge the record over the block's defaults before rendering,
        /// upgrading partial or legacy records.
        #[arg(long)]
        upgrade: bool,
    },
}

#[derive(Serialize)]
struct LoadReport {
    record: AttributeRecord,
    version: usize,
    degraded: bool,
}

impl From<Loaded> for LoadReport {
    fn from(loaded: Loaded) -> Self {
        Self {
            record: loaded.record,
            version: loaded.version,
            degraded: loaded.degraded,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let registry = builtin_registry().context("failed to build the block registry")?;

    match cli.command {
        Command::Blocks => {
            for name in registry.names() {
                println!("{name}");
            }
        }
        Command::Load { block, file } => {
            let markup = read_input(&file)?;
            let loaded = registry.load_attributes(&block, &markup)?;
            let report = LoadReport::from(loaded);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Save { block, upgrade } => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read record from stdin")?;
            let mut record: AttributeRecord =
                serde_json::from_str(&input).context("record is not valid JSON")?;
            if upgrade {
                let chain = registry.chain(&block)?;
                record = chain.default_record().merged(&record);
            }
            println!("{}", registry.save_markup(&block, &record)?);
        }
    }
    Ok(())
}

fn read_input(file: &PathBuf) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read markup from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
    }
}
