// src/main.rs
//
// panelcols — regroup the simulator's input panels into two columns
//
// - Lifts six group-box panels (located by their <h3> text) and the button group
//   out of the input panel, then writes them back as:
//       <div class="two-column-container">
//           <div class="column-left">   empresa, financeiros, tributário
//           <div class="column-right">  ciclo, IVA dual, parâmetros, buttons
// - All lookups happen before the write; any missing anchor aborts with a
//   diagnostic and leaves the file untouched.
// - Not idempotent: the anchors are gone after the first run.
//
// CLI:
//   [INPUT]      : page to rewrite (default: split-payment-simulator.html)
//   [OUTPUT]     : destination (default: overwrite input)
//   --verbose    : debug logging (RUST_LOG overrides)

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use panelcols::plan;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Log each extraction step
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Input file
    #[arg(default_value = plan::DEFAULT_PATH)]
    input: PathBuf,

    /// Output file (default: overwrite input)
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let out_path = cli.output.as_ref().unwrap_or(&cli.input);

    panelcols::run(&cli.input, out_path)
        .with_context(|| format!("failed to restructure {}", cli.input.display()))?;

    println!(
        "File '{}' restructured with two-column layout.",
        out_path.display()
    );
    Ok(())
}
