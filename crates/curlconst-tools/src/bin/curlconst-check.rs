// crates/curlconst-tools/src/bin/curlconst-check.rs
//! Vérifie qu'un flux `@groupe`/`NOM=VALEUR` suit le catalogue sondé.
//!
//! Exemples :
//!   curlconst-dump | curlconst-check
//!   curlconst-check saved.txt -v
//!
//! Chaque écart est imprimé sur stdout ; code de sortie 1 s'il y en a un.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use curlconst_core::prelude::*;
use curlconst_tools::{init_logger, load_probe, read_input};

#[derive(Parser, Debug)]
#[command(name = "curlconst-check", version, about = "Vérifie un flux de constantes libcurl")]
struct Cli {
    /// Flux à vérifier (`-` ou absent : stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Verbosité (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Silencieux (erreurs seulement)
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// `Ok(true)` si le flux est conforme.
fn real_main() -> Result<bool> {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let probe = load_probe()?;
    let raw = read_input(&cli.input)?;
    let dump = parse_dump(&raw).with_context(|| format!("flux invalide: {}", cli.input))?;

    let mismatches = check_conformance(&dump, probe.catalog());
    for m in &mismatches {
        println!("{m}");
    }
    if mismatches.is_empty() {
        log::info!(
            "{}: {} groups, {} entries, conforme",
            cli.input,
            dump.groups().len(),
            dump.entry_count()
        );
        return Ok(true);
    }
    log::warn!("{}: {} mismatch(es)", cli.input, mismatches.len());
    Ok(false)
}
