// crates/curlconst-tools/src/bin/curlconst-pymod.rs
//! Générateur du module Python de constantes libcurl.
//!
//! Exemples :
//!   curlconst-pymod -o pycurl/constants.py
//!   curlconst-dump | curlconst-pymod --from-dump - -o constants.py
//!   curlconst-pymod --from-dump saved.txt --time
//!
//! Sans `--from-dump`, les valeurs viennent de la sonde compilée dans ce binaire.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use curlconst_core::{parse_dump, render_module, sections_from_dump, sections_from_table};
use curlconst_tools::{
    bind_probe, init_logger, load_probe, module_options, read_input, write_output, Timer,
};

const TOOL: &str = "curlconst-pymod";

#[derive(Parser, Debug)]
#[command(name = TOOL, version, about = "Génère le module de constantes libcurl")]
struct Cli {
    /// Flux `@groupe`/`NOM=VALEUR` à convertir (`-` pour stdin) au lieu de la sonde
    #[arg(long, value_name = "PATH")]
    from_dump: Option<String>,

    /// Fichier de sortie (stdout sinon) ; dossiers créés au besoin
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    out: Option<PathBuf>,

    /// Verbosité (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Silencieux (erreurs seulement)
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Affiche la durée de génération
    #[arg(long)]
    time: bool,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main() -> Result<()> {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);
    let timer = Timer::start();

    let module_name = cli
        .out
        .as_deref()
        .and_then(|p| p.file_name())
        .map_or_else(|| "constants.py".to_owned(), |n| n.to_string_lossy().into_owned());
    let opts = module_options(TOOL, &module_name);

    let probe = load_probe()?;
    let text = match cli.from_dump.as_deref() {
        Some(src) => {
            let raw = read_input(src)?;
            let dump = parse_dump(&raw).with_context(|| format!("flux invalide: {src}"))?;
            log::info!("{src}: {} groups, {} entries", dump.groups().len(), dump.entry_count());
            render_module(sections_from_dump(&dump, probe.catalog()), &opts)
        }
        None => {
            let table = bind_probe(&probe)?;
            log::info!("probe: {} entries", table.len());
            render_module(sections_from_table(&table), &opts)
        }
    };

    write_output(cli.out.as_deref(), &text)?;
    if let Some(path) = &cli.out {
        log::info!("wrote {}", path.display());
    }
    if cli.time {
        eprintln!("{TOOL}: {}", timer.pretty());
    }
    Ok(())
}
