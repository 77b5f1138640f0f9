// crates/curlconst-tools/src/bin/curlconst-dump.rs
//! Dumper des constantes libcurl.
//!
//! Usage :
//!   curlconst-dump > curl-constants.txt
//!
//! Sortie : pour chaque groupe du catalogue, une ligne `@groupe` puis une ligne
//! `NOM=VALEUR` par symbole, dans l'ordre du catalogue. Aucun argument ni
//! variable d'environnement n'est lu ; deux exécutions du même binaire donnent
//! des octets identiques.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::LevelFilter;

use curlconst_core::write_dump;
use curlconst_tools::{bind_probe, init_fixed_logger, load_probe, version_banner};

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main() -> Result<()> {
    init_fixed_logger(LevelFilter::Warn);

    let probe = load_probe()?;
    let table = bind_probe(&probe)?;
    log::debug!(
        "{}: {} entries in {} groups",
        version_banner("curlconst-dump"),
        table.len(),
        table.catalog().groups().len()
    );

    let stdout = io::stdout();
    write_dump(&table, BufWriter::new(stdout.lock())).context("écriture stdout")?;
    Ok(())
}
