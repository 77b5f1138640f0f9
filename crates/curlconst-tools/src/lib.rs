//! curlconst-tools: Bibliothèque commune des binaires curlconst.
//!
//! ## Zones clés
//! - I/O     : `read_input` (`-` = stdin), `write_output` (stdout ou fichier atomique)
//! - Logs    : `init_logger` (niveaux `-v`/`-q`), `init_fixed_logger` (dumper)
//! - Sonde   : `load_probe`, `bind_probe`
//! - Time    : `Timer`, `human_millis`
//!
//! Les logs vont toujours sur stderr : stdout porte le flux de constantes.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::LevelFilter;

use curlconst_core::{BindingTable, ModuleOptions};
use curlconst_probe::ProbeTable;

/// Version lisible du crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bannière courte, reprise dans les logs et l'en-tête du module généré.
pub fn version_banner(tool: &str) -> String {
    format!("{tool} {VERSION}")
}

/* ------------------------------------------------------------------------- */
/* Logs                                                                      */
/* ------------------------------------------------------------------------- */

/// Niveau de log à partir de `-v` (cumulable) et `-q`.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logger stderr ; `RUST_LOG` garde la main s'il est défini.
pub fn init_logger(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet).as_str().to_ascii_lowercase();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Logger stderr à niveau fixe, sans lecture d'environnement.
pub fn init_fixed_logger(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .write_style(env_logger::WriteStyle::Never)
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .try_init();
}

/* ------------------------------------------------------------------------- */
/* I/O                                                                       */
/* ------------------------------------------------------------------------- */

/// Lis un fichier texte, ou tout stdin si `path` vaut `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s).context("lecture stdin")?;
        return Ok(s);
    }
    fs::read_to_string(path).with_context(|| format!("lecture {path}"))
}

/// Écrit `text` dans un fichier : dossiers créés au besoin, écriture dans un
/// fichier voisin puis renommage.
pub fn write_text_atomic(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("création {}", parent.display()))?;
    }
    let tmp = sibling_tmp(path);
    fs::write(&tmp, text).with_context(|| format!("écriture {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renommage vers {}", path.display()))?;
    Ok(())
}

fn sibling_tmp(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Écrit sur stdout (verrouillé) ou dans `out` si fourni.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => write_text_atomic(path, text),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("écriture stdout")?;
            stdout.flush().context("écriture stdout")?;
            Ok(())
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Sonde                                                                     */
/* ------------------------------------------------------------------------- */

/// Charge la table sondée à la compilation.
pub fn load_probe() -> Result<ProbeTable> {
    ProbeTable::load().context("catalogue sondé illisible")
}

/// Lie tout le catalogue sondé à ses valeurs.
pub fn bind_probe(probe: &ProbeTable) -> Result<BindingTable<'_>> {
    BindingTable::bind(probe.catalog(), probe).context("liaison des symboles")
}

/// Options du module généré, version des en-têtes comprise.
pub fn module_options(tool: &str, module_name: &str) -> ModuleOptions {
    ModuleOptions {
        module_name: module_name.to_owned(),
        generator: version_banner(tool),
        header_version: Some(curlconst_probe::header_version().to_owned()),
    }
}

/* ------------------------------------------------------------------------- */
/* Time / chrono                                                             */
/* ------------------------------------------------------------------------- */

/// Chrono de scope simple.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Démarre un chrono.
    pub fn start() -> Self { Self { start: Instant::now() } }
    /// Durée écoulée.
    pub fn elapsed(&self) -> Duration { self.start.elapsed() }
    /// Format humain court.
    pub fn pretty(&self) -> String { human_millis(self.elapsed()) }
}

/// Format "humain" d'une durée : `ms` sous la seconde, secondes au-delà.
pub fn human_millis(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1_000 {
        return format!("{ms} ms");
    }
    format!("{:.3} s", d.as_secs_f64())
}

/* ------------------------------------------------------------------------- */
/* Tests                                                                     */
/* ------------------------------------------------------------------------- */
