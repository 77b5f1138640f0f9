//! curlconst-probe: valeurs des constantes libcurl, résolues à la compilation.
//!
//! `build.rs` génère un fichier C qui inclut `<curl/curl.h>` et range chaque
//! symbole du catalogue dans un tableau `int`. Le compilateur C fait la
//! résolution : un symbole inconnu des en-têtes fait échouer le build.
//!
//! Côté Rust, [`ProbeTable`] associe ces valeurs aux noms du catalogue sondé et
//! implémente [`SymbolSource`].

use std::collections::HashMap;

use curlconst_core::{Catalog, CatalogError, SymbolSource, Value};

include!(concat!(env!("OUT_DIR"), "/probe_index.rs"));

/// Texte exact du catalogue sondé par `build.rs`.
pub const PROBED_CATALOG: &str = include_str!(concat!(env!("OUT_DIR"), "/catalog.txt"));

#[allow(unsafe_code)]
mod ffi {
    use std::ffi::{c_char, c_int, CStr};

    use super::PROBE_SLOTS;

    extern "C" {
        static curlconst_values: [c_int; PROBE_SLOTS];
        fn curlconst_header_version() -> *const c_char;
    }

    /// Tableau produit par la sonde, un slot par symbole (plus un slot factice si vide).
    pub fn values() -> &'static [c_int] {
        // SAFETY: tableau `const` défini par l'objet C, jamais modifié.
        unsafe { &curlconst_values }
    }

    pub fn header_version() -> &'static str {
        // SAFETY: LIBCURL_VERSION est un littéral statique terminé par NUL.
        let raw = unsafe { CStr::from_ptr(curlconst_header_version()) };
        raw.to_str().unwrap_or("unknown")
    }
}

/// Version des en-têtes `<curl/curl.h>` vus par la sonde (`LIBCURL_VERSION`).
pub fn header_version() -> &'static str {
    ffi::header_version()
}

/// Valeurs brutes, dans l'ordre du catalogue sondé.
pub fn raw_values() -> &'static [i32] {
    &ffi::values()[..SYMBOL_COUNT]
}

/// Catalogue sondé + index symbole → slot.
#[derive(Debug, Clone)]
pub struct ProbeTable {
    catalog: Catalog,
    index: HashMap<String, usize>,
}

impl ProbeTable {
    /// Relit le catalogue sondé. Ne peut échouer que si `build.rs` et la
    /// bibliothèque divergent, ce que le build a déjà vérifié.
    pub fn load() -> Result<Self, CatalogError> {
        let catalog = Catalog::parse(PROBED_CATALOG)?;
        let index = catalog.symbols().enumerate().map(|(ix, s)| (s.to_owned(), ix)).collect();
        log::debug!("probe: {} symbols, libcurl headers {}", SYMBOL_COUNT, header_version());
        Ok(Self { catalog, index })
    }

    /// Catalogue sondé.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Valeur d'un symbole sondé.
    pub fn value(&self, symbol: &str) -> Option<Value> {
        let ix = *self.index.get(symbol)?;
        raw_values().get(ix).map(|v| Value::from(*v))
    }
}

impl SymbolSource for ProbeTable {
    fn resolve(&self, symbol: &str) -> Option<Value> {
        self.value(symbol)
    }
}
