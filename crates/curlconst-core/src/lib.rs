//! curlconst-core: primitives partagées par la sonde et les outils
//!
//! Fournit :
//! - `Catalog` : liste ordonnée `(groupe, symbole)` chargée depuis `catalog/curl.catalog`
//! - `SymbolSource` + `BindingTable` : liaison nom → valeur, validée d’un bloc
//! - `write_dump` / `render_dump` : flux texte `@groupe` puis `NOM=VALEUR`
//! - `parse_dump` / `check_conformance` : côté consommateur du même flux
//! - `render_module` : module de constantes généré (sections triées, noms alignés)
//!
//! Ce crate ne résout aucun symbole lui-même : les valeurs viennent toujours
//! d’une `SymbolSource` (la sonde compilée contre `<curl/curl.h>`, un flux
//! relu, ou une table en mémoire dans les tests).

#![deny(missing_docs)]
#![deny(rust_2018_idioms, unused_must_use)]

/* ─────────────────────────── Modules publics ─────────────────────────── */

pub mod binding;
pub mod catalog;
pub mod dump;
pub mod pymod;
pub mod stream;

pub use binding::{BindError, BindingTable, BoundGroup, SymbolSource};
pub use catalog::{Catalog, CatalogError, Group};
pub use dump::{render_dump, write_dump};
pub use pymod::{render_module, sections_from_dump, sections_from_table, ModuleOptions, ModuleSection};
pub use stream::{check_conformance, parse_dump, Dump, DumpGroup, Mismatch, StreamError};

/* ─────────────────────────── Valeurs & noms ─────────────────────────── */

/// Valeur entière résolue pour un symbole (entier signé, base 10 à l’écriture).
pub type Value = i64;

/// Préfixe d’une ligne d’en-tête de groupe, dans le catalogue comme dans le flux.
pub const GROUP_SIGIL: char = '@';

/// Séparateur `NOM=VALEUR` du flux.
pub const ENTRY_SEPARATOR: char = '=';

/// Vrai si `name` est un identifiant admissible (`[A-Za-z0-9_]+`).
pub fn is_symbol_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Version lisible du crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/* ─────────────────────────── Prélude ─────────────────────────── */

/// Prélude pratique pour importer les types/fonctions clés du crate.
pub mod prelude {
    pub use super::{
        check_conformance, is_symbol_name, parse_dump, render_dump, render_module, write_dump,
        BindError, BindingTable, Catalog, CatalogError, Dump, ModuleOptions, ModuleSection,
        StreamError, SymbolSource, Value,
    };
}

/* ─────────────────────────── Tests ─────────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_names() {
        assert!(is_symbol_name("CURLE_OK"));
        assert!(is_symbol_name("curl_TimeCond"));
        assert!(is_symbol_name("CURL_SSLVERSION_TLSv1"));
        assert!(!is_symbol_name(""));
        assert!(!is_symbol_name("CURLE OK"));
        assert!(!is_symbol_name("@CURLcode"));
        assert!(!is_symbol_name("CURLE-OK"));
    }
}
