//! Lecture du flux `@groupe` / `NOM=VALEUR` produit par `curlconst-dump`.
//!
//! Côté consommateur : un générateur de bindings relit le flux, regroupe les
//! entrées par en-tête, puis vérifie éventuellement que l’ordre correspond
//! au catalogue attendu (`check_conformance`).

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::binding::SymbolSource;
use crate::catalog::Catalog;
use crate::{is_symbol_name, Value, ENTRY_SEPARATOR, GROUP_SIGIL};

/* --------------------------- Erreurs --------------------------- */

/// Erreurs de syntaxe du flux. Les lignes sont numérotées à partir de 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Entrée avant tout en-tête `@groupe`.
    #[error("line {line}: entry before any @group header")]
    OrphanEntry {
        /// Ligne fautive.
        line: usize,
    },
    /// Ligne d’entrée sans `=`.
    #[error("line {line}: expected NAME=VALUE")]
    MissingSeparator {
        /// Ligne fautive.
        line: usize,
    },
    /// Nom de groupe ou de symbole invalide.
    #[error("line {line}: `{name}` is not a valid identifier")]
    InvalidName {
        /// Ligne fautive.
        line: usize,
        /// Nom refusé.
        name: String,
    },
    /// Valeur non entière.
    #[error("line {line}: `{value}` is not a base-10 integer")]
    InvalidValue {
        /// Ligne fautive.
        line: usize,
        /// Texte de la valeur.
        value: String,
    },
    /// Ligne vide (interdite par la grammaire).
    #[error("line {line}: blank line")]
    BlankLine {
        /// Ligne fautive.
        line: usize,
    },
}

/* --------------------------- Modèle --------------------------- */

/// Un groupe relu, avec ses entrées dans l’ordre du flux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpGroup {
    /// Nom après `@`.
    pub name: String,
    /// Paires `(symbole, valeur)`.
    pub entries: Vec<(String, Value)>,
}

/// Flux complet relu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dump {
    groups: Vec<DumpGroup>,
}

impl Dump {
    /// Groupes dans l’ordre d’apparition (doublons conservés).
    pub fn groups(&self) -> &[DumpGroup] { &self.groups }

    /// Première occurrence d’un groupe.
    pub fn group(&self, name: &str) -> Option<&DumpGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Nombre total d’entrées.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

impl SymbolSource for Dump {
    fn resolve(&self, symbol: &str) -> Option<Value> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|(name, _)| name == symbol)
            .map(|(_, v)| *v)
    }
}

/// Relit un flux complet.
pub fn parse_dump(text: &str) -> Result<Dump, StreamError> {
    let mut groups: Vec<DumpGroup> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if raw.is_empty() {
            return Err(StreamError::BlankLine { line });
        }

        if let Some(name) = raw.strip_prefix(GROUP_SIGIL) {
            if !is_symbol_name(name) {
                return Err(StreamError::InvalidName { line, name: name.to_owned() });
            }
            groups.push(DumpGroup { name: name.to_owned(), entries: Vec::new() });
            continue;
        }

        let Some(current) = groups.last_mut() else {
            return Err(StreamError::OrphanEntry { line });
        };
        let (name, value) = raw
            .split_once(ENTRY_SEPARATOR)
            .ok_or(StreamError::MissingSeparator { line })?;
        if !is_symbol_name(name) {
            return Err(StreamError::InvalidName { line, name: name.to_owned() });
        }
        let value = parse_value(value)
            .ok_or_else(|| StreamError::InvalidValue { line, value: value.to_owned() })?;
        current.entries.push((name.to_owned(), value));
    }

    Ok(Dump { groups })
}

// `-?[0-9]+` strict : pas de `+`, pas d’espaces.
fn parse_value(text: &str) -> Option<Value> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/* --------------------------- Conformité --------------------------- */

/// Écart entre un flux relu et le catalogue attendu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Groupe du catalogue absent du flux.
    MissingGroup {
        /// Groupe attendu.
        group: String,
    },
    /// Groupe du flux inconnu du catalogue.
    UnexpectedGroup {
        /// Groupe trouvé.
        group: String,
    },
    /// En-tête répété dans le flux.
    DuplicateGroup {
        /// Groupe répété.
        group: String,
    },
    /// Groupe présent mais à la mauvaise place.
    GroupOutOfOrder {
        /// Groupe attendu à cette position.
        expected: String,
        /// Groupe trouvé à cette position.
        found: String,
    },
    /// Symbole attendu absent de son groupe.
    MissingEntry {
        /// Groupe concerné.
        group: String,
        /// Symbole attendu.
        symbol: String,
    },
    /// Symbole inconnu du catalogue pour ce groupe.
    UnexpectedEntry {
        /// Groupe concerné.
        group: String,
        /// Symbole trouvé.
        symbol: String,
    },
    /// Symbole présent mais à la mauvaise place.
    EntryOutOfOrder {
        /// Groupe concerné.
        group: String,
        /// Symbole attendu à cette position.
        expected: String,
        /// Symbole trouvé à cette position.
        found: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::MissingGroup { group } => write!(f, "missing group @{group}"),
            Mismatch::UnexpectedGroup { group } => write!(f, "unexpected group @{group}"),
            Mismatch::DuplicateGroup { group } => write!(f, "group @{group} appears more than once"),
            Mismatch::GroupOutOfOrder { expected, found } => {
                write!(f, "group order: expected @{expected}, found @{found}")
            }
            Mismatch::MissingEntry { group, symbol } => write!(f, "@{group}: missing {symbol}"),
            Mismatch::UnexpectedEntry { group, symbol } => write!(f, "@{group}: unexpected {symbol}"),
            Mismatch::EntryOutOfOrder { group, expected, found } => {
                write!(f, "@{group}: expected {expected}, found {found}")
            }
        }
    }
}

/// Compare un flux au catalogue : groupes, entrées, et leur ordre relatif.
pub fn check_conformance(dump: &Dump, catalog: &Catalog) -> Vec<Mismatch> {
    let mut out = Vec::new();

    let mut seen = HashSet::new();
    for g in dump.groups() {
        if !seen.insert(g.name.as_str()) {
            out.push(Mismatch::DuplicateGroup { group: g.name.clone() });
        }
    }

    let expected: Vec<&str> = catalog.groups().iter().map(|g| g.name()).collect();
    let found: Vec<&str> = {
        let mut first = HashSet::new();
        dump.groups()
            .iter()
            .map(|g| g.name.as_str())
            .filter(|n| first.insert(*n))
            .collect()
    };

    for name in &expected {
        if !found.contains(name) {
            out.push(Mismatch::MissingGroup { group: (*name).to_owned() });
        }
    }
    for name in &found {
        if !expected.contains(name) {
            out.push(Mismatch::UnexpectedGroup { group: (*name).to_owned() });
        }
    }
    let common_expected = expected.iter().filter(|n| found.contains(*n));
    let common_found = found.iter().filter(|n| expected.contains(*n));
    for (e, f) in common_expected.zip(common_found) {
        if e != f {
            out.push(Mismatch::GroupOutOfOrder { expected: (*e).to_owned(), found: (*f).to_owned() });
        }
    }

    for group in catalog.groups() {
        let Some(dumped) = dump.group(group.name()) else { continue };
        let want: Vec<&str> = group.symbols().iter().map(String::as_str).collect();
        let got: Vec<&str> = dumped.entries.iter().map(|(s, _)| s.as_str()).collect();

        for s in &want {
            if !got.contains(s) {
                out.push(Mismatch::MissingEntry { group: group.name().to_owned(), symbol: (*s).to_owned() });
            }
        }
        for s in &got {
            if !want.contains(s) {
                out.push(Mismatch::UnexpectedEntry { group: group.name().to_owned(), symbol: (*s).to_owned() });
            }
        }
        let w = want.iter().filter(|s| got.contains(*s));
        let g = got.iter().filter(|s| want.contains(*s));
        for (e, f) in w.zip(g) {
            if e != f {
                out.push(Mismatch::EntryOutOfOrder {
                    group: group.name().to_owned(),
                    expected: (*e).to_owned(),
                    found: (*f).to_owned(),
                });
            }
        }
    }

    out
}

/* --------------------------- Tests --------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "@CURLcode\nCURLE_OK=0\nCURLE_AGAIN=81\n@curlauth\nCURLAUTH_ANY=-17\n@empty\n";

    #[test]
    fn groups_entries_by_header() {
        let dump = parse_dump(SAMPLE).unwrap();
        assert_eq!(
            dump.groups(),
            &[
                DumpGroup {
                    name: "CURLcode".into(),
                    entries: vec![("CURLE_OK".into(), 0), ("CURLE_AGAIN".into(), 81)],
                },
                DumpGroup { name: "curlauth".into(), entries: vec![("CURLAUTH_ANY".into(), -17)] },
                DumpGroup { name: "empty".into(), entries: vec![] },
            ]
        );
        assert_eq!(dump.entry_count(), 3);
        assert_eq!(dump.resolve("CURLAUTH_ANY"), Some(-17));
        assert_eq!(dump.resolve("CURLE_NOPE"), None);
    }

    #[test]
    fn last_line_may_lack_newline() {
        let dump = parse_dump("@a\nX=1").unwrap();
        assert_eq!(dump.resolve("X"), Some(1));
        assert_eq!(parse_dump("").unwrap(), Dump::default());
    }

    #[test]
    fn syntax_errors_carry_line_numbers() {
        assert_eq!(parse_dump("X=1\n").unwrap_err(), StreamError::OrphanEntry { line: 1 });
        assert_eq!(parse_dump("@a\nX\n").unwrap_err(), StreamError::MissingSeparator { line: 2 });
        assert_eq!(parse_dump("@a\n\nX=1\n").unwrap_err(), StreamError::BlankLine { line: 2 });
        assert_eq!(
            parse_dump("@a b\n").unwrap_err(),
            StreamError::InvalidName { line: 1, name: "a b".into() }
        );
        assert_eq!(
            parse_dump("@a\nX=+1\n").unwrap_err(),
            StreamError::InvalidValue { line: 2, value: "+1".into() }
        );
        assert_eq!(
            parse_dump("@a\nX=0x10\n").unwrap_err(),
            StreamError::InvalidValue { line: 2, value: "0x10".into() }
        );
        assert_eq!(
            parse_dump("@a\nX=-\n").unwrap_err(),
            StreamError::InvalidValue { line: 2, value: "-".into() }
        );
    }

    #[test]
    fn conforming_dump_has_no_mismatch() {
        let cat = Catalog::parse("@CURLcode\nCURLE_OK\nCURLE_AGAIN\n@curlauth\nCURLAUTH_ANY\n@empty\n").unwrap();
        let dump = parse_dump(SAMPLE).unwrap();
        assert!(check_conformance(&dump, &cat).is_empty());
    }

    #[test]
    fn reports_missing_extra_and_reordered() {
        let cat = Catalog::parse("@g1\nA\nB\nC\n@g2\nD\n@g3\nE\n").unwrap();
        let dump = parse_dump("@g2\nD=1\n@g1\nB=1\nA=2\nZ=3\n@g9\n@g2\n").unwrap();
        let got = check_conformance(&dump, &cat);
        assert_eq!(
            got,
            vec![
                Mismatch::DuplicateGroup { group: "g2".into() },
                Mismatch::MissingGroup { group: "g3".into() },
                Mismatch::UnexpectedGroup { group: "g9".into() },
                Mismatch::GroupOutOfOrder { expected: "g1".into(), found: "g2".into() },
                Mismatch::GroupOutOfOrder { expected: "g2".into(), found: "g1".into() },
                Mismatch::MissingEntry { group: "g1".into(), symbol: "C".into() },
                Mismatch::UnexpectedEntry { group: "g1".into(), symbol: "Z".into() },
                Mismatch::EntryOutOfOrder { group: "g1".into(), expected: "A".into(), found: "B".into() },
                Mismatch::EntryOutOfOrder { group: "g1".into(), expected: "B".into(), found: "A".into() },
            ]
        );
        assert_eq!(got[7].to_string(), "@g1: expected A, found B");
    }

    #[test]
    fn appended_symbol_keeps_previous_lines() {
        let old = Catalog::parse("@g\nA\nB\n").unwrap();
        let new = Catalog::parse("@g\nA\nB\nC\n").unwrap();
        let dump = parse_dump("@g\nA=1\nB=2\nC=3\n").unwrap();
        assert!(check_conformance(&dump, &new).is_empty());
        assert_eq!(
            check_conformance(&dump, &old),
            vec![Mismatch::UnexpectedEntry { group: "g".into(), symbol: "C".into() }]
        );
    }
}
