//! Catalogue des symboles : liste ordonnée de groupes, chacun portant ses noms.
//!
//! Le catalogue est une donnée, pas du code. Format ligne à ligne :
//!
//! ```text
//! # commentaire (ignoré), lignes vides ignorées
//! @CURLcode  Return codes from curl_easy_* functions
//! CURLE_OK
//! CURLE_UNSUPPORTED_PROTOCOL
//! ```
//!
//! L’ordre des groupes et des symboles est le contrat de sortie du dumper :
//! on ajoute, on ne réordonne pas.

use std::collections::HashSet;

use thiserror::Error;

use crate::{is_symbol_name, GROUP_SIGIL};

/// Texte du catalogue livré avec le crate.
pub const BUILTIN_SOURCE: &str = include_str!("../catalog/curl.catalog");

/* --------------------------- Erreurs --------------------------- */

/// Erreurs de lecture du catalogue. Les lignes sont numérotées à partir de 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Symbole rencontré avant tout en-tête `@groupe`.
    #[error("line {line}: symbol `{symbol}` appears before any @group header")]
    OrphanSymbol {
        /// Ligne fautive.
        line: usize,
        /// Symbole orphelin.
        symbol: String,
    },
    /// Nom de groupe ou de symbole hors `[A-Za-z0-9_]+`.
    #[error("line {line}: `{name}` is not a valid identifier")]
    InvalidName {
        /// Ligne fautive.
        line: usize,
        /// Nom refusé.
        name: String,
    },
    /// Groupe déclaré deux fois.
    #[error("line {line}: group `{group}` is declared twice")]
    DuplicateGroup {
        /// Ligne de la seconde déclaration.
        line: usize,
        /// Groupe dupliqué.
        group: String,
    },
    /// Symbole listé deux fois (dans le même groupe ou non).
    #[error("line {line}: symbol `{symbol}` is listed twice")]
    DuplicateSymbol {
        /// Ligne de la seconde occurrence.
        line: usize,
        /// Symbole dupliqué.
        symbol: String,
    },
}

/* --------------------------- Modèle --------------------------- */

/// Groupe nommé : en-tête `@name` suivi de ses symboles, dans l’ordre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    description: Option<String>,
    symbols: Vec<String>,
}

impl Group {
    /// Nom du groupe tel qu’écrit après `@`.
    pub fn name(&self) -> &str { &self.name }
    /// Description libre (commentaire de section), si présente.
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
    /// Symboles du groupe, dans l’ordre du catalogue.
    pub fn symbols(&self) -> &[String] { &self.symbols }
    /// Nombre de symboles.
    pub fn len(&self) -> usize { self.symbols.len() }
    /// Vrai si le groupe n’a aucun symbole.
    pub fn is_empty(&self) -> bool { self.symbols.is_empty() }
}

/// Catalogue complet, validé.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<Group>,
}

impl Catalog {
    /// Lit un catalogue depuis son texte.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut groups: Vec<Group> = Vec::new();
        let mut seen_groups = HashSet::new();
        let mut seen_symbols = HashSet::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(header) = trimmed.strip_prefix(GROUP_SIGIL) {
                let (name, description) = match header.split_once(char::is_whitespace) {
                    Some((n, d)) => (n, Some(d.trim()).filter(|d| !d.is_empty())),
                    None => (header, None),
                };
                if !is_symbol_name(name) {
                    return Err(CatalogError::InvalidName { line, name: name.to_owned() });
                }
                if !seen_groups.insert(name.to_owned()) {
                    return Err(CatalogError::DuplicateGroup { line, group: name.to_owned() });
                }
                groups.push(Group {
                    name: name.to_owned(),
                    description: description.map(str::to_owned),
                    symbols: Vec::new(),
                });
                continue;
            }

            if !is_symbol_name(trimmed) {
                return Err(CatalogError::InvalidName { line, name: trimmed.to_owned() });
            }
            let Some(current) = groups.last_mut() else {
                return Err(CatalogError::OrphanSymbol { line, symbol: trimmed.to_owned() });
            };
            if !seen_symbols.insert(trimmed.to_owned()) {
                return Err(CatalogError::DuplicateSymbol { line, symbol: trimmed.to_owned() });
            }
            current.symbols.push(trimmed.to_owned());
        }

        log::debug!("catalog: {} groups, {} symbols", groups.len(), seen_symbols.len());
        Ok(Self { groups })
    }

    /// Catalogue livré avec le crate (`catalog/curl.catalog`).
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_SOURCE)
    }

    /// Groupes, dans l’ordre.
    pub fn groups(&self) -> &[Group] { &self.groups }

    /// Recherche un groupe par nom exact.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Paires `(groupe, symbole)` dans l’ordre de sortie.
    pub fn entries(&self) -> impl Iterator<Item = (&Group, &str)> + '_ {
        self.groups
            .iter()
            .flat_map(|g| g.symbols.iter().map(move |s| (g, s.as_str())))
    }

    /// Tous les symboles, à plat, dans l’ordre.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries().map(|(_, s)| s)
    }

    /// Nombre total de symboles.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Vrai si aucun symbole n’est catalogué.
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/* --------------------------- Tests --------------------------- */
