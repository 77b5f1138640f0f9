//! Table de liaison : chaque symbole du catalogue associé à sa valeur résolue.
//!
//! La liaison est faite d’un bloc, avant toute écriture : soit tous les
//! symboles sont présents dans la source, soit on obtient une seule erreur
//! qui les nomme tous.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use thiserror::Error;

use crate::catalog::{Catalog, Group};
use crate::Value;

/// Fournisseur de valeurs par nom de symbole.
pub trait SymbolSource {
    /// Valeur du symbole, ou `None` s’il est inconnu de cette source.
    fn resolve(&self, symbol: &str) -> Option<Value>;
}

impl<S: BuildHasher> SymbolSource for HashMap<String, Value, S> {
    fn resolve(&self, symbol: &str) -> Option<Value> { self.get(symbol).copied() }
}

impl SymbolSource for BTreeMap<String, Value> {
    fn resolve(&self, symbol: &str) -> Option<Value> { self.get(symbol).copied() }
}

impl<T: SymbolSource + ?Sized> SymbolSource for &T {
    fn resolve(&self, symbol: &str) -> Option<Value> { (**self).resolve(symbol) }
}

/// Échec de liaison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// Symboles absents de la source, dans l’ordre du catalogue.
    #[error("{} catalog symbol(s) missing from the binding source: {}", .symbols.len(), .symbols.join(", "))]
    Missing {
        /// Noms manquants.
        symbols: Vec<String>,
    },
}

/// Catalogue + valeurs, alignées entrée par entrée.
#[derive(Debug, Clone)]
pub struct BindingTable<'c> {
    catalog: &'c Catalog,
    values: Vec<Value>,
}

/// Vue d’un groupe lié.
#[derive(Debug, Clone, Copy)]
pub struct BoundGroup<'t> {
    group: &'t Group,
    values: &'t [Value],
}

impl<'t> BoundGroup<'t> {
    /// Nom du groupe.
    pub fn name(&self) -> &'t str { self.group.name() }
    /// Description du groupe (commentaire de section), si présente.
    pub fn description(&self) -> Option<&'t str> { self.group.description() }
    /// Entrées `(symbole, valeur)` dans l’ordre.
    pub fn entries(&self) -> impl Iterator<Item = (&'t str, Value)> + 't {
        self.group.symbols().iter().map(String::as_str).zip(self.values.iter().copied())
    }
    /// Nombre d’entrées.
    pub fn len(&self) -> usize { self.values.len() }
    /// Vrai si le groupe est vide.
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

impl<'c> BindingTable<'c> {
    /// Résout tous les symboles de `catalog` via `source`.
    pub fn bind<S: SymbolSource + ?Sized>(catalog: &'c Catalog, source: &S) -> Result<Self, BindError> {
        let mut values = Vec::with_capacity(catalog.len());
        let mut missing = Vec::new();

        for symbol in catalog.symbols() {
            match source.resolve(symbol) {
                Some(v) => values.push(v),
                None => missing.push(symbol.to_owned()),
            }
        }

        if !missing.is_empty() {
            log::debug!("binding failed: {} symbol(s) unresolved", missing.len());
            return Err(BindError::Missing { symbols: missing });
        }
        log::debug!("bound {} symbols across {} groups", values.len(), catalog.groups().len());
        Ok(Self { catalog, values })
    }

    /// Catalogue sous-jacent.
    pub fn catalog(&self) -> &'c Catalog { self.catalog }

    /// Valeur d’un symbole catalogué.
    pub fn get(&self, symbol: &str) -> Option<Value> {
        self.catalog.symbols().position(|s| s == symbol).map(|ix| self.values[ix])
    }

    /// Groupes liés, dans l’ordre du catalogue.
    pub fn groups(&self) -> impl Iterator<Item = BoundGroup<'_>> + '_ {
        let mut offset = 0;
        self.catalog.groups().iter().map(move |group| {
            let values = &self.values[offset..offset + group.len()];
            offset += group.len();
            BoundGroup { group, values }
        })
    }

    /// Nombre d’entrées liées.
    pub fn len(&self) -> usize { self.values.len() }

    /// Vrai si la table est vide.
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}
