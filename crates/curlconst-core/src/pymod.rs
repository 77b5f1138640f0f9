//! Rendu d’un module Python `constants.py` à partir des valeurs liées.
//!
//! Sections triées par nom de groupe (insensible à la casse), une ligne de
//! commentaire `# --- description ----…` sur 72 colonnes quand le catalogue
//! décrit le groupe, puis `NOM = VALEUR` avec les noms alignés.

use std::fmt::Write;

use crate::binding::{BindingTable, BoundGroup};
use crate::catalog::Catalog;
use crate::stream::{Dump, DumpGroup};
use crate::Value;

/// Largeur visée pour les lignes de commentaire de section.
pub const SECTION_RULE_WIDTH: usize = 72;

/// Options de rendu.
#[derive(Debug, Clone)]
pub struct ModuleOptions {
    /// Nom du fichier généré, repris dans l’en-tête.
    pub module_name: String,
    /// Outil générateur (nom + version).
    pub generator: String,
    /// Version des en-têtes libcurl d’où viennent les valeurs, si connue.
    pub header_version: Option<String>,
}

impl Default for ModuleOptions {
    fn default() -> Self {
        Self {
            module_name: "constants.py".into(),
            generator: format!("curlconst {}", crate::VERSION),
            header_version: None,
        }
    }
}

/// Une section du module : un groupe et ses entrées.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSection<'a> {
    /// Nom du groupe.
    pub name: &'a str,
    /// Commentaire de section.
    pub description: Option<&'a str>,
    /// Entrées dans l’ordre du groupe.
    pub entries: Vec<(&'a str, Value)>,
}

impl<'a> From<BoundGroup<'a>> for ModuleSection<'a> {
    fn from(g: BoundGroup<'a>) -> Self {
        Self { name: g.name(), description: g.description(), entries: g.entries().collect() }
    }
}

impl<'a> ModuleSection<'a> {
    /// Section issue d’un flux relu ; la description vient du catalogue s’il connaît le groupe.
    pub fn from_dump_group(group: &'a DumpGroup, catalog: &'a Catalog) -> Self {
        Self {
            name: &group.name,
            description: catalog.group(&group.name).and_then(|g| g.description()),
            entries: group.entries.iter().map(|(s, v)| (s.as_str(), *v)).collect(),
        }
    }
}

/// Sections d’une table liée.
pub fn sections_from_table<'a>(table: &'a BindingTable<'a>) -> Vec<ModuleSection<'a>> {
    table.groups().map(ModuleSection::from).collect()
}

/// Sections d’un flux relu. Les en-têtes répétés sont fusionnés dans la première occurrence.
pub fn sections_from_dump<'a>(dump: &'a Dump, catalog: &'a Catalog) -> Vec<ModuleSection<'a>> {
    let mut out: Vec<ModuleSection<'a>> = Vec::new();
    for g in dump.groups() {
        let section = ModuleSection::from_dump_group(g, catalog);
        match out.iter_mut().find(|s| s.name == section.name) {
            Some(existing) => existing.entries.extend(section.entries),
            None => out.push(section),
        }
    }
    out
}

fn section_rule(description: &str) -> String {
    let mut line = format!("# --- {description} ");
    let len = line.chars().count();
    if len < SECTION_RULE_WIDTH {
        line.extend(std::iter::repeat('-').take(SECTION_RULE_WIDTH - len));
    }
    line
}

/// Rend le module complet.
pub fn render_module<'a>(sections: impl IntoIterator<Item = ModuleSection<'a>>, opts: &ModuleOptions) -> String {
    let mut sections: Vec<ModuleSection<'a>> = sections.into_iter().collect();
    sections.sort_by_key(|s| s.name.to_lowercase());

    let width = sections
        .iter()
        .flat_map(|s| s.entries.iter())
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "##");
    let _ = writeln!(out, "## Name:     {}", opts.module_name);
    let _ = writeln!(out, "## Purpose:  Symbolic constants defined by libcurl.");
    let _ = writeln!(out, "##");
    let _ = writeln!(out, "## Generated by {} from <curl/curl.h>.", opts.generator);
    if let Some(v) = &opts.header_version {
        let _ = writeln!(out, "## libcurl headers: {v}");
    }
    let _ = writeln!(out, "## Do not edit: regenerate instead.");
    let _ = writeln!(out, "##");

    for section in &sections {
        let _ = writeln!(out);
        if let Some(d) = section.description {
            let _ = writeln!(out, "{}", section_rule(d));
        }
        for (name, value) in &section.entries {
            let _ = writeln!(out, "{name:<width$} = {value}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "# end of generated constants");
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stream::parse_dump;

    fn opts() -> ModuleOptions {
        ModuleOptions {
            module_name: "constants.py".into(),
            generator: "curlconst-pymod test".into(),
            header_version: Some("8.5.0".into()),
        }
    }

    #[test]
    fn sorts_sections_and_aligns_names() {
        let cat = Catalog::parse("@zeta  Zeta codes\nZ_LONG_NAME\n@Alpha\nA\n@beta  Beta codes\nB_1\nB_22\n").unwrap();
        let src: BTreeMap<String, Value> =
            [("Z_LONG_NAME", 7), ("A", -1), ("B_1", 1), ("B_22", 22)]
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect();
        let table = BindingTable::bind(&cat, &src).unwrap();
        let text = render_module(sections_from_table(&table), &opts());

        let expected = "\
##
## Name:     constants.py
## Purpose:  Symbolic constants defined by libcurl.
##
## Generated by curlconst-pymod test from <curl/curl.h>.
## libcurl headers: 8.5.0
## Do not edit: regenerate instead.
##

A           = -1

# --- Beta codes -------------------------------------------------------
B_1         = 1
B_22        = 22

# --- Zeta codes -------------------------------------------------------
Z_LONG_NAME = 7

# end of generated constants
";
        assert_eq!(text, expected);
    }

    #[test]
    fn section_rule_is_72_columns_unless_longer() {
        assert_eq!(section_rule("Option type codes").len(), SECTION_RULE_WIDTH);
        let long = "x".repeat(80);
        assert_eq!(section_rule(&long), format!("# --- {long} "));
    }

    #[test]
    fn dump_sections_take_descriptions_from_catalog_and_merge_repeats() {
        let cat = Catalog::parse("@g  Known\nA\nB\n").unwrap();
        let dump = parse_dump("@g\nA=1\n@other\nC=3\n@g\nB=2\n").unwrap();
        let sections = sections_from_dump(&dump, &cat);
        assert_eq!(
            sections,
            vec![
                ModuleSection { name: "g", description: Some("Known"), entries: vec![("A", 1), ("B", 2)] },
                ModuleSection { name: "other", description: None, entries: vec![("C", 3)] },
            ]
        );
    }

    #[test]
    fn empty_input_still_renders_header_and_trailer() {
        let text = render_module(Vec::new(), &ModuleOptions::default());
        assert!(text.starts_with("##\n## Name:     constants.py\n"));
        assert!(text.ends_with("\n# end of generated constants\n"));
        assert!(!text.contains("libcurl headers"));
    }
}
