//! Textual dump of a bound catalog, one line per header or entry.
//!
//! ```text
//! @CURLcode
//! CURLE_OK=0
//! CURLE_UNSUPPORTED_PROTOCOL=1
//! @CURLFORMcode
//! ...
//! ```
//!
//! No blank lines, no comments. End of stream closes the last group.

use std::io::{self, Write};

use crate::binding::BindingTable;
use crate::{ENTRY_SEPARATOR, GROUP_SIGIL};

/// Write the whole table to `out` in catalog order.
pub fn write_dump<W: Write>(table: &BindingTable<'_>, mut out: W) -> io::Result<()> {
    for group in table.groups() {
        writeln!(out, "{GROUP_SIGIL}{}", group.name())?;
        for (symbol, value) in group.entries() {
            writeln!(out, "{symbol}{ENTRY_SEPARATOR}{value}")?;
        }
    }
    out.flush()
}

/// In-memory variant used by tools and tests.
pub fn render_dump(table: &BindingTable<'_>) -> String {
    let mut buf = Vec::with_capacity(table.len() * 24);
    // Writing into a Vec cannot fail.
    let _ = write_dump(table, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{Catalog, Value};

    fn bind_all(cat: &Catalog, value: impl Fn(usize) -> Value) -> BTreeMap<String, Value> {
        cat.symbols().enumerate().map(|(ix, s)| (s.to_owned(), value(ix))).collect()
    }

    #[test]
    fn writes_headers_then_entries() {
        let cat = Catalog::parse("@CURLcode\nCURLE_OK\nCURLE_AGAIN\n@none\n@curlpause\nCURLPAUSE_ALL\n").unwrap();
        let src: BTreeMap<String, Value> =
            [("CURLE_OK", 0), ("CURLE_AGAIN", 81), ("CURLPAUSE_ALL", 5)]
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect();
        let table = BindingTable::bind(&cat, &src).unwrap();

        assert_eq!(
            render_dump(&table),
            "@CURLcode\nCURLE_OK=0\nCURLE_AGAIN=81\n@none\n@curlpause\nCURLPAUSE_ALL=5\n"
        );
    }

    #[test]
    fn negative_values_keep_their_sign() {
        let cat = Catalog::parse("@curlauth\nCURLAUTH_ANY\n").unwrap();
        let src = bind_all(&cat, |_| -17);
        let table = BindingTable::bind(&cat, &src).unwrap();
        assert_eq!(render_dump(&table), "@curlauth\nCURLAUTH_ANY=-17\n");
    }

    #[test]
    fn appending_a_symbol_only_inserts_its_line() {
        let src: BTreeMap<String, Value> =
            [("A", 1), ("B", 2), ("C", 3), ("D", 4)].into_iter().map(|(k, v)| (k.to_owned(), v)).collect();
        let before = Catalog::parse("@g\nA\nB\n@h\nD\n").unwrap();
        let after = Catalog::parse("@g\nA\nB\nC\n@h\nD\n").unwrap();

        let old = render_dump(&BindingTable::bind(&before, &src).unwrap());
        let new = render_dump(&BindingTable::bind(&after, &src).unwrap());

        let new_lines: Vec<&str> = new.lines().collect();
        let added = new_lines.iter().position(|l| *l == "C=3").unwrap();
        assert_eq!(new_lines[added - 1], "B=2");

        let without: Vec<&str> = new_lines.iter().copied().filter(|l| *l != "C=3").collect();
        assert_eq!(without, old.lines().collect::<Vec<_>>());
        assert_eq!(new_lines.len(), old.lines().count() + 1);
    }

    #[test]
    fn builtin_dump_starts_with_curlcode_and_is_stable() {
        let cat = Catalog::builtin().unwrap();
        let src = bind_all(&cat, |ix| ix as Value);
        let table = BindingTable::bind(&cat, &src).unwrap();

        let first = render_dump(&table);
        let second = render_dump(&table);
        assert_eq!(first, second);

        let mut lines = first.lines();
        assert_eq!(lines.next(), Some("@CURLcode"));
        assert_eq!(lines.next(), Some("CURLE_OK=0"));
        assert_eq!(first.lines().filter(|l| l.starts_with('@')).count(), 35);
        assert_eq!(first.lines().filter(|l| !l.starts_with('@')).count(), 450);
        assert!(!first.contains("\n\n"));
    }

    fn is_entry_line(line: &str) -> bool {
        let Some((name, value)) = line.split_once('=') else { return false };
        let digits = value.strip_prefix('-').unwrap_or(value);
        crate::is_symbol_name(name) && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }

    proptest! {
        #[test]
        fn every_line_matches_the_grammar(values in proptest::collection::vec(any::<i32>(), 450)) {
            let cat = Catalog::builtin().unwrap();
            let src = bind_all(&cat, |ix| Value::from(values[ix]));
            let table = BindingTable::bind(&cat, &src).unwrap();
            for line in render_dump(&table).lines() {
                if let Some(group) = line.strip_prefix('@') {
                    prop_assert!(cat.group(group).is_some());
                } else {
                    prop_assert!(is_entry_line(line), "bad line {line:?}");
                }
            }
        }
    }
}
