// Valeurs sondées contre les en-têtes libcurl réels.
// Les valeurs vérifiées ici sont figées dans l'ABI de libcurl.

use curlconst_core::{BindingTable, Catalog, SymbolSource};
use curlconst_probe::{header_version, raw_values, ProbeTable, PROBED_CATALOG, SYMBOL_COUNT};
use pretty_assertions::assert_eq;

fn table() -> ProbeTable {
    ProbeTable::load().expect("probed catalog parses")
}

#[test]
fn probed_catalog_is_the_builtin_one_by_default() {
    if std::env::var_os("CURLCONST_CATALOG").is_some() {
        return;
    }
    assert_eq!(PROBED_CATALOG, curlconst_core::catalog::BUILTIN_SOURCE);
    assert_eq!(SYMBOL_COUNT, Catalog::builtin().unwrap().len());
}

#[test]
fn one_value_per_symbol() {
    let t = table();
    assert_eq!(raw_values().len(), t.catalog().len());
    assert_eq!(raw_values().len(), SYMBOL_COUNT);
}

#[test]
fn stable_abi_values() {
    let t = table();
    let expect = [
        ("CURLE_OK", 0),
        ("CURLE_UNSUPPORTED_PROTOCOL", 1),
        ("CURLSHOPT_SHARE", 1),
        ("CURLSHOPT_UNSHARE", 2),
        ("CURLPAUSE_RECV", 1),
        ("CURLPAUSE_SEND", 4),
        ("CURLPAUSE_ALL", 5),
        ("CURLPAUSE_CONT", 0),
        ("CURLPAUSE_RECV_CONT", 0),
        ("CURLPAUSE_SEND_CONT", 0),
        ("CURL_GLOBAL_SSL", 1),
        ("CURL_GLOBAL_WIN32", 2),
        ("CURL_GLOBAL_ALL", 3),
        ("CURLAUTH_NONE", 0),
        ("CURLAUTH_BASIC", 1),
    ];
    for (symbol, value) in expect {
        if t.catalog().symbols().any(|s| s == symbol) {
            assert_eq!(t.resolve(symbol), Some(value), "{symbol}");
        }
    }
}

#[test]
fn unknown_symbols_do_not_resolve() {
    assert_eq!(table().resolve("CURLE_NOT_A_REAL_CODE"), None);
}

#[test]
fn whole_catalog_binds() {
    let t = table();
    let bound = BindingTable::bind(t.catalog(), &t).expect("every probed symbol resolves");
    assert_eq!(bound.len(), SYMBOL_COUNT);
}

#[test]
fn header_version_looks_like_a_version() {
    let v = header_version();
    assert!(!v.is_empty());
    assert!(v.split('.').next().is_some_and(|major| major.parse::<u32>().is_ok()), "{v}");
}
