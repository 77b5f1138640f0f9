// build.rs : sonde C, chaque symbole du catalogue est résolu par le compilateur C
// contre <curl/curl.h>. Un symbole absent des en-têtes = erreur de compilation,
// donc aucun binaire produit.
//
// Sorties (OUT_DIR) :
//   curlconst_probe.c  : tableau `curlconst_values[]` + LIBCURL_VERSION
//   probe_index.rs     : tailles du tableau pour le côté Rust
//   catalog.txt        : texte exact du catalogue sondé
//
// Configuration :
//   CURLCONST_CATALOG      : chemin d'un catalogue à la place du catalogue livré
//   CURLCONST_INCLUDE_DIR  : dossiers d'en-têtes supplémentaires (séparateur du PATH)
//   DEP_CURL_INCLUDE       : exporté par curl-sys (build vendored ou pkg-config)

use std::{env, fmt::Write as _, fs, path::PathBuf};

use curlconst_core::catalog::{Catalog, BUILTIN_SOURCE};

fn out_dir() -> PathBuf {
    env::var_os("OUT_DIR").map(PathBuf::from).expect("OUT_DIR is set by cargo")
}

fn env_path_list(key: &str) -> Vec<PathBuf> {
    env::var_os(key).map(|v| env::split_paths(&v).collect()).unwrap_or_default()
}

fn catalog_text() -> String {
    match env::var_os("CURLCONST_CATALOG") {
        Some(path) => {
            let path = PathBuf::from(path);
            println!("cargo:rerun-if-changed={}", path.display());
            fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("cannot read catalog {}: {e}", path.display()))
        }
        None => BUILTIN_SOURCE.to_owned(),
    }
}

// Les tableaux C de taille 0 sont interdits : on garde au moins un slot.
fn slots(count: usize) -> usize {
    count.max(1)
}

fn c_source(catalog: &Catalog) -> String {
    let mut c = String::new();
    let _ = writeln!(c, "/* Generated by curlconst-probe/build.rs. Do not edit. */");
    let _ = writeln!(c, "#define CURL_DISABLE_DEPRECATION 1");
    let _ = writeln!(c, "#undef CURL_NO_OLDIES");
    let _ = writeln!(c, "#include <curl/curl.h>");
    let _ = writeln!(c);
    let _ = writeln!(c, "const char *curlconst_header_version(void) {{ return LIBCURL_VERSION; }}");
    let _ = writeln!(c);
    let _ = writeln!(c, "const int curlconst_values[{}] = {{", slots(catalog.len()));
    for group in catalog.groups() {
        let _ = writeln!(c, "  /* @{} */", group.name());
        for symbol in group.symbols() {
            // int : même rendu que le `%d` historique (masques ~x compris).
            let _ = writeln!(c, "  (int)({symbol}),");
        }
    }
    if catalog.is_empty() {
        let _ = writeln!(c, "  0");
    }
    let _ = writeln!(c, "}};");
    c
}

fn rust_index(catalog: &Catalog) -> String {
    let mut r = String::new();
    let _ = writeln!(r, "/// Nombre de symboles résolus par la sonde.");
    let _ = writeln!(r, "pub const SYMBOL_COUNT: usize = {};", catalog.len());
    let _ = writeln!(r, "const PROBE_SLOTS: usize = {};", slots(catalog.len()));
    r
}

fn main() {
    for k in ["CURLCONST_CATALOG", "CURLCONST_INCLUDE_DIR", "DEP_CURL_INCLUDE", "DOCS_RS"] {
        println!("cargo:rerun-if-env-changed={k}");
    }
    println!("cargo:rerun-if-changed=build.rs");

    let text = catalog_text();
    let catalog = Catalog::parse(&text).unwrap_or_else(|e| panic!("invalid catalog: {e}"));

    let out = out_dir();
    let c_path = out.join("curlconst_probe.c");
    fs::write(out.join("catalog.txt"), &text).expect("write catalog.txt");
    fs::write(out.join("probe_index.rs"), rust_index(&catalog)).expect("write probe_index.rs");
    fs::write(&c_path, c_source(&catalog)).expect("write curlconst_probe.c");

    // docs.rs : pas d'en-têtes libcurl, la doc n'a pas besoin de l'objet C
    if env::var("DOCS_RS").is_ok() {
        return;
    }

    let mut build = cc::Build::new();
    build.file(&c_path).warnings(false).flag_if_supported("-Wno-deprecated-declarations");

    let mut includes = env_path_list("DEP_CURL_INCLUDE");
    includes.extend(env_path_list("CURLCONST_INCLUDE_DIR"));
    for dir in &includes {
        build.include(dir);
    }

    build.compile("curlconst_probe");

    println!(
        "cargo:warning=curlconst-probe: {} symbols in {} groups resolved against <curl/curl.h>",
        catalog.len(),
        catalog.groups().len()
    );
}
