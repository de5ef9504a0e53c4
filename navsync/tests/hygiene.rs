//! Source hygiene checks for the navsync crate.
//!
//! These tests scan the navsync crate source tree for antipatterns. Each rule
//! has a budget (ideally zero). The crate must stay free of browser bindings
//! and wall-clock reads so every controller runs under `cargo test` with
//! virtual time.

use std::fs;
use std::path::Path;

struct Rule {
    pattern: &'static str,
    budget: usize,
    why: &'static str,
}

const RULES: &[Rule] = &[
    // Panics.
    Rule { pattern: ".unwrap()", budget: 0, why: "propagate or handle the error" },
    Rule { pattern: ".expect(", budget: 0, why: "propagate or handle the error" },
    Rule { pattern: "panic!(", budget: 0, why: "controllers degrade silently instead" },
    Rule { pattern: "unreachable!(", budget: 0, why: "model the state so it cannot happen" },
    Rule { pattern: "todo!(", budget: 0, why: "no stubs in shipped controllers" },
    Rule { pattern: "unimplemented!(", budget: 0, why: "no stubs in shipped controllers" },
    // Silent loss.
    Rule { pattern: "let _ =", budget: 0, why: "log the failure instead of discarding it" },
    Rule { pattern: ".ok()", budget: 0, why: "log the failure instead of discarding it" },
    // Layering.
    Rule { pattern: "web_sys", budget: 0, why: "DOM access belongs in the pagectl host" },
    Rule { pattern: "wasm_bindgen", budget: 0, why: "DOM access belongs in the pagectl host" },
    Rule { pattern: "Instant::now", budget: 0, why: "time is passed in as now_ms" },
    Rule { pattern: "SystemTime", budget: 0, why: "time is passed in as now_ms" },
    // Style.
    Rule { pattern: "#[allow(dead_code)]", budget: 0, why: "delete unused code" },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `navsync/src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

/// Lines containing `pattern`, skipping comments.
fn hits(files: &[SourceFile], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim_start().starts_with("//"))
                .filter(|(_, line)| line.contains(pattern))
                .map(|(n, line)| format!("  {}:{}: {}", file.path, n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("sync.rs")), "run from the navsync crate root");
}

#[test]
fn every_rule_within_budget() {
    let files = source_files();
    let mut failures = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        if found.len() > rule.budget {
            failures.push(format!(
                "`{}` budget exceeded: found {}, max {} ({}).\n{}",
                rule.pattern,
                found.len(),
                rule.budget,
                rule.why,
                found.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}

#[test]
fn every_module_has_sibling_tests() {
    let files = source_files();
    let missing: Vec<&str> = files
        .iter()
        .filter(|f| !f.path.ends_with("lib.rs") && !f.path.ends_with("consts.rs"))
        .filter(|f| !f.content.contains("#[path = \""))
        .map(|f| f.path.as_str())
        .collect();
    assert!(missing.is_empty(), "modules without a *_test.rs sibling: {missing:?}");
}
