use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Extension of the templates the extractor understands.
pub const TEMPLATE_EXTENSION: &str = "haml";

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// True when `path` names a Haml template.
pub fn is_target(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(TEMPLATE_EXTENSION)
}

/// Result of scanning files.
pub struct ScanResult {
    /// Sorted template paths.
    pub files: BTreeSet<String>,
    pub skipped_count: usize,
}

fn warn(message: std::fmt::Arguments<'_>, verbose: bool) {
    if verbose {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

/// Ignore entries split by kind: literal paths match by prefix, globs by
/// pattern.
#[derive(Default)]
struct IgnoreRules {
    prefixes: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreRules {
    fn new(base: &Path, patterns: &[String], verbose: bool) -> Self {
        let mut rules = Self::default();
        for p in patterns {
            if !is_glob_pattern(p) {
                rules.prefixes.push(base.join(p));
                continue;
            }
            match Pattern::new(p) {
                Ok(pattern) => rules.globs.push(pattern),
                Err(e) => warn(format_args!("Invalid ignore pattern '{}': {}", p, e), verbose),
            }
        }
        rules
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
            || self
                .globs
                .iter()
                .any(|g| g.matches(&path.to_string_lossy()))
    }
}

/// Directories to walk: `base` itself, or every existing include.
///
/// Glob includes expand to the directories they match.
fn scan_roots(base: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base.to_path_buf()];
    }

    let mut roots = Vec::new();
    for inc in includes {
        let path = base.join(inc);
        if !is_glob_pattern(inc) {
            if path.exists() {
                roots.push(path);
            } else {
                warn(
                    format_args!("Include path does not exist: {}", path.display()),
                    verbose,
                );
            }
            continue;
        }
        match glob(&path.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|e| e.is_dir())),
            Err(e) => warn(format_args!("Invalid glob pattern '{}': {}", inc, e), verbose),
        }
    }
    roots
}

/// Collect the `.haml` templates under `base_dir`.
///
/// Unreadable entries are counted in `skipped_count` and reported only
/// when `verbose` is set.
pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let base = Path::new(base_dir);
    let ignores = IgnoreRules::new(base, ignore_patterns, verbose);

    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for root in scan_roots(base, includes, verbose) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    skipped_count += 1;
                    warn(format_args!("Cannot access path: {}", e), verbose);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_target(path) && !ignores.is_ignored(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}
