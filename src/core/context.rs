use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        error::Error,
        file_scanner::scan_files,
        parsers::haml::parse_haml_source,
        targets::TargetTable,
        walker::{Extraction, WalkError, walk},
    },
    issues::{Issue, MalformedLiteralIssue, ParseErrorIssue, SourceContext},
};

/// Outcome of extracting a set of templates.
pub struct ExtractionRun {
    /// Merged msgids of every template walked successfully.
    pub targets: TargetTable,
    /// Unreadable or unwalkable files and skipped literals, sorted.
    pub issues: Vec<Issue>,
    pub files_checked: usize,
}

/// Batch extraction over the templates of a project.
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. CLI arguments (e.g., `--source-root app`)
/// 2. `.hamli18nrc.json` config file
/// 3. Built-in defaults
pub struct ExtractContext {
    pub config: Config,
    /// Template paths, sorted.
    pub files: Vec<String>,
    pub verbose: bool,
}

impl ExtractContext {
    /// Discover templates under the source root.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let source_root = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = source_root
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", source_root))?;

        let config_result = load_config(Path::new(path))?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let config = config_result.config;

        let scan_result = scan_files(path, &config.includes, &config.ignores, verbose);
        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            files: scan_result.files.into_iter().collect(),
            verbose,
        })
    }

    /// Extract exactly `paths`, bypassing config discovery.
    pub fn with_files(paths: &[PathBuf], verbose: bool) -> Self {
        let mut files: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        files.sort();
        files.dedup();
        Self {
            config: Config::default(),
            files,
            verbose,
        }
    }

    /// Read and walk every file in parallel, then merge in path order.
    pub fn extract(&self) -> ExtractionRun {
        let results: Vec<(String, std::result::Result<(String, Extraction), FileError>)> = self
            .files
            .par_iter()
            .map(|file_path| (file_path.clone(), extract_file(file_path)))
            .collect();

        let mut targets = TargetTable::new();
        let mut issues = Vec::new();

        for (file_path, result) in results {
            match result {
                Ok((source, extraction)) => {
                    targets.merge(extraction.targets);
                    issues.extend(extraction.warnings.into_iter().map(|warning| {
                        let (literal, reason) = match warning.error {
                            Error::MalformedLiteral { literal, reason } => {
                                (literal, reason)
                            }
                            other => (String::new(), other.to_string()),
                        };
                        Issue::MalformedLiteral(MalformedLiteralIssue {
                            context: SourceContext::in_source(
                                &file_path,
                                &source,
                                warning.line,
                                warning.column,
                            ),
                            literal,
                            reason,
                        })
                    }));
                }
                Err(err) => {
                    if self.verbose {
                        eprintln!("{} {} - {}", "warning:".bold().yellow(), file_path, err);
                    }
                    issues.push(Issue::ParseError(err.into_issue(file_path)));
                }
            }
        }

        issues.sort();
        ExtractionRun {
            targets,
            issues,
            files_checked: self.files.len(),
        }
    }
}

enum FileError {
    Read(std::io::Error),
    Walk { source: String, error: WalkError },
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Read(e) => write!(f, "Failed to read file: {}", e),
            FileError::Walk { error, .. } => write!(f, "{}", error.source),
        }
    }
}

impl FileError {
    fn into_issue(self, file_path: String) -> ParseErrorIssue {
        let error = self.to_string();
        let context = match self {
            FileError::Read(_) => None,
            FileError::Walk {
                source,
                error: walk_error,
            } => Some(SourceContext::in_source(
                &file_path,
                &source,
                walk_error.line,
                walk_error.column,
            )),
        };
        ParseErrorIssue {
            file_path,
            error,
            context,
        }
    }
}

fn extract_file(file_path: &str) -> std::result::Result<(String, Extraction), FileError> {
    let source = std::fs::read_to_string(file_path).map_err(FileError::Read)?;
    let doc = parse_haml_source(&source, file_path);
    match walk(&doc) {
        Ok(extraction) => Ok((source, extraction)),
        Err(error) => Err(FileError::Walk { source, error }),
    }
}
