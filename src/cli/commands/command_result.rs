use crate::core::TargetRow;
use crate::issues::Issue;

use super::super::args::ExtractFormat;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Rewrite(RewriteSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub rows: Vec<TargetRow>,
    pub format: ExtractFormat,
}

#[derive(Debug)]
pub struct RewriteSummary {
    /// Rewritten template, `None` when it could not be rewritten.
    pub output: Option<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a command
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Problems found in the processed templates, sorted.
    pub issues: Vec<Issue>,
    /// Number of files that could not be read or walked.
    pub parse_error_count: usize,
    /// Number of templates processed.
    pub files_checked: usize,
}
