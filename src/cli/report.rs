//! Report formatting and printing utilities.
//!
//! Command output (msgid rows, rewritten templates) goes to stdout so it can
//! be piped; issues and summaries go to stderr in cargo style.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::ExtractFormat,
    commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::TargetRow;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Write extracted rows in `format`.
pub fn write_rows<W: Write>(rows: &[TargetRow], format: ExtractFormat, writer: &mut W) {
    match format {
        ExtractFormat::Json => {
            let json = serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string());
            let _ = writeln!(writer, "{}", json);
        }
        ExtractFormat::Text => {
            for row in rows {
                let _ = writeln!(writer, "{}", row.msgid);
                for location in &row.locations {
                    let _ = writeln!(writer, "  {}", location);
                }
            }
        }
    }
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(msgids: usize, files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} {}",
            msgids,
            if msgids == 1 { "msgid" } else { "msgids" },
            files,
            if files == 1 { "template" } else { "templates" }
        )
        .green()
    );
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be processed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    print_to(result, verbose, &mut stdout, &mut stderr);
}

/// Print a command result, data to `out` and diagnostics to `err`.
pub fn print_to<O: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract(summary, result, verbose, out, err),
        CommandSummary::Rewrite(summary) => {
            if let Some(output) = &summary.output {
                let _ = write!(out, "{}", output);
            }
            report_to(&result.issues, err);
        }
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn print_extract<O: Write, E: Write>(
    summary: &ExtractSummary,
    result: &CommandResult,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    write_rows(&summary.rows, summary.format, out);
    report_to(&result.issues, err);
    if result.error_count == 0 {
        print_success_to(summary.rows.len(), result.files_checked, err);
    }
    print_parse_warning_to(result.parse_error_count, verbose, err);
}

fn print_init<O: Write, E: Write>(summary: &InitSummary, out: &mut O, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            err,
            "{} {} already exists",
            "error:".bold().red(),
            CONFIG_FILE_NAME
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Source(ctx) => {
            let (line, col) = (ctx.line(), ctx.col());
            let source_line = ctx.source_line.as_str();
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path(),
                line,
                col
            );

            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                source_line,
                width = max_line_width
            );

            // col is 1-based
            let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::Location;
    use crate::issues::{MalformedLiteralIssue, ParseErrorIssue, SourceContext, SourceLocation};

    fn render<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    fn rows() -> Vec<TargetRow> {
        vec![
            TargetRow {
                msgid: "Hello %s!".to_string(),
                locations: vec![Location::new("a.haml", 1), Location::new("b.haml", 4)],
            },
            TargetRow {
                msgid: "Title".to_string(),
                locations: vec![Location::new("a.haml", 2)],
            },
        ]
    }

    #[test]
    fn test_write_rows_json() {
        let output = render(|buf| write_rows(&rows(), ExtractFormat::Json, buf));
        assert_eq!(
            output,
            "[[\"Hello %s!\",\"a.haml:1\",\"b.haml:4\"],[\"Title\",\"a.haml:2\"]]\n"
        );
    }

    #[test]
    fn test_write_rows_text() {
        let output = render(|buf| write_rows(&rows(), ExtractFormat::Text, buf));
        assert_eq!(output, "Hello %s!\n  a.haml:1\n  b.haml:4\nTitle\n  a.haml:2\n");
    }

    #[test]
    fn test_report_issue_with_source() {
        let issues = vec![Issue::ParseError(ParseErrorIssue {
            file_path: "views/a.haml".to_string(),
            error: "unterminated interpolation starting at byte 6".to_string(),
            context: Some(SourceContext::new(
                SourceLocation::new("views/a.haml", 2, 12),
                "  %p Hello #{name",
            )),
        })];
        let output = render(|buf| report_to(&issues, buf));
        assert_eq!(
            output,
            "error: unterminated interpolation starting at byte 6  parse-error\n  \
             --> views/a.haml:2:12\n  \
             |\n\
             2 |   %p Hello #{name\n  \
             |            ^\n  \
             = note: no msgids were extracted from this file\n\
             \n\
             \u{2718} 1 problems (1 error, 0 warnings)\n"
        );
    }

    #[test]
    fn test_report_issue_without_source() {
        let issues = vec![Issue::ParseError(ParseErrorIssue {
            file_path: "gone.haml".to_string(),
            error: "Failed to read file".to_string(),
            context: None,
        })];
        let output = render(|buf| report_to(&issues, buf));
        assert!(output.starts_with("error: Failed to read file  parse-error\n  --> gone.haml\n"));
    }

    #[test]
    fn test_report_warning_summary() {
        let issues = vec![Issue::MalformedLiteral(MalformedLiteralIssue {
            context: SourceContext::new(SourceLocation::new("a.haml", 2, 5), "  a(_('\\x'));"),
            literal: "\\x".to_string(),
            reason: "invalid escape".to_string(),
        })];
        let output = render(|buf| report_to(&issues, buf));
        assert!(output.contains("warning: \\x  malformed-literal\n"));
        assert!(output.ends_with("1 problems (0 errors, 1 warning)\n"));
    }

    #[test]
    fn test_success_message() {
        let output = render(|buf| print_success_to(1, 2, buf));
        assert_eq!(output, "\u{2713} Extracted 1 msgid from 2 templates\n");
    }

    #[test]
    fn test_parse_warning_hidden_when_verbose() {
        assert_eq!(render(|buf| print_parse_warning_to(2, true, buf)), "");
        assert_eq!(
            render(|buf| print_parse_warning_to(2, false, buf)),
            "warning: 2 file(s) could not be processed (use -v for details)\n"
        );
    }
}
