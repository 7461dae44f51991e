use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::super::args::RewriteCommand;
use super::{CommandResult, CommandSummary, RewriteSummary, helper::finish};
use crate::{
    config::{Config, load_config},
    core::{Backend, MagicConfig, RenderOptions, STREAM_SOURCE_NAME, Translator},
    issues::{Issue, ParseErrorIssue, SourceContext},
};

pub fn rewrite(cmd: RewriteCommand) -> Result<CommandResult> {
    let source_root = cmd
        .common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let config = load_config(&source_root)?.config;
    let translator = translator(&cmd, &config)?;

    let (name, source) = if cmd.input == "-" {
        let source = io::read_to_string(io::stdin()).context("Failed to read standard input")?;
        (STREAM_SOURCE_NAME.to_string(), source)
    } else {
        let source = fs::read_to_string(Path::new(&cmd.input))
            .with_context(|| format!("Failed to read file: {}", cmd.input))?;
        (cmd.input.clone(), source)
    };

    let (output, issues) = match translator.rewrite_document(&source, &name) {
        Ok(output) => (Some(output), Vec::new()),
        Err(err) => {
            let context = SourceContext::in_source(&name, &source, err.line, err.column);
            let issue = ParseErrorIssue {
                file_path: name,
                error: err.source.to_string(),
                context: Some(context),
            };
            (None, vec![Issue::ParseError(issue)])
        }
    };

    Ok(finish(
        CommandSummary::Rewrite(RewriteSummary { output }),
        issues,
        1,
    ))
}

/// CLI flags take precedence over the config file.
fn translator(cmd: &RewriteCommand, config: &Config) -> Result<Translator> {
    let backend: Backend = match &cmd.backend {
        Some(name) => name.parse()?,
        None => config.parsed_backend()?,
    };
    let magic = MagicConfig {
        enabled: config.magic_translations,
        backend,
    };
    let options = RenderOptions {
        magic_translations: cmd.no_magic.then_some(false),
        escape_html: cmd.escape_html || config.escape_html,
    };
    Ok(Translator::new(magic, options))
}
