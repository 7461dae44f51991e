//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: List the msgids of Haml templates with their locations
//! - `rewrite`: Print a template with lookup calls injected
//! - `init`: Create a `.hamli18nrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Rewrite(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root searched for templates and the config file
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format of `extract`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExtractFormat {
    /// `[["msgid", "file:line", ...], ...]`
    #[default]
    Json,
    /// One msgid per line followed by its indented locations
    Text,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Templates to extract (default: every template under the source root)
    pub paths: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: ExtractFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RewriteCommand {
    /// Template to rewrite, `-` for standard input
    pub input: String,

    /// Translation backend (overrides config file)
    #[arg(long, env = "HAML_I18N_BACKEND")]
    pub backend: Option<String>,

    /// HTML-escape expressions interpolated into plain text
    #[arg(long)]
    pub escape_html: bool,

    /// Leave the template untouched
    #[arg(long)]
    pub no_magic: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings from Haml templates
    Extract(ExtractCommand),
    /// Rewrite a Haml template so its text is looked up at render time
    Rewrite(RewriteCommand),
    /// Initialize a new .hamli18nrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract() {
        let args = Arguments::parse_from(["haml-i18n", "extract", "a.haml", "--format", "text", "-v"]);
        match args.command {
            Some(Command::Extract(cmd)) => {
                assert_eq!(cmd.paths, vec![PathBuf::from("a.haml")]);
                assert_eq!(cmd.format, ExtractFormat::Text);
                assert!(cmd.common.verbose);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_rewrite() {
        let args = Arguments::parse_from([
            "haml-i18n",
            "rewrite",
            "-",
            "--backend",
            "gettext",
            "--escape-html",
        ]);
        match args.command {
            Some(Command::Rewrite(cmd)) => {
                assert_eq!(cmd.input, "-");
                assert_eq!(cmd.backend.as_deref(), Some("gettext"));
                assert!(cmd.escape_html);
                assert!(!cmd.no_magic);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_verify_cli() {
        Arguments::command().debug_assert();
    }
}
