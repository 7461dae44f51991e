use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every template was processed
/// - `Failure` (1): some template could not be read or rewritten, or `init` found an existing config
/// - `Error` (2): the command itself failed (invalid config, unknown backend, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
