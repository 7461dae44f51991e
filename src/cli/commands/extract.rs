use anyhow::Result;

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary, helper::finish};
use crate::core::ExtractContext;

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = if cmd.paths.is_empty() {
        ExtractContext::new(&cmd.common)?
    } else {
        ExtractContext::with_files(&cmd.paths, cmd.common.verbose)
    };

    let run = ctx.extract();

    Ok(finish(
        CommandSummary::Extract(ExtractSummary {
            rows: run.targets.into_rows(),
            format: cmd.format,
        }),
        run.issues,
        run.files_checked,
    ))
}
