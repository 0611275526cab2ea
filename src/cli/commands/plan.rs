//! Write reload task files for a change list

use std::path::Path;

use crate::cli::app::ReportArgs;
use nestreload::config::ReloadConfig;
use nestreload::output::{OperationResult, OutputMode};
use nestreload::workflows::Reloader;

/// Build the work lists and report the outcome
pub fn plan(
    config: &ReloadConfig,
    changes: &Path,
    report: &ReportArgs,
    output: &Path,
    clean: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let mut config = config.clone();
    config.output.clear_stale |= clean;

    let reloader = Reloader::new(config);
    match reloader.build_work_lists(changes, report.source()?, output) {
        Ok(outcome) => {
            outcome.render(mode);
            if !outcome.status {
                std::process::exit(1);
            }
            Ok(())
        },
        Err(e) => {
            if mode == OutputMode::Json {
                OperationResult {
                    success: false,
                    message: e.to_string(),
                }
                .render(mode);
            }
            Err(e.into())
        },
    }
}
