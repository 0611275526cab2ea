//! Report circular nesting

use crate::cli::app::ReportArgs;
use nestreload::config::ReloadConfig;
use nestreload::output::OutputMode;
use nestreload::workflows::Reloader;

/// List nesting chains that repeat a family
pub fn circular(config: &ReloadConfig, report: &ReportArgs, mode: OutputMode) -> anyhow::Result<()> {
    let outcome = Reloader::new(config.clone()).circular_references(report.source()?);
    outcome.render(mode);

    if !outcome.status {
        std::process::exit(1);
    }
    Ok(())
}
