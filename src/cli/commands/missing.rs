//! Report nested families missing from the library

use serde::Serialize;

use crate::cli::app::ReportArgs;
use nestreload::config::ReloadConfig;
use nestreload::core::models::{Identity, Outcome, RootFamily};
use nestreload::output::{HumanDetail, OutputMode};
use nestreload::workflows::Reloader;

/// Missing families and, when asked for, their registered hosts
#[derive(Debug, Default, Serialize)]
struct MissingReport {
    missing: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hosts: Option<Vec<RootFamily>>,
}

impl HumanDetail for MissingReport {
    fn render_detail(&self) {
        self.missing.render_detail();
        if let Some(hosts) = &self.hosts {
            hosts.render_detail();
        }
    }
}

/// List missing families, optionally with their direct hosts
pub fn missing(
    config: &ReloadConfig,
    report: &ReportArgs,
    hosts: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let source = report.source()?;
    let reloader = Reloader::new(config.clone());

    let mut found = reloader.missing_families(source);
    let mut outcome = Outcome::new();
    let mut detail = MissingReport {
        missing: found.payload.take().unwrap_or_default(),
        hosts: None,
    };
    outcome.absorb(found);

    if hosts && outcome.status {
        let mut hosted = reloader.missing_family_hosts(source, &detail.missing);
        detail.hosts = Some(hosted.payload.take().unwrap_or_default());
        outcome.absorb(hosted);
    }

    let outcome = if outcome.status {
        outcome.with_payload(detail)
    } else {
        outcome
    };
    outcome.render(mode);

    if !outcome.status {
        std::process::exit(1);
    }
    Ok(())
}
