//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands;
use nestreload::config::ReloadConfig;
use nestreload::output::OutputMode;
use nestreload::workflows::ReportSource;

/// nestreload - Reload scheduling for nested families
#[derive(Parser, Debug)]
#[command(
    name = "nestreload",
    version,
    about = "Reload scheduling for nested families",
    long_about = "Work out which host families must be reloaded after nested families change.\n\n\
                  Hosts are batched into task files, one per nesting level, so that every\n\
                  family is reloaded after all of the families nested inside it."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ./nestreload.toml, then ~/.nestreload/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where the family tables come from
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Combined family base data report, or a directory holding one
    #[arg(
        short = 'r',
        long = "family-report",
        conflicts_with_all = ["root_table", "nested_table"],
        required_unless_present_all = ["root_table", "nested_table"]
    )]
    pub family_report: Option<PathBuf>,

    /// Root family table (use together with --nested-table)
    #[arg(long, requires = "nested_table")]
    pub root_table: Option<PathBuf>,

    /// Nested family table (use together with --root-table)
    #[arg(long, requires = "root_table")]
    pub nested_table: Option<PathBuf>,
}

impl ReportArgs {
    /// Resolve the arguments into a report source
    pub fn source(&self) -> anyhow::Result<ReportSource<'_>> {
        match (&self.family_report, &self.root_table, &self.nested_table) {
            (Some(report), _, _) => Ok(ReportSource::Combined(report)),
            (None, Some(roots), Some(nested)) => Ok(ReportSource::Tables { roots, nested }),
            _ => anyhow::bail!("Either --family-report or both --root-table and --nested-table are required"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write reload task files for a change list
    Plan {
        /// Change list (name, category, file path per row)
        #[arg(long)]
        changes: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        /// Directory the task files are written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Remove task files of a previous run first
        #[arg(long)]
        clean: bool,
    },

    /// List nested families that are not registered in the library
    Missing {
        #[command(flatten)]
        report: ReportArgs,

        /// Also list registered families directly hosting a missing family
        #[arg(long)]
        hosts: bool,
    },

    /// List nesting chains that contain the same family twice
    Circular {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = ReloadConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Command::Plan {
            changes,
            report,
            output,
            clean,
        }) => commands::plan(&config, &changes, &report, &output, clean, output_mode),
        Some(Command::Missing { report, hosts }) => {
            commands::missing(&config, &report, hosts, output_mode)
        },
        Some(Command::Circular { report }) => commands::circular(&config, &report, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("nestreload v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("nestreload v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'nestreload --help' for usage");
                println!("Run 'nestreload plan --changes <FILE> --family-report <FILE>' to schedule reloads");
            }
            Ok(())
        },
    }
}
