//! Output formatting for human and JSON modes
//!
//! This module renders outcomes either as human-readable text or as
//! machine-parseable JSON.

use serde::Serialize;

use crate::core::models::{CircularReference, Identity, Outcome, RootFamily};
use crate::workflows::ReloadSummary;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Payloads that know how to print themselves for humans
pub trait HumanDetail {
    /// Print the payload below the message log
    fn render_detail(&self);
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl<T: Serialize + HumanDetail> Outcome<T> {
    /// Render the outcome based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        for message in &self.messages {
            println!("{message}");
        }
        if let Some(payload) = &self.payload {
            payload.render_detail();
        }
        if self.status {
            println!("\nStatus: ok");
        } else {
            println!("\nStatus: FAILED");
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl HumanDetail for ReloadSummary {
    fn render_detail(&self) {
        if self.plan.is_empty() {
            return;
        }
        println!("\nReload passes:");
        for pass in &self.plan.passes {
            if pass.is_empty() {
                println!("  [{}] (empty)", pass.index);
                continue;
            }
            println!("  [{}] {} famil(ies)", pass.index, pass.families.len());
            for family in &pass.families {
                println!("        {}", family.file_path);
            }
        }
    }
}

impl HumanDetail for Vec<Identity> {
    fn render_detail(&self) {
        if self.is_empty() {
            println!("\nNo missing families.");
            return;
        }
        println!("\nMissing families:");
        for identity in self {
            println!("  {identity}");
        }
    }
}

impl HumanDetail for Vec<RootFamily> {
    fn render_detail(&self) {
        if self.is_empty() {
            println!("\nNo host families.");
            return;
        }
        println!("\nHost families:");
        for family in self {
            println!("  {} [{}]", family.name, family.category);
            println!("        {}", family.file_path);
        }
    }
}

impl HumanDetail for Vec<CircularReference> {
    fn render_detail(&self) {
        if self.is_empty() {
            println!("\nNo circular references.");
            return;
        }
        println!("\nCircular references:");
        for circular in self {
            println!("  {circular}");
        }
    }
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
