//! Rulebases command implementation.

use crate::cli::RulebasesArgs;
use crate::error::Result;
use crate::output::Formatter;
use duck_compliance::{scan, ComplianceConfig, RuleBaseDescription};
use tracing::info;

/// Execute the rulebases command.
///
/// Reads the metadata headers only; nothing is compiled.
pub fn execute_rulebases(
    args: RulebasesArgs,
    config: &ComplianceConfig,
    formatter: &Formatter,
) -> Result<String> {
    let dir = args.dir.as_deref().unwrap_or(&config.rulebase_dir);
    let mut rulebases: Vec<RuleBaseDescription> =
        scan(dir)?.into_iter().map(|(desc, _)| desc).collect();
    rulebases.sort_by(|a, b| a.id.cmp(&b.id));

    info!(dir = %dir.display(), count = rulebases.len(), "listed rulebases");
    formatter.format_rulebases(&rulebases)
}
