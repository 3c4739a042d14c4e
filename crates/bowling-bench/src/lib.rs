pub mod audit;
pub mod config;
pub mod logging;

use std::path::Path;

use anyhow::Context;

use crate::audit::{AuditRunner, AuditSummary};
use crate::config::AuditConfig;
use crate::logging::init_logging;

/// Load `path`, enable logging if configured, and run the audit it describes.
pub fn run_audit(path: impl AsRef<Path>) -> anyhow::Result<AuditSummary> {
    let path = path.as_ref();
    let config = AuditConfig::from_path(path)
        .with_context(|| format!("loading audit configuration {}", path.display()))?;
    let outputs = config.resolved_outputs();
    let run_id = config.run_id.clone();

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let summary = AuditRunner::new(config, outputs)
        .run()
        .with_context(|| format!("running audit '{run_id}'"))?;
    Ok(summary)
}
