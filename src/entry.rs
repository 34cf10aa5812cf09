//! Entry synthesizer: the one-line module webpack bundles.

use crate::error::Result;
use crate::session::Session;

/// Writes a single-statement module that re-exports the installed package's
/// public surface.
///
/// Precondition: the orchestrator has verified that the installed package
/// path exists.
pub async fn write(session: &Session, qualified_name: &str) -> Result<()> {
    let source = format!("module.exports = require('{qualified_name}');\n");
    tokio::fs::write(&session.entry_module_path, source).await?;
    log::debug!(
        "entry module for {} written to {}",
        qualified_name,
        session.entry_module_path.display()
    );
    Ok(())
}
