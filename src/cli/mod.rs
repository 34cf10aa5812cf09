//! Command line interface for libify.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::error::{Result, ToolError};
use crate::pipeline::{self, PipelineOutcome};
use crate::specifier::PackageSpecifier;
use clap::CommandFactory;

/// Exit code when the run was cut short by an interrupt.
const EXIT_INTERRUPTED: i32 = 130;

/// Main CLI entry point. Returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    // No package argument is the help path, not an error: print usage and
    // exit without side effects.
    let Some(package) = args.package.as_deref() else {
        print_usage()?;
        return Ok(0);
    };

    let specifier = PackageSpecifier::parse(package);
    if specifier.name.is_empty() {
        print_usage()?;
        return Ok(0);
    }

    let output = OutputManager::new(args.debug);
    output.debug_detail(&format!(
        "Running libify version {} in debug mode",
        env!("CARGO_PKG_VERSION")
    ));

    preflight()?;

    match pipeline::run(&specifier, args.target(), &output).await? {
        PipelineOutcome::Completed(result) => Ok(result.exit_code()),
        PipelineOutcome::Interrupted => Ok(EXIT_INTERRUPTED),
    }
}

fn print_usage() -> Result<()> {
    let mut command = Args::command();
    command.print_help()?;
    Ok(())
}

/// Both tools ship with Node.js; catching their absence up front gives one
/// actionable message instead of a mid-pipeline failure.
fn preflight() -> Result<()> {
    for tool in ["npm", "npx"] {
        which::which(tool).map_err(|source| ToolError::Missing {
            tool: tool.to_string(),
            source,
        })?;
    }
    Ok(())
}
