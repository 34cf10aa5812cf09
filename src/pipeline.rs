//! Pipeline orchestrator: install, triage, synthesize, bundle, clean up.
//!
//! One sequential state machine per invocation. The install and bundle calls
//! are the only suspension points; both run under an interrupt guard so
//! Ctrl-C still reaches cleanup. Every terminal branch produces exactly one
//! [`PipelineResult`] and exactly one teardown.

use crate::audit;
use crate::cli::OutputManager;
use crate::entry;
use crate::error::Result;
use crate::npm;
use crate::session::{RuntimeTarget, Session};
use crate::specifier::PackageSpecifier;
use crate::webpack::{self, BundleOutcome};
use std::path::PathBuf;

/// Terminal result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    /// Bundle written to the caller's working directory
    Success {
        /// Where the bundle was saved
        output_path: PathBuf,
    },
    /// Advisories found in the package or its dependencies; bundling skipped
    VulnerabilityAbort {
        /// Advisory count reported by npm
        count: u64,
    },
    /// Install completed but the package never appeared in `node_modules`
    NotFound {
        /// The specifier as requested
        specifier: String,
    },
    /// webpack reported errors
    BuildFailure {
        /// Error message texts, verbatim
        messages: Vec<String>,
    },
}

impl PipelineResult {
    /// Process exit code for this result. Success is 0; each failure branch
    /// gets a distinct code (1 is reserved for errors outside the pipeline).
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineResult::Success { .. } => 0,
            PipelineResult::VulnerabilityAbort { .. } => 2,
            PipelineResult::NotFound { .. } => 3,
            PipelineResult::BuildFailure { .. } => 4,
        }
    }
}

/// How a pipeline invocation ended: normally, or cut short by an interrupt.
/// Cleanup has run in either case.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The state machine reached a terminal branch
    Completed(PipelineResult),
    /// Ctrl-C arrived during install or bundling
    Interrupted,
}

/// Runs the full pipeline for one specifier.
///
/// Errors can only come from session setup; once a session exists, every
/// stage failure is converted to a [`PipelineResult`] variant and teardown is
/// unconditional.
pub async fn run(
    specifier: &PackageSpecifier,
    target: RuntimeTarget,
    output: &OutputManager,
) -> Result<PipelineOutcome> {
    let mut session = Session::setup(specifier, target).await?;
    output.debug_detail(&format!(
        "Package will be temporarily installed to {}",
        session.installed_package_path.display()
    ));

    let outcome = tokio::select! {
        result = run_stages(specifier, &session, output) => PipelineOutcome::Completed(result),
        _ = tokio::signal::ctrl_c() => {
            output.failure(&format!("Interrupted while processing {specifier}"));
            PipelineOutcome::Interrupted
        }
    };

    cleanup(&mut session, output).await;
    Ok(outcome)
}

/// Installing → Triage → (Aborted | Synthesizing) → Bundling → terminal.
async fn run_stages(
    specifier: &PackageSpecifier,
    session: &Session,
    output: &OutputManager,
) -> PipelineResult {
    // Installing
    let spinner = output.spinner(&format!(
        "Searching for and downloading package {specifier}..."
    ));
    let raw = npm::install(specifier, session).await;
    spinner.finish_and_clear();
    output.debug_detail(raw.trim());

    // Triage
    let report = audit::scan(&raw);
    if !report.clean {
        output.failure(&format!(
            "Found {} vulnerabilities in the package {specifier} and its dependencies",
            report.count
        ));
        output.detail(&format!(
            "Please visit https://snyk.io/vuln/search?q={specifier}&type=npm for more information"
        ));
        return PipelineResult::VulnerabilityAbort { count: report.count };
    }

    if !session.installed_package_path.exists() {
        output.failure(&format!("Failed to find package {specifier} on npm"));
        return PipelineResult::NotFound {
            specifier: specifier.to_string(),
        };
    }

    output.success(&format!(
        "Successfully found and downloaded the package {specifier}"
    ));

    // Synthesizing
    let spinner = output.spinner(&format!("Bundling the library for package {specifier}..."));
    output.debug_detail(&format!(
        "Creating temporary module entry at {}",
        session.entry_module_path.display()
    ));
    if let Err(e) = entry::write(session, &specifier.qualified_name()).await {
        spinner.finish_and_clear();
        let message = format!("cannot write module entry: {e}");
        report_build_errors(specifier, std::slice::from_ref(&message), output);
        return PipelineResult::BuildFailure {
            messages: vec![message],
        };
    }

    // Bundling
    output.debug_detail(&format!(
        "Beginning webpack of {} with target {}",
        session.entry_module_path.display(),
        session.target.as_str()
    ));
    let outcome = webpack::bundle(session).await;
    spinner.finish_and_clear();

    match outcome {
        BundleOutcome::Success => {
            let output_path = std::env::current_dir()
                .map(|dir| dir.join(&session.output_file_name))
                .unwrap_or_else(|_| PathBuf::from(&session.output_file_name));
            output.success(&format!("Successfully bundled {specifier}"));
            output.detail(&format!("Saved library bundle to {}", output_path.display()));
            PipelineResult::Success { output_path }
        }
        BundleOutcome::Failure { messages } => {
            report_build_errors(specifier, &messages, output);
            PipelineResult::BuildFailure { messages }
        }
    }
}

fn report_build_errors(specifier: &PackageSpecifier, messages: &[String], output: &OutputManager) {
    output.failure(&format!(
        "The following errors occurred when attempting to build {specifier}"
    ));
    for message in messages {
        output.detail(message);
    }
}

async fn cleanup(session: &mut Session, output: &OutputManager) {
    let spinner = output.spinner("Cleaning up temporary npm resources...");
    output.debug_detail(&format!(
        "Removing temporary directory {}",
        session.work_dir.display()
    ));
    session.teardown().await;
    spinner.finish_and_clear();
}
