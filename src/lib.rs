//! libify - bundle an npm package into a single self-contained script.
//!
//! The crate orchestrates two external tools: npm installs the requested
//! package into a disposable temp directory, and webpack bundles its public
//! export surface into one UMD artifact. Between the two sits a text-based
//! vulnerability triage that aborts the pipeline when the install output
//! reports advisories. The working directory is removed on every exit path.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod audit;
pub mod cli;
pub mod entry;
pub mod error;
pub mod npm;
pub mod pipeline;
pub mod session;
pub mod specifier;
pub mod webpack;

// Re-export commonly used types
pub use error::{LibifyError, Result, ToolError};
pub use pipeline::{PipelineOutcome, PipelineResult};
pub use session::{RuntimeTarget, Session};
pub use specifier::PackageSpecifier;
pub use webpack::BundleOutcome;
