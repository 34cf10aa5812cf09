//! Command line argument parsing.
//!
//! Flags are matched exactly via clap. The runtime target flags are mutually
//! exclusive; omitting all of them selects the Node.js target.

use crate::session::RuntimeTarget;
use clap::Parser;

/// Bundle an npm package into a single self-contained UMD script
#[derive(Parser, Debug)]
#[command(
    name = "libify",
    version,
    about = "Bundle up your npm package dependencies into single file libraries",
    long_about = "Installs an npm package into a disposable temp directory, scans the install \
output for security advisories, and if clean, bundles the package's public exports with \
webpack into one UMD script in the current directory.

Usage:
  libify lodash
  libify left-pad@1.3.0
  libify --web @foo/bar@1.2.3

Exit codes: 0 success, 2 vulnerabilities found, 3 package not found, 4 build failure."
)]
pub struct Args {
    /// Package specifier: [@scope/]name[@version]
    #[arg(value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Bundle for the Node.js runtime (default)
    #[arg(long, group = "target")]
    pub node: bool,

    /// Bundle for browsers
    #[arg(long, group = "target")]
    pub web: bool,

    /// Bundle for web workers
    #[arg(long, group = "target")]
    pub webworker: bool,

    /// Print per-stage progress and diagnostic detail
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The runtime target selected by the flags.
    pub fn target(&self) -> RuntimeTarget {
        if self.web {
            RuntimeTarget::Web
        } else if self.webworker {
            RuntimeTarget::Webworker
        } else {
            RuntimeTarget::Node
        }
    }
}
