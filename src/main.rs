//! libify - bundle an npm package into a single self-contained UMD script.
//!
//! Installs the package into a disposable temp directory, scans the install
//! output for security advisories, and bundles the result with webpack.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match libify::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };

    process::exit(exit_code);
}
