//! Install adapter: drives `npm install` inside the session directory.
//!
//! npm is a black box here. The adapter returns its combined stdout/stderr
//! text and never fails: launch errors are folded into the returned text with
//! the standard `npm ERR!` marker so downstream triage and the install-path
//! existence check handle them like any other client failure.

use crate::session::Session;
use crate::specifier::PackageSpecifier;
use std::process::Stdio;
use tokio::process::Command;

/// Installs the package into the session directory, returning combined output.
///
/// `--no-save` keeps the install out of any shared manifest; the session
/// directory is the working root so nothing outside it is touched. A
/// "package not found" condition is not an error at this layer; it is
/// detected downstream by checking the installed-package path.
pub async fn install(specifier: &PackageSpecifier, session: &Session) -> String {
    let install_arg = specifier.install_arg();
    log::debug!("npm install {} in {}", install_arg, session.work_dir.display());

    let result = Command::new("npm")
        .arg("install")
        .arg(&install_arg)
        .arg("--no-save")
        .arg("--no-fund")
        .current_dir(&session.work_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await;

    match result {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            format!("{stdout}\n{stderr}")
        }
        Err(e) => format!("npm ERR! failed to launch npm: {e}"),
    }
}
