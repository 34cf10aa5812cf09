//! End-to-end pipeline tests against stub npm/npx executables.
//!
//! Each test builds a private bin directory with `npm` and `npx` shell stubs,
//! prepends it to PATH, and runs the binary in a scratch working directory.
//! The stubs emulate the textual contract of the real tools: npm prints an
//! advisory summary and populates `node_modules`, npx webpack writes `--json`
//! stats and the output bundle.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

fn write_stub(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
}

fn libify(stub_dir: &Path, work_dir: &Path) -> Command {
    let path = format!(
        "{}:{}",
        stub_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );
    let mut cmd = Command::cargo_bin("libify").unwrap();
    cmd.env("PATH", path).env("NO_COLOR", "1").current_dir(work_dir);
    cmd
}

/// npx stub that reads the output filename and path back out of the webpack
/// config, writes clean stats, and fakes the bundle artifact.
const NPX_BUNDLES: &str = r#"cfg="$3"; stats="$5"
name=$(sed -n "s/.*filename: '\([^']*\)'.*/\1/p" "$cfg")
dir=$(sed -n "s/.*path: '\([^']*\)'.*/\1/p" "$cfg")
echo '{"errors":[]}' > "$stats"
echo 'bundle' > "$dir/$name""#;

#[test]
fn clean_install_bundles_into_the_working_directory() {
    let stubs = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();

    write_stub(
        stubs.path(),
        "npm",
        "mkdir -p node_modules/left-pad\n\
         echo 'added 1 package, and audited 1 package in 1s'\n\
         echo 'found 0 vulnerabilities'",
    );
    write_stub(stubs.path(), "npx", NPX_BUNDLES);

    libify(stubs.path(), cwd.path())
        .arg("left-pad")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully bundled left-pad"));

    assert!(cwd.path().join("left-pad.js").is_file());
}

#[test]
fn vulnerabilities_abort_before_bundling() {
    let stubs = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();

    write_stub(
        stubs.path(),
        "npm",
        "mkdir -p node_modules/vulnerable-pkg\n\
         echo 'added 4 packages in 2s'\n\
         echo 'found 3 vulnerabilities (1 moderate, 2 high)'",
    );
    write_stub(stubs.path(), "npx", "exit 0");

    libify(stubs.path(), cwd.path())
        .arg("vulnerable-pkg@1.0.0")
        .assert()
        .code(2)
        .stdout(
            predicate::str::contains("Found 3 vulnerabilities")
                // The remediation link carries the full specifier, version pin
                // included.
                .and(predicate::str::contains(
                    "https://snyk.io/vuln/search?q=vulnerable-pkg@1.0.0&type=npm",
                )),
        );

    assert!(!cwd.path().join("vulnerable-pkg-1.0.0.js").exists());
}

#[test]
fn missing_install_path_reports_not_found() {
    let stubs = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();

    // npm "succeeds" but never creates the package directory.
    write_stub(stubs.path(), "npm", "echo 'found 0 vulnerabilities'");
    write_stub(stubs.path(), "npx", "exit 0");

    libify(stubs.path(), cwd.path())
        .arg("definitely-not-a-real-package-xyz")
        .assert()
        .code(3)
        .stdout(predicate::str::contains(
            "Failed to find package definitely-not-a-real-package-xyz on npm",
        ));
}

#[test]
fn npm_client_error_reports_not_found() {
    let stubs = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();

    write_stub(
        stubs.path(),
        "npm",
        "echo 'npm ERR! code E404' >&2\nexit 1",
    );
    write_stub(stubs.path(), "npx", "exit 0");

    libify(stubs.path(), cwd.path())
        .arg("no-such-pkg")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Failed to find package"));
}

#[test]
fn build_errors_are_surfaced_verbatim() {
    let stubs = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();

    write_stub(
        stubs.path(),
        "npm",
        "mkdir -p node_modules/broken-pkg\necho 'found 0 vulnerabilities'",
    );
    write_stub(
        stubs.path(),
        "npx",
        r#"echo '{"errors":[{"message":"Module not found: ./missing"},{"message":"Unexpected token"}]}' > "$5"
exit 1"#,
    );

    libify(stubs.path(), cwd.path())
        .arg("broken-pkg")
        .assert()
        .code(4)
        .stdout(
            predicate::str::contains("errors occurred when attempting to build broken-pkg")
                .and(predicate::str::contains("Module not found: ./missing"))
                .and(predicate::str::contains("Unexpected token")),
        );

    assert!(!cwd.path().join("broken-pkg.js").exists());
}

#[test]
fn scoped_versioned_specifier_names_the_bundle() {
    let stubs = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();

    write_stub(
        stubs.path(),
        "npm",
        "mkdir -p 'node_modules/@foo/bar'\necho 'found 0 vulnerabilities'",
    );
    write_stub(stubs.path(), "npx", NPX_BUNDLES);

    libify(stubs.path(), cwd.path())
        .arg("@foo/bar@1.2.3")
        .assert()
        .success();

    assert!(cwd.path().join("foo-bar-1.2.3.js").is_file());
}

#[test]
fn no_arguments_prints_usage_without_side_effects() {
    let stubs = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();

    // No stubs on PATH needed: the pipeline must not start at all.
    libify(stubs.path(), cwd.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));

    assert_eq!(fs::read_dir(cwd.path()).unwrap().count(), 0);
}

#[test]
fn debug_flag_prints_stage_detail() {
    let stubs = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();

    write_stub(
        stubs.path(),
        "npm",
        "mkdir -p node_modules/left-pad\necho 'found 0 vulnerabilities'",
    );
    write_stub(stubs.path(), "npx", NPX_BUNDLES);

    libify(stubs.path(), cwd.path())
        .arg("--debug")
        .arg("left-pad")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("in debug mode")
                .and(predicate::str::contains("temporarily installed to"))
                .and(predicate::str::contains("Removing temporary directory")),
        );
}
