//! Bundle adapter: drives webpack against the synthesized entry module.
//!
//! webpack is invoked through `npx` with a config file written into the
//! session directory and `--json` stats written next to it. The adapter
//! never returns a Rust error: every failure mode (launch, exit status,
//! structured compile errors) is flattened into a [`BundleOutcome::Failure`]
//! carrying the message texts for the user.

use crate::session::Session;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Result of a bundling attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutcome {
    /// The bundle was written to the caller's working directory
    Success,
    /// webpack reported an invocation error and/or structured compile errors
    Failure {
        /// Flattened error message texts, surfaced verbatim
        messages: Vec<String>,
    },
}

/// Stats output as emitted by `webpack --json`, reduced to what triage needs.
#[derive(Debug, Deserialize)]
struct WebpackStats {
    #[serde(default)]
    errors: Vec<StatsMessage>,
}

/// webpack error entries are objects with a `message` field in current
/// versions and plain strings in older ones; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatsMessage {
    Object { message: String },
    Text(String),
}

impl StatsMessage {
    fn into_text(self) -> String {
        match self {
            StatsMessage::Object { message } => message,
            StatsMessage::Text(text) => text,
        }
    }
}

/// Bundles the session's entry module into the caller's working directory.
pub async fn bundle(session: &Session) -> BundleOutcome {
    let output_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return BundleOutcome::Failure {
                messages: vec![format!("cannot determine output directory: {e}")],
            }
        }
    };

    let config_path = session.work_dir.join("webpack.config.js");
    let config = render_config(session, &output_dir);
    if let Err(e) = tokio::fs::write(&config_path, config).await {
        return BundleOutcome::Failure {
            messages: vec![format!(
                "cannot write webpack config {}: {e}",
                config_path.display()
            )],
        };
    }

    let stats_path = session.work_dir.join("webpack.stats.json");
    log::debug!(
        "npx webpack --config {} targeting {}",
        config_path.display(),
        session.target.as_str()
    );

    let result = Command::new("npx")
        .arg("webpack")
        .arg("--config")
        .arg(&config_path)
        .arg("--json")
        .arg(&stats_path)
        .current_dir(&session.work_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await;

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            return BundleOutcome::Failure {
                messages: vec![format!("failed to launch npx webpack: {e}")],
            }
        }
    };

    let mut messages = Vec::new();

    match tokio::fs::read_to_string(&stats_path).await {
        Ok(raw) => match parse_stats(&raw) {
            Ok(stats) => {
                messages.extend(stats.errors.into_iter().map(StatsMessage::into_text));
            }
            Err(e) => log::debug!("unparseable webpack stats: {e}"),
        },
        Err(e) => log::debug!("no webpack stats at {}: {e}", stats_path.display()),
    }

    // A hard invocation failure with no structured errors still has to
    // surface something readable.
    if !output.status.success() && messages.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            messages.push(format!("webpack exited with status {}", output.status));
        } else {
            messages.push(stderr.to_string());
        }
    }

    if messages.is_empty() {
        BundleOutcome::Success
    } else {
        BundleOutcome::Failure { messages }
    }
}

fn parse_stats(raw: &str) -> serde_json::Result<WebpackStats> {
    serde_json::from_str(raw)
}

/// Renders the webpack configuration: optimized UMD build of the single
/// entry module, written into the caller's working directory. `globalObject`
/// is bound to `this` so the bundle loads on non-browser targets.
fn render_config(session: &Session, output_dir: &Path) -> String {
    format!(
        "module.exports = {{\n\
        \x20 mode: 'production',\n\
        \x20 target: '{target}',\n\
        \x20 entry: ['{entry}'],\n\
        \x20 output: {{\n\
        \x20   filename: '{filename}',\n\
        \x20   path: '{path}',\n\
        \x20   libraryTarget: 'umd',\n\
        \x20   globalObject: 'this',\n\
        \x20 }},\n\
        }};\n",
        target = session.target.as_str(),
        entry = js_string(&session.entry_module_path.to_string_lossy()),
        filename = js_string(&session.output_file_name),
        path = js_string(&output_dir.to_string_lossy()),
    )
}

/// Escapes a value for embedding in a single-quoted JS string literal.
fn js_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
