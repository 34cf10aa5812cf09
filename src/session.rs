//! Disposable session environment for a single pipeline run.
//!
//! Each run owns a uniquely-named working directory under the system temp
//! root. Every derived path (entry module, install target, output filename)
//! hangs off that directory, and teardown removes the whole tree on every
//! exit path.

use crate::error::Result;
use crate::specifier::PackageSpecifier;
use std::io;
use std::path::PathBuf;
use uuid::Uuid;

/// Prefix for every disposable working directory created by libify.
pub const WORK_DIR_PREFIX: &str = "libify-";

/// Runtime target the bundle is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeTarget {
    /// Server-side Node.js runtime
    #[default]
    Node,
    /// Browser runtime
    Web,
    /// Web worker runtime
    Webworker,
}

impl RuntimeTarget {
    /// The webpack `target` string for this runtime.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeTarget::Node => "node",
            RuntimeTarget::Web => "web",
            RuntimeTarget::Webworker => "webworker",
        }
    }
}

/// Disposable environment owned by exactly one pipeline run.
///
/// Created by [`Session::setup`], destroyed by [`Session::teardown`]. The
/// directory is never shared: a fresh UUID suffix per invocation means
/// concurrent runs need no locking.
#[derive(Debug)]
pub struct Session {
    /// Root of the disposable directory
    pub work_dir: PathBuf,
    /// Where the synthesized re-export module is written
    pub entry_module_path: PathBuf,
    /// Where npm is expected to place the installed package
    pub installed_package_path: PathBuf,
    /// Bundle filename derived from the specifier
    pub output_file_name: String,
    /// Runtime the bundle targets
    pub target: RuntimeTarget,
    torn_down: bool,
}

impl Session {
    /// Creates the disposable working directory and derives all session paths.
    pub async fn setup(specifier: &PackageSpecifier, target: RuntimeTarget) -> Result<Self> {
        let work_dir =
            std::env::temp_dir().join(format!("{WORK_DIR_PREFIX}{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&work_dir).await?;

        let entry_module_path = work_dir.join(format!("{}-entry.js", specifier.name));
        let installed_package_path =
            work_dir.join("node_modules").join(specifier.qualified_name());

        log::debug!("session directory created at {}", work_dir.display());

        Ok(Self {
            work_dir,
            entry_module_path,
            installed_package_path,
            output_file_name: specifier.output_file_name(),
            target,
            torn_down: false,
        })
    }

    /// Removes the disposable directory and everything under it.
    ///
    /// Safe to call more than once; only the first call removes anything.
    /// Refuses to delete a path that is not a `libify-` directory under the
    /// system temp root, guarding against path-derivation bugs. Removal
    /// failures are logged and swallowed: cleanup is best-effort and must
    /// never abort the exit path.
    pub async fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if !self.is_disposable_path() {
            log::warn!(
                "refusing to remove {}: not a libify directory under {}",
                self.work_dir.display(),
                std::env::temp_dir().display()
            );
            return;
        }

        match tokio::fs::remove_dir_all(&self.work_dir).await {
            Ok(()) => log::debug!("removed session directory {}", self.work_dir.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "failed to remove session directory {}: {}",
                self.work_dir.display(),
                e
            ),
        }
    }

    fn is_disposable_path(&self) -> bool {
        let under_temp_root = self.work_dir.starts_with(std::env::temp_dir());
        let has_prefix = self
            .work_dir
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(WORK_DIR_PREFIX));
        under_temp_root && has_prefix
    }
}
