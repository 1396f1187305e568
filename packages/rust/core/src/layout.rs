//! Where inputs are read from and pages are written to.
//!
//! Locally the Sphinx source lives in `<docs>/source` and build output in
//! `<docs>/output`. On ReadTheDocs the docs directory itself is the source
//! directory, there is no output directory, and the SDK is checked out under
//! `<root>/v<version>`.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Version override variable.
pub const VERSION_ENV: &str = "VERSION";

/// Set to `True` by ReadTheDocs builders.
pub const PLATFORM_ENV: &str = "READTHEDOCS";

/// Version slug ReadTheDocs is building (`latest`, `stable`, `v0.3.45`, ...).
pub const PLATFORM_VERSION_ENV: &str = "READTHEDOCS_VERSION";

/// Sphinx static assets directory name.
pub const STATIC_DIR: &str = "_static";

/// Sphinx templates directory name.
pub const TEMPLATES_DIR: &str = "_templates";

/// Build environment the generator runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Local,
    ReadTheDocs,
}

/// Environment variables read once at startup.
#[derive(Debug, Clone, Default)]
pub struct RunEnv {
    /// `VERSION`.
    pub version: Option<String>,
    /// `READTHEDOCS`.
    pub platform_flag: Option<String>,
    /// `READTHEDOCS_VERSION`.
    pub platform_version: Option<String>,
}

impl RunEnv {
    /// Snapshot the process environment.
    pub fn from_process() -> Self {
        Self {
            version: std::env::var(VERSION_ENV).ok(),
            platform_flag: std::env::var(PLATFORM_ENV).ok(),
            platform_version: std::env::var(PLATFORM_VERSION_ENV).ok(),
        }
    }

    pub fn platform(&self) -> Platform {
        match self.platform_flag.as_deref() {
            Some("True") => Platform::ReadTheDocs,
            _ => Platform::Local,
        }
    }
}

/// Resolved directories for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocLayout {
    /// SDK checkout (README, module directories, examples).
    pub project_root: PathBuf,
    /// Docs directory; holds `requirements.txt`.
    pub docs_dir: PathBuf,
    /// Sphinx source directory; every page goes here.
    pub source_dir: PathBuf,
    /// Directory wiped at the start of a local run.
    pub output_dir: Option<PathBuf>,
}

impl DocLayout {
    /// Layout for a local build.
    pub fn local(project_root: impl Into<PathBuf>, docs_dir: impl Into<PathBuf>) -> Self {
        let docs_dir = docs_dir.into();
        Self {
            project_root: project_root.into(),
            source_dir: docs_dir.join("source"),
            output_dir: Some(docs_dir.join("output")),
            docs_dir,
        }
    }

    /// Layout for a ReadTheDocs build of `version`.
    pub fn hosted(root: &Path, docs_dir: impl Into<PathBuf>, version: &str) -> Self {
        let docs_dir = docs_dir.into();
        Self {
            project_root: root.join(format!("v{version}")),
            source_dir: docs_dir.clone(),
            output_dir: None,
            docs_dir,
        }
    }

    /// Pick the layout for `platform`.
    pub fn for_platform(
        platform: Platform,
        root: &Path,
        docs_dir: impl Into<PathBuf>,
        version: &str,
    ) -> Self {
        match platform {
            Platform::Local => Self::local(root, docs_dir),
            Platform::ReadTheDocs => Self::hosted(root, docs_dir, version),
        }
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.source_dir.join("modules")
    }

    pub fn example_pages_dir(&self) -> PathBuf {
        self.source_dir.join("examples")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_flag_must_be_exact() {
        let mut env = RunEnv::default();
        assert_eq!(env.platform(), Platform::Local);

        env.platform_flag = Some("true".into());
        assert_eq!(env.platform(), Platform::Local);

        env.platform_flag = Some("True".into());
        assert_eq!(env.platform(), Platform::ReadTheDocs);
    }

    #[test]
    fn local_layout() {
        let layout = DocLayout::local("/sdk", "/sdk/docs");
        assert_eq!(layout.source_dir, PathBuf::from("/sdk/docs/source"));
        assert_eq!(layout.output_dir, Some(PathBuf::from("/sdk/docs/output")));
        assert_eq!(layout.modules_dir(), PathBuf::from("/sdk/docs/source/modules"));
    }

    #[test]
    fn hosted_layout() {
        let layout =
            DocLayout::for_platform(Platform::ReadTheDocs, Path::new("/build"), "/build/docs", "0.3.45");
        assert_eq!(layout.project_root, PathBuf::from("/build/v0.3.45"));
        assert_eq!(layout.source_dir, PathBuf::from("/build/docs"));
        assert!(layout.output_dir.is_none());
    }
}
