//! Project version resolution.
//!
//! Order: `VERSION` (or `READTHEDOCS_VERSION` on ReadTheDocs), then the
//! nearest git tag, then the configured default. `latest` and `stable` are
//! ReadTheDocs slugs, not versions, and fall through to git.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use sdkdocs_shared::ToolCommand;

use crate::layout::{Platform, RunEnv};
use crate::process::run_tool;

/// Environment values that name a channel rather than a version.
pub const SENTINEL_VERSIONS: &[&str] = &["latest", "stable"];

/// Where the resolved version came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    Environment,
    Vcs,
    Default,
}

/// A resolved version and its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    /// Version without the leading `v`.
    pub version: String,
    pub source: VersionSource,
}

/// Trim and drop a leading `v`. `None` for blank input.
pub fn normalize_version(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    (!bare.is_empty()).then(|| bare.to_string())
}

/// Version named by the environment, if it names a real version.
pub fn env_version(env: &RunEnv) -> Option<String> {
    let non_blank = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

    let candidate = non_blank(&env.version).or_else(|| match env.platform() {
        Platform::ReadTheDocs => non_blank(&env.platform_version),
        Platform::Local => None,
    })?;

    if SENTINEL_VERSIONS.contains(&candidate.trim()) {
        return None;
    }
    normalize_version(&candidate)
}

/// Ask version control for the nearest tag. Failures are logged and yield `None`.
pub async fn vcs_version(cmd: &ToolCommand, repo_dir: &Path) -> Option<String> {
    match run_tool(cmd, [] as [&str; 0], Some(repo_dir)).await {
        Ok(out) => match out.stdout_if_ok() {
            Some(tag) => normalize_version(tag),
            None => {
                warn!(command = %cmd.display(), stderr = out.stderr_tail(), "no version tag found");
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "error getting project version from version control");
            None
        }
    }
}

/// Resolve the project version. Never fails.
#[instrument(skip_all, fields(repo_dir = %repo_dir.display()))]
pub async fn resolve_version(
    env: &RunEnv,
    vcs_cmd: &ToolCommand,
    repo_dir: &Path,
    default: &str,
) -> ResolvedVersion {
    let resolved = if let Some(version) = env_version(env) {
        ResolvedVersion {
            version,
            source: VersionSource::Environment,
        }
    } else if let Some(version) = vcs_version(vcs_cmd, repo_dir).await {
        ResolvedVersion {
            version,
            source: VersionSource::Vcs,
        }
    } else {
        warn!(fallback = default, "could not determine project version, using default");
        ResolvedVersion {
            version: normalize_version(default).unwrap_or_else(|| default.to_string()),
            source: VersionSource::Default,
        }
    };

    info!(version = %resolved.version, source = ?resolved.source, "resolved project version");
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(version: Option<&str>, flag: Option<&str>, platform_version: Option<&str>) -> RunEnv {
        RunEnv {
            version: version.map(String::from),
            platform_flag: flag.map(String::from),
            platform_version: platform_version.map(String::from),
        }
    }

    fn failing_vcs() -> ToolCommand {
        ToolCommand {
            program: "sdkdocs-no-such-vcs".into(),
            args: vec![],
            timeout_secs: 5,
        }
    }

    #[test]
    fn strips_leading_v() {
        assert_eq!(normalize_version(" v1.2.3\n"), Some("1.2.3".into()));
        assert_eq!(normalize_version("1.2.3"), Some("1.2.3".into()));
        assert_eq!(normalize_version("v"), None);
        assert_eq!(normalize_version("  "), None);
    }

    #[test]
    fn env_version_prefers_override() {
        let e = env(Some("v2.0.0"), Some("True"), Some("v1.0.0"));
        assert_eq!(env_version(&e), Some("2.0.0".into()));
    }

    #[test]
    fn platform_version_only_on_platform() {
        let hosted = env(None, Some("True"), Some("v1.0.0"));
        assert_eq!(env_version(&hosted), Some("1.0.0".into()));

        let local = env(None, None, Some("v1.0.0"));
        assert_eq!(env_version(&local), None);
    }

    #[test]
    fn sentinels_fall_through() {
        assert_eq!(env_version(&env(Some("latest"), None, None)), None);
        assert_eq!(env_version(&env(None, Some("True"), Some("stable"))), None);
        assert_eq!(env_version(&env(Some("   "), None, None)), None);
    }

    #[tokio::test]
    async fn env_version_wins() {
        let dir = std::env::temp_dir();
        let resolved =
            resolve_version(&env(Some("v1.2.3"), None, None), &failing_vcs(), &dir, "0.3.45").await;
        assert_eq!(resolved.version, "1.2.3");
        assert_eq!(resolved.source, VersionSource::Environment);
    }

    #[tokio::test]
    async fn falls_back_to_default() {
        let dir = std::env::temp_dir();
        let resolved = resolve_version(&RunEnv::default(), &failing_vcs(), &dir, "0.3.45").await;
        assert_eq!(resolved.version, "0.3.45");
        assert_eq!(resolved.source, VersionSource::Default);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn uses_vcs_tag() {
        let dir = std::env::temp_dir();
        let vcs = ToolCommand {
            program: "sh".into(),
            args: vec!["-c".into(), "echo v0.4.0-3-gabc123".into()],
            timeout_secs: 5,
        };
        let resolved = resolve_version(&env(Some("latest"), None, None), &vcs, &dir, "0.3.45").await;
        assert_eq!(resolved.version, "0.4.0-3-gabc123");
        assert_eq!(resolved.source, VersionSource::Vcs);
    }
}
