//! Generator configuration for sdkdocs.
//!
//! The config lives next to the docs as `sdkdocs.toml`. Every field has a
//! default, so a missing file or a partial file is valid.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocGenError, Result};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "sdkdocs.toml";

// ---------------------------------------------------------------------------
// Config structs (matching sdkdocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level generator config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Project metadata used in titles and `conf.py`.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Input locations, relative to the SDK checkout.
    #[serde(default)]
    pub paths: PathsConfig,

    /// SDK modules documented with `go doc`, in index order.
    #[serde(default = "default_modules")]
    pub modules: Vec<ModuleEntry>,

    /// README section name to output file name.
    #[serde(default = "default_sections")]
    pub sections: BTreeMap<String, String>,

    /// `index.rst` layout.
    #[serde(default)]
    pub index: IndexConfig,

    /// External commands and their timeouts.
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Sphinx dependency manifest.
    #[serde(default)]
    pub sphinx: SphinxConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            paths: PathsConfig::default(),
            modules: default_modules(),
            sections: default_sections(),
            index: IndexConfig::default(),
            toolchain: ToolchainConfig::default(),
            sphinx: SphinxConfig::default(),
        }
    }
}

/// `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name as Sphinx knows it.
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Heading of `index.rst`.
    #[serde(default = "default_title")]
    pub title: String,

    /// Author / copyright holder.
    #[serde(default = "default_author")]
    pub author: String,

    /// One-paragraph description shown on the index page.
    #[serde(default = "default_description")]
    pub description: String,

    /// Version used when neither the environment nor git yield one.
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Directory name of the SDK checkout, used in the structure page.
    #[serde(default = "default_repo_dir")]
    pub repo_dir: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            title: default_title(),
            author: default_author(),
            description: default_description(),
            default_version: default_version(),
            repo_dir: default_repo_dir(),
        }
    }
}

fn default_project_name() -> String {
    "MGC SDK Go".into()
}
fn default_title() -> String {
    "MGC Go SDK".into()
}
fn default_author() -> String {
    "Magalu Cloud".into()
}
fn default_description() -> String {
    "The MGC Go SDK provides a convenient way to interact with the Magalu Cloud API from Go applications.".into()
}
fn default_version() -> String {
    "0.3.45".into()
}
fn default_repo_dir() -> String {
    "mgc-sdk-go".into()
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// README file, relative to the SDK root.
    #[serde(default = "default_readme")]
    pub readme: String,

    /// Directory holding one subdirectory per example program.
    #[serde(default = "default_examples_dir")]
    pub examples_dir: String,

    /// Entry file an example directory must contain to be documented.
    #[serde(default = "default_example_entry")]
    pub example_entry: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            readme: default_readme(),
            examples_dir: default_examples_dir(),
            example_entry: default_example_entry(),
        }
    }
}

fn default_readme() -> String {
    "README.md".into()
}
fn default_examples_dir() -> String {
    "cmd/examples".into()
}
fn default_example_entry() -> String {
    "main.go".into()
}

/// `[[modules]]` entry — one SDK package documented on its own page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Directory (and package) name under the SDK root.
    pub name: String,
    /// One-line description for the project structure tree.
    #[serde(default)]
    pub description: String,
    /// Paragraph for the module descriptions list. Falls back to `description`.
    #[serde(default)]
    pub details: String,
}

impl ModuleEntry {
    fn new(name: &str, description: &str, details: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            details: details.into(),
        }
    }

    /// Paragraph shown under the module's heading.
    pub fn details_or_description(&self) -> &str {
        if self.details.trim().is_empty() {
            &self.description
        } else {
            &self.details
        }
    }
}

fn default_modules() -> Vec<ModuleEntry> {
    vec![
        ModuleEntry::new(
            "client",
            "Base client implementation and configuration",
            "Contains the base HTTP client implementation and configurations for communicating with the Magalu Cloud API.",
        ),
        ModuleEntry::new(
            "compute",
            "Computing service API (instances, images, machine types)",
            "Provides functionality to manage virtual instances, machine types, images, and snapshots.",
        ),
        ModuleEntry::new(
            "blockstorage",
            "Block storage service API",
            "Allows managing block storage volumes, snapshots, and volume types.",
        ),
        ModuleEntry::new(
            "network",
            "Network service API",
            "Provides functionality to manage VPCs, subnets, security groups, and other network resources.",
        ),
        ModuleEntry::new(
            "kubernetes",
            "Kubernetes service API",
            "Allows managing Kubernetes clusters, nodepools, and related configurations.",
        ),
        ModuleEntry::new(
            "dbaas",
            "Database as a Service API",
            "Provides functionality to manage database instances, clusters, and configurations.",
        ),
        ModuleEntry::new(
            "containerregistry",
            "Container Registry service API",
            "Allows managing container registries, repositories, and images.",
        ),
        ModuleEntry::new(
            "sshkeys",
            "SSH Keys service API",
            "Provides functionality to manage SSH keys.",
        ),
        ModuleEntry::new(
            "availabilityzones",
            "Availability Zones service API",
            "Allows querying available availability zones.",
        ),
        ModuleEntry::new(
            "audit",
            "Audit service API",
            "Provides functionality to access audit logs and events.",
        ),
        ModuleEntry::new(
            "lbaas",
            "Load Balancer as a Service API",
            "Allows managing load balancers and related configurations.",
        ),
        ModuleEntry::new(
            "helpers",
            "Utility functions",
            "Contains reusable utility functions throughout the SDK.",
        ),
    ]
}

fn default_sections() -> BTreeMap<String, String> {
    [
        ("introduction", "introduction.md"),
        ("installation", "installation.md"),
        ("authentication", "authentication.md"),
        ("regions", "regions.md"),
        ("global-services", "regions.md"),
        ("project-structure", "project-structure.md"),
        ("usage", "usage.md"),
        ("usage-examples", "usage.md"),
        ("error-handling", "error-handling.md"),
        ("contributing", "contributing.md"),
    ]
    .into_iter()
    .map(|(section, file)| (section.to_string(), file.to_string()))
    .collect()
}

/// `[index]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Pages listed in the "Content" toctree, without extension.
    #[serde(default = "default_content_pages")]
    pub content_pages: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            content_pages: default_content_pages(),
        }
    }
}

fn default_content_pages() -> Vec<String> {
    [
        "introduction",
        "installation",
        "authentication",
        "regions",
        "usage",
        "error-handling",
        "contributing",
        "project-structure",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// An external command line plus the deadline it runs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    /// Executable name or path.
    pub program: String,
    /// Fixed leading arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Seconds before the child is killed.
    pub timeout_secs: u64,
}

impl ToolCommand {
    fn new(program: &str, args: &[&str], timeout_secs: u64) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            timeout_secs,
        }
    }

    /// Render the command line for log messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Tag query used by the version resolver.
    #[serde(default = "default_vcs_tag")]
    pub vcs_tag: ToolCommand,

    /// Package documentation command; the module name is appended.
    #[serde(default = "default_doc")]
    pub doc: ToolCommand,

    /// Toolchain availability probe.
    #[serde(default = "default_toolchain_version")]
    pub version: ToolCommand,

    /// Dependency installer; the requirements file path is appended.
    #[serde(default = "default_install")]
    pub install: ToolCommand,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            vcs_tag: default_vcs_tag(),
            doc: default_doc(),
            version: default_toolchain_version(),
            install: default_install(),
        }
    }
}

fn default_vcs_tag() -> ToolCommand {
    ToolCommand::new("git", &["describe", "--tags"], 10)
}
fn default_doc() -> ToolCommand {
    ToolCommand::new("go", &["doc", "-all"], 30)
}
fn default_toolchain_version() -> ToolCommand {
    ToolCommand::new("go", &["version"], 10)
}
fn default_install() -> ToolCommand {
    ToolCommand::new("python3", &["-m", "pip", "install", "-r"], 300)
}

/// `[sphinx]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphinxConfig {
    /// Lines of the generated `requirements.txt`.
    #[serde(default = "default_requirements")]
    pub requirements: Vec<String>,
}

impl Default for SphinxConfig {
    fn default() -> Self {
        Self {
            requirements: default_requirements(),
        }
    }
}

fn default_requirements() -> Vec<String> {
    [
        "sphinx>=7.0.0",
        "sphinx-rtd-theme>=1.3.0",
        "myst-parser>=2.0.0",
        "sphinx-copybutton>=0.5.0",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl AppConfig {
    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let commands = [
            ("vcs_tag", &self.toolchain.vcs_tag),
            ("doc", &self.toolchain.doc),
            ("version", &self.toolchain.version),
            ("install", &self.toolchain.install),
        ];
        for (name, cmd) in commands {
            if cmd.program.trim().is_empty() {
                return Err(DocGenError::validation(format!(
                    "toolchain.{name}: program must not be empty"
                )));
            }
            if cmd.timeout_secs == 0 {
                return Err(DocGenError::validation(format!(
                    "toolchain.{name}: timeout_secs must be positive"
                )));
            }
        }

        if self.paths.example_entry.trim().is_empty() {
            return Err(DocGenError::validation("paths.example_entry must not be empty"));
        }

        if let Some(module) = self.modules.iter().find(|m| m.name.trim().is_empty()) {
            return Err(DocGenError::validation(format!(
                "module with empty name (description: {:?})",
                module.description
            )));
        }

        Ok(())
    }

    /// Module names in configuration order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the config.
///
/// An explicit path must exist. Without one, `sdkdocs.toml` in the working
/// directory is used when present, defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let path = PathBuf::from(CONFIG_FILE_NAME);
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load and validate the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocGenError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        DocGenError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;

    tracing::debug!(?path, modules = config.modules.len(), "config loaded");
    Ok(config)
}

/// Write a default config file at `path`. Refuses to overwrite.
pub fn init_config(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Err(DocGenError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DocGenError::io(parent, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| DocGenError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| DocGenError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "sdkdocs-config-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("default_version"));
        assert!(toml_str.contains("global-services"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.modules.len(), 12);
        assert_eq!(parsed.toolchain.doc.timeout_secs, 30);
        assert_eq!(parsed.sections["usage-examples"], "usage.md");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
[project]
name = "Acme SDK"

[[modules]]
name = "client"
description = "HTTP client"

[toolchain.doc]
program = "go"
args = ["doc"]
timeout_secs = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.project.name, "Acme SDK");
        assert_eq!(config.project.default_version, "0.3.45");
        assert_eq!(config.modules.len(), 1);
        assert_eq!(config.toolchain.doc.display(), "go doc");
        assert_eq!(config.toolchain.vcs_tag.display(), "git describe --tags");
        assert_eq!(config.paths.example_entry, "main.go");
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.toolchain.install.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DocGenError::Validation { .. }));
        assert!(err.to_string().contains("toolchain.install"));
    }

    #[test]
    fn validate_rejects_empty_module_name() {
        let mut config = AppConfig::default();
        config.modules.push(ModuleEntry::new(" ", "blank", ""));
        assert!(matches!(
            config.validate(),
            Err(DocGenError::Validation { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_program_and_entry_file() {
        let mut config = AppConfig::default();
        config.toolchain.doc.program = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DocGenError::Validation { .. }));
        assert!(err.to_string().contains("toolchain.doc"));

        let mut config = AppConfig::default();
        config.paths.example_entry = String::new();
        assert!(matches!(
            config.validate(),
            Err(DocGenError::Validation { .. })
        ));
    }

    #[test]
    fn module_details_fall_back_to_description() {
        let config = AppConfig::default();
        let compute = config.modules.iter().find(|m| m.name == "compute").unwrap();
        assert_eq!(
            compute.details_or_description(),
            "Provides functionality to manage virtual instances, machine types, images, and snapshots."
        );

        let toml_str = r#"
[[modules]]
name = "billing"
description = "Billing service API"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.modules[0].details, "");
        assert_eq!(config.modules[0].details_or_description(), "Billing service API");
    }

    #[test]
    fn init_then_load() {
        let tmp = temp_dir();
        let path = tmp.join("docs").join(CONFIG_FILE_NAME);

        init_config(&path).unwrap();
        assert!(init_config(&path).is_err(), "second init must not overwrite");

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.project.title, "MGC Go SDK");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let tmp = temp_dir();
        let result = load_config(Some(&tmp.join("nope.toml")));
        assert!(matches!(result, Err(DocGenError::Io { .. })));
        let _ = std::fs::remove_dir_all(&tmp);
    }
}
