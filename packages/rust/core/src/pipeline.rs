//! End-to-end `generate` pipeline: version → scaffold → pages → index → install.
//!
//! Every step is best-effort. A failing step is logged, recorded in the
//! [`GenerateReport`], and the run moves on to the next step.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Datelike;
use serde::Serialize;
use tracing::{info, instrument, warn};

use sdkdocs_shared::{AppConfig, Result};

use crate::examples::{discover_examples, write_example_pages};
use crate::index::write_index;
use crate::layout::{DocLayout, Platform, RunEnv};
use crate::modules::{ModuleOutcome, document_module};
use crate::pages::{
    extract_readme_sections, readme_page_files, write_project_structure, write_section_pages,
};
use crate::scaffold::scaffold;
use crate::sphinx::{check_toolchain, install_dependencies, write_conf_py, write_requirements};
use crate::version::{ResolvedVersion, resolve_version};

/// Configuration for the `generate` pipeline.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Loaded generator config.
    pub app: AppConfig,
    /// SDK checkout root (on ReadTheDocs, the parent of `v<version>`).
    pub project_root: PathBuf,
    /// Docs directory.
    pub docs_dir: PathBuf,
    /// Environment snapshot.
    pub env: RunEnv,
    /// Skip the dependency installation step.
    pub skip_install: bool,
}

/// A step that produced nothing, or less than it should have.
#[derive(Debug, Clone, Serialize)]
pub struct StepWarning {
    pub step: &'static str,
    pub message: String,
}

/// Outcome of a `generate` run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub platform: Platform,
    pub version: ResolvedVersion,
    pub layout: DocLayout,
    /// Toolchain version line, if the probe succeeded.
    pub toolchain: Option<String>,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
    pub warnings: Vec<StepWarning>,
    /// Whether dependencies were installed.
    pub installed: bool,
    pub elapsed_ms: u64,
}

impl GenerateReport {
    /// True when every step produced its full output.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new step.
    fn phase(&self, name: &str);
    /// Called after each file is written.
    fn file_written(&self, path: &Path);
    /// Called when the pipeline completes.
    fn done(&self, report: &GenerateReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_written(&self, _path: &Path) {}
    fn done(&self, _report: &GenerateReport) {}
}

/// Accumulates the report while steps run.
struct Run<'a> {
    report: GenerateReport,
    progress: &'a dyn ProgressReporter,
}

impl Run<'_> {
    fn phase(&self, name: &str) {
        self.progress.phase(name);
    }

    fn wrote(&mut self, path: PathBuf) {
        self.progress.file_written(&path);
        self.report.files.push(path);
    }

    fn warn(&mut self, step: &'static str, message: impl Display) {
        let message = message.to_string();
        warn!(step, %message, "step degraded");
        self.report.warnings.push(StepWarning { step, message });
    }

    /// Record a step result: the value on success, a warning on failure.
    fn record<T>(&mut self, step: &'static str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.warn(step, e);
                None
            }
        }
    }
}

/// Run the full `generate` pipeline.
///
/// 1. Resolve the version and check the toolchain
/// 2. Scaffold output and source directories
/// 3. Write `requirements.txt` and `conf.py`
/// 4. README section pages
/// 5. Module pages from `go doc`
/// 6. Example pages
/// 7. Project structure page
/// 8. `index.rst`
/// 9. Install dependencies
///
/// Only an invalid configuration fails the run.
#[instrument(skip_all, fields(project_root = %config.project_root.display()))]
pub async fn generate(
    config: &GenerateConfig,
    progress: &dyn ProgressReporter,
) -> Result<GenerateReport> {
    config.app.validate()?;

    let start = Instant::now();
    let app = &config.app;
    let platform = config.env.platform();

    info!(?platform, project = %app.project.name, "starting documentation generation");

    // --- Step 1: Version & toolchain ---
    progress.phase("Resolving version");
    let version = resolve_version(
        &config.env,
        &app.toolchain.vcs_tag,
        &config.docs_dir,
        &app.project.default_version,
    )
    .await;
    let layout = DocLayout::for_platform(
        platform,
        &config.project_root,
        &config.docs_dir,
        &version.version,
    );

    progress.phase("Checking toolchain");
    let toolchain = check_toolchain(&app.toolchain.version).await;

    let mut run = Run {
        report: GenerateReport {
            platform,
            version,
            layout: layout.clone(),
            toolchain,
            files: Vec::new(),
            warnings: Vec::new(),
            installed: false,
            elapsed_ms: 0,
        },
        progress,
    };
    if run.report.toolchain.is_none() {
        run.warn("toolchain", "documentation toolchain unavailable, continuing without it");
    }

    // --- Step 2: Scaffold ---
    run.phase("Creating Sphinx structure");
    let scaffolded = scaffold(&layout);
    run.record("scaffold", scaffolded);

    // --- Step 3: Sphinx files ---
    run.phase("Writing Sphinx configuration");
    let requirements = write_requirements(&layout.docs_dir, &app.sphinx.requirements);
    let requirements = run.record("requirements", requirements);
    if let Some(path) = &requirements {
        run.wrote(path.clone());
    }

    let year = chrono::Utc::now().year();
    let conf = write_conf_py(&app.project, &run.report.version.version, year, &layout.source_dir);
    if let Some(path) = run.record("conf", conf) {
        run.wrote(path);
    }

    // --- Step 4: README pages ---
    run.phase("Writing README pages");
    let readme = layout.project_root.join(&app.paths.readme);
    let sections = extract_readme_sections(&readme);
    match run.record("readme", sections) {
        Some(sections) if sections.is_empty() => {
            run.warn("readme", format!("no README content at {}", readme.display()));
        }
        Some(sections) => {
            // project-structure.md is generated in step 7.
            let files = readme_page_files(&app.sections);
            let written = write_section_pages(&sections, &files, &layout.source_dir);
            for path in run.record("readme", written).unwrap_or_default() {
                run.wrote(path);
            }
        }
        None => {}
    }

    // --- Step 5: Module pages ---
    run.phase("Writing module documentation");
    for module in app.module_names() {
        let outcome = document_module(module, &layout, &app.toolchain.doc).await;
        match run.record("modules", outcome) {
            Some(ModuleOutcome::Written { path, with_docs }) => {
                if !with_docs {
                    run.warn("modules", format!("no package documentation for {module}"));
                }
                run.wrote(path);
            }
            Some(ModuleOutcome::Missing) => {
                run.warn("modules", format!("module {module} not found"));
            }
            Some(ModuleOutcome::NoSources) => {
                run.warn("modules", format!("no Go files found in {module}"));
            }
            None => {}
        }
    }

    // --- Step 6: Example pages ---
    run.phase("Writing example pages");
    let examples_dir = layout.project_root.join(&app.paths.examples_dir);
    if !examples_dir.is_dir() {
        run.warn(
            "examples",
            format!("examples directory not found at {}", examples_dir.display()),
        );
    }
    let examples = discover_examples(&examples_dir, &app.paths.example_entry);
    let examples = run.record("examples", examples).unwrap_or_default();
    if !examples.is_empty() {
        let written = write_example_pages(
            &examples,
            &app.paths.examples_dir,
            &app.paths.example_entry,
            &layout.example_pages_dir(),
        );
        for path in run.record("examples", written).unwrap_or_default() {
            run.wrote(path);
        }
    }

    // --- Step 7: Project structure ---
    run.phase("Writing project structure");
    let structure = write_project_structure(app, &layout.source_dir);
    if let Some(path) = run.record("structure", structure) {
        run.wrote(path);
    }

    // --- Step 8: Index ---
    run.phase("Writing index");
    let index = write_index(app, &examples, &layout.source_dir);
    if let Some(path) = run.record("index", index) {
        run.wrote(path);
    }

    // --- Step 9: Install ---
    match (&requirements, config.skip_install) {
        (_, true) => info!("skipping dependency installation"),
        (None, false) => run.warn("install", "no requirements file to install"),
        (Some(path), false) => {
            run.phase("Installing dependencies");
            let installed = install_dependencies(&app.toolchain.install, path).await;
            run.report.installed = run.record("install", installed).is_some();
        }
    }

    run.report.elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        files = run.report.files.len(),
        warnings = run.report.warnings.len(),
        elapsed_ms = run.report.elapsed_ms,
        "documentation generation completed"
    );

    progress.done(&run.report);
    Ok(run.report)
}
