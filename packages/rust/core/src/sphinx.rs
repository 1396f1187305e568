//! Sphinx toolchain files: `requirements.txt`, `conf.py`, and dependency
//! installation. Also the Go toolchain probe run before anything else.

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use sdkdocs_shared::{DocGenError, ProjectConfig, Result, ToolCommand};

use crate::process::run_tool;
use crate::scaffold::write_text;

/// Dependency manifest file name.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Sphinx configuration file name.
pub const CONF_FILE: &str = "conf.py";

// ---------------------------------------------------------------------------
// Toolchain probe
// ---------------------------------------------------------------------------

/// Check that the documentation toolchain runs. Returns its version line.
pub async fn check_toolchain(cmd: &ToolCommand) -> Option<String> {
    match run_tool(cmd, [] as [&str; 0], None).await {
        Ok(out) => match out.stdout_if_ok() {
            Some(version) => {
                info!(version, "toolchain found");
                Some(version.to_string())
            }
            None => {
                warn!(command = %cmd.display(), code = ?out.code, "toolchain is not working properly");
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "toolchain not found, module documentation will be empty");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// requirements.txt
// ---------------------------------------------------------------------------

/// Write the dependency manifest into the docs directory.
pub fn write_requirements(docs_dir: &Path, requirements: &[String]) -> Result<PathBuf> {
    let path = docs_dir.join(REQUIREMENTS_FILE);
    let mut content = requirements.join("\n");
    content.push('\n');
    write_text(&path, &content)?;
    info!(count = requirements.len(), "requirements.txt file created");
    Ok(path)
}

/// Install the dependency manifest. Non-zero exit or timeout is an error.
#[instrument(skip(cmd))]
pub async fn install_dependencies(cmd: &ToolCommand, requirements: &Path) -> Result<()> {
    info!(command = %cmd.display(), "installing documentation dependencies");

    let out = match run_tool(cmd, [requirements], None).await {
        Ok(out) => out,
        Err(e) => {
            error!(error = %e, "error installing dependencies");
            return Err(e);
        }
    };

    if !out.success {
        error!(
            code = ?out.code,
            stderr = out.stderr_tail(),
            hint = %format!("{} {}", cmd.display(), requirements.display()),
            "error installing dependencies, try installing manually"
        );
        return Err(DocGenError::process(
            &cmd.program,
            format!("exited with {:?}: {}", out.code, out.stderr_tail()),
        ));
    }

    info!("dependencies installed successfully");
    Ok(())
}

// ---------------------------------------------------------------------------
// conf.py
// ---------------------------------------------------------------------------

/// `major.minor` of a version string, or the whole string if it has no dot.
pub fn short_version(version: &str) -> String {
    let mut parts = version.splitn(3, '.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor)) => {
            let minor: String = minor.chars().take_while(char::is_ascii_digit).collect();
            if minor.is_empty() {
                major.to_string()
            } else {
                format!("{major}.{minor}")
            }
        }
        _ => version.to_string(),
    }
}

/// Python single-quoted string literal.
fn py_str(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Render the Sphinx configuration for `release`.
pub fn render_conf_py(project: &ProjectConfig, release: &str, year: i32) -> String {
    format!(
        r#"# Configuration file for the Sphinx documentation builder.
# Generated by sdkdocs; edits are overwritten on the next run.
#
# https://www.sphinx-doc.org/en/master/usage/configuration.html

# -- Project information -----------------------------------------------------

project = {project}
copyright = {copyright}
author = {author}
version = {version}
release = {release}

# -- General configuration ---------------------------------------------------

extensions = [
    'sphinx.ext.githubpages',
    'sphinx.ext.todo',
    'myst_parser',
    'sphinx_copybutton',
]

templates_path = ['_templates']
exclude_patterns = ['_build', 'Thumbs.db', '.DS_Store']
source_suffix = {{
    '.rst': 'restructuredtext',
    '.md': 'markdown',
}}
language = 'en'

# -- Options for HTML output -------------------------------------------------

html_theme = 'sphinx_rtd_theme'
html_static_path = ['_static']
html_theme_options = {{
    'navigation_depth': 4,
    'titles_only': False,
    'collapse_navigation': False,
    'sticky_navigation': True,
    'includehidden': True,
    'prev_next_buttons_location': 'bottom',
    'style_external_links': True,
}}

# -- Extensions --------------------------------------------------------------

myst_enable_extensions = [
    'colon_fence',
    'deflist',
    'html_admonition',
    'html_image',
    'replacements',
    'smartquotes',
    'substitution',
    'tasklist',
]

copybutton_prompt_text = r'\$ '
copybutton_prompt_is_regexp = True
todo_include_todos = True

highlight_language = 'go'
pygments_style = 'sphinx'
suppress_warnings = ['misc.highlighting_failure']
"#,
        project = py_str(&project.name),
        copyright = py_str(&format!("{year}, {}", project.author)),
        author = py_str(&project.author),
        version = py_str(&short_version(release)),
        release = py_str(release),
    )
}

/// Write `conf.py` into the source directory.
pub fn write_conf_py(
    project: &ProjectConfig,
    release: &str,
    year: i32,
    source_dir: &Path,
) -> Result<PathBuf> {
    let path = source_dir.join(CONF_FILE);
    write_text(&path, &render_conf_py(project, release, year))?;
    info!(release, "conf.py file created");
    Ok(path)
}
