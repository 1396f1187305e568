//! README-derived pages and the project structure page.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use sdkdocs_markdown::{Sections, render_section_page, sectionize};
use sdkdocs_shared::{AppConfig, DocGenError, Result};

use crate::scaffold::write_text;

/// File name of the project structure page.
pub const PROJECT_STRUCTURE_FILE: &str = "project-structure.md";

// ---------------------------------------------------------------------------
// README sections
// ---------------------------------------------------------------------------

/// Read and sectionize the README. A missing README yields no sections.
#[instrument(skip_all, fields(readme = %readme.display()))]
pub fn extract_readme_sections(readme: &Path) -> Result<Sections> {
    if !readme.exists() {
        warn!("README not found");
        return Ok(Sections::default());
    }

    let content = std::fs::read_to_string(readme).map_err(|e| DocGenError::io(readme, e))?;
    let sections = sectionize(&content);
    info!(count = sections.len(), "README sections extracted");
    Ok(sections)
}

/// Write one page per mapped, non-empty section. Returns the written paths.
///
/// Sections without a file mapping are skipped. When two sections map to the
/// same file, the later one in README order wins.
#[instrument(skip_all, fields(sections = sections.len()))]
pub fn write_section_pages(
    sections: &Sections,
    files: &BTreeMap<String, String>,
    source_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (section, content) in sections.iter() {
        let Some(filename) = files.get(section) else {
            debug!(section, "no file mapped for section, skipping");
            continue;
        };
        if content.trim().is_empty() {
            debug!(section, "section is empty, skipping");
            continue;
        }

        let path = source_dir.join(filename);
        write_text(&path, &render_section_page(section, content))?;
        info!(section, file = %filename, "created section page");
        written.push(path);
    }

    Ok(written)
}

/// Section file map without the pages the pipeline generates itself.
pub fn readme_page_files(files: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    files
        .iter()
        .filter(|(_, file)| file.as_str() != PROJECT_STRUCTURE_FILE)
        .map(|(section, file)| (section.clone(), file.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Project structure
// ---------------------------------------------------------------------------

/// A directory on the project structure page.
#[derive(Clone, Copy)]
struct TreeEntry<'a> {
    name: &'a str,
    /// Comment beside the tree line.
    comment: &'a str,
    /// Paragraph under the directory's heading.
    paragraph: &'a str,
}

/// Fixed directories listed after the modules.
const FIXED_DIRS: &[TreeEntry<'static>] = &[
    TreeEntry {
        name: "internal",
        comment: "Internal packages",
        paragraph: "Contains internal packages not publicly exposed.",
    },
    TreeEntry {
        name: "cmd",
        comment: "Usage examples",
        paragraph: "Contains practical examples of how to use each SDK module.",
    },
];

/// Width the tree entries are padded to before their comment.
const TREE_COLUMN: usize = 16;

/// Render the project structure page from the configured modules.
pub fn render_project_structure(config: &AppConfig) -> String {
    let entries: Vec<TreeEntry<'_>> = config
        .modules
        .iter()
        .map(|m| TreeEntry {
            name: &m.name,
            comment: &m.description,
            paragraph: m.details_or_description(),
        })
        .chain(FIXED_DIRS.iter().copied())
        .collect();

    let mut page = format!(
        "# Project Structure\n\n\
         This section describes the organization of files and directories in the {}.\n\n\
         ## Structure Overview\n\n```\n{}/\n",
        config.project.title, config.project.repo_dir
    );

    for (i, entry) in entries.iter().enumerate() {
        let branch = if i + 1 == entries.len() { "└──" } else { "├──" };
        let dir = format!("{}/", entry.name);
        let pad = TREE_COLUMN.saturating_sub(dir.chars().count()).max(1);
        page.push_str(&format!("{branch} {dir}{}# {}\n", " ".repeat(pad), entry.comment));
    }
    page.push_str("```\n\n## Module Descriptions\n");

    for entry in &entries {
        page.push_str(&format!("\n### {}/\n{}\n", entry.name, entry.paragraph));
    }

    page
}

/// Write `project-structure.md`, replacing any README-derived page.
pub fn write_project_structure(config: &AppConfig, source_dir: &Path) -> Result<PathBuf> {
    let path = source_dir.join(PROJECT_STRUCTURE_FILE);
    write_text(&path, &render_project_structure(config))?;
    info!("project structure documentation created");
    Ok(path)
}
