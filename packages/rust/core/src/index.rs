//! `index.rst` navigation document.

use std::path::{Path, PathBuf};

use tracing::info;

use sdkdocs_shared::{AppConfig, Result};

use crate::examples::ExampleDir;
use crate::scaffold::write_text;

/// File name of the root document.
pub const INDEX_FILE: &str = "index.rst";

/// Render the root toctree document.
///
/// Content pages and modules come from configuration; the examples toctree
/// lists the discovered examples and is omitted when there are none.
pub fn render_index(config: &AppConfig, examples: &[ExampleDir]) -> String {
    let title = &config.project.title;
    let mut doc = format!(
        "{title}\n{}\n\nWelcome to the {title} documentation!\n\n{}\n\n",
        "#".repeat(title.chars().count()),
        config.project.description
    );

    push_toctree(
        &mut doc,
        2,
        "Content",
        config.index.content_pages.iter().map(String::as_str),
    );

    if !examples.is_empty() {
        let pages: Vec<String> = examples
            .iter()
            .map(|e| format!("examples/{}", e.page_name()))
            .collect();
        push_toctree(&mut doc, 1, "Examples", pages.iter().map(String::as_str));
    }

    let modules: Vec<String> = config
        .module_names()
        .map(|m| format!("modules/{m}"))
        .collect();
    push_toctree(&mut doc, 1, "Modules", modules.iter().map(String::as_str));

    doc.push_str(
        "Indices and tables\n\
         ==================\n\n\
         * :ref:`genindex`\n\
         * :ref:`modindex`\n\
         * :ref:`search`\n",
    );

    doc
}

fn push_toctree<'a>(
    doc: &mut String,
    maxdepth: u8,
    caption: &str,
    entries: impl Iterator<Item = &'a str>,
) {
    doc.push_str(&format!(
        ".. toctree::\n   :maxdepth: {maxdepth}\n   :caption: {caption}:\n\n"
    ));
    for entry in entries {
        doc.push_str(&format!("   {entry}\n"));
    }
    doc.push('\n');
}

/// Write `index.rst` into the source directory.
pub fn write_index(config: &AppConfig, examples: &[ExampleDir], source_dir: &Path) -> Result<PathBuf> {
    let path = source_dir.join(INDEX_FILE);
    write_text(&path, &render_index(config, examples))?;
    info!(examples = examples.len(), "index.rst file created");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(name: &str) -> ExampleDir {
        ExampleDir {
            name: name.into(),
            entry: PathBuf::from(format!("/sdk/cmd/examples/{name}/main.go")),
        }
    }

    #[test]
    fn index_lists_pages_examples_and_modules() {
        let config = AppConfig::default();
        let doc = render_index(&config, &[example("audit"), example("kubernetes_small")]);

        assert!(doc.starts_with("MGC Go SDK\n##########\n\nWelcome to the MGC Go SDK documentation!\n"));
        assert!(doc.contains(":caption: Content:\n\n   introduction\n   installation\n"));
        assert!(doc.contains("   project-structure\n\n"));
        assert!(doc.contains(
            ".. toctree::\n   :maxdepth: 1\n   :caption: Examples:\n\n   examples/audit\n   examples/kubernetes-small\n\n"
        ));
        assert!(doc.contains(":caption: Modules:\n\n   modules/client\n   modules/compute\n"));
        assert!(doc.contains("   modules/helpers\n\nIndices and tables\n"));
        assert!(doc.ends_with("* :ref:`search`\n"));
    }

    #[test]
    fn index_without_examples_has_no_examples_toctree() {
        let doc = render_index(&AppConfig::default(), &[]);
        assert!(!doc.contains("Examples:"));
        assert!(doc.contains(":caption: Modules:"));
    }
}
