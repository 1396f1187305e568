//! Example program discovery and pages.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use sdkdocs_markdown::{ExampleSource, example_page_name, render_example_page};
use sdkdocs_shared::{DocGenError, Result};

use crate::scaffold::write_text;

/// An example directory that contains the entry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDir {
    /// Directory name (`kubernetes_small`).
    pub name: String,
    /// Absolute path to the entry file.
    pub entry: PathBuf,
}

impl ExampleDir {
    /// Page file stem (`kubernetes-small`).
    pub fn page_name(&self) -> String {
        example_page_name(&self.name)
    }
}

/// List example directories holding `entry_file`, sorted by directory name.
/// A missing examples directory yields an empty list.
pub fn discover_examples(examples_dir: &Path, entry_file: &str) -> Result<Vec<ExampleDir>> {
    if !examples_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries =
        std::fs::read_dir(examples_dir).map_err(|e| DocGenError::io(examples_dir, e))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocGenError::io(examples_dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let main = path.join(entry_file);
        if main.is_file() {
            found.push(ExampleDir {
                name: entry.file_name().to_string_lossy().into_owned(),
                entry: main,
            });
        }
    }

    found.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(found)
}

/// Write `examples/<page>.md` for each example. Returns the written paths.
///
/// `examples_rel` is the examples directory as shown on the page
/// (e.g. `cmd/examples`).
#[instrument(skip_all, fields(count = examples.len()))]
pub fn write_example_pages(
    examples: &[ExampleDir],
    examples_rel: &str,
    entry_file: &str,
    pages_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(examples.len());

    for example in examples {
        let source = match std::fs::read_to_string(&example.entry) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!(path = %example.entry.display(), error = %e, "error reading example file");
                None
            }
        };

        let display_path = format!(
            "{}/{}/{entry_file}",
            examples_rel.trim_end_matches('/'),
            example.name
        );
        let page = render_example_page(&ExampleSource {
            name: &example.name,
            display_path: &display_path,
            source: source.as_deref(),
        });

        let path = pages_dir.join(format!("{}.md", example.page_name()));
        write_text(&path, &page)?;
        info!(example = %example.name, "created example documentation");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::tests::temp_dir;

    #[test]
    fn discovers_sorted_examples_with_entry_file() {
        let tmp = temp_dir("examples");
        let examples = tmp.join("cmd/examples");
        write_text(&examples.join("network/main.go"), "package main").unwrap();
        write_text(&examples.join("audit/main.go"), "package main").unwrap();
        write_text(&examples.join("kubernetes_small/main.go"), "package main").unwrap();
        write_text(&examples.join("broken/helper.go"), "package main").unwrap();
        write_text(&examples.join("main.go"), "package main").unwrap();

        let found = discover_examples(&examples, "main.go").unwrap();
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["audit", "kubernetes_small", "network"]);
        assert_eq!(found[1].page_name(), "kubernetes-small");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_examples_dir_is_empty() {
        let tmp = temp_dir("examples");
        assert!(discover_examples(&tmp.join("nope"), "main.go").unwrap().is_empty());
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn writes_example_page() {
        let tmp = temp_dir("examples");
        let examples = tmp.join("cmd/examples");
        write_text(
            &examples.join("block_storage/main.go"),
            "// Volume lifecycle walkthrough.\npackage main\n",
        )
        .unwrap();

        let found = discover_examples(&examples, "main.go").unwrap();
        let pages_dir = tmp.join("source/examples");
        let written = write_example_pages(&found, "cmd/examples/", "main.go", &pages_dir).unwrap();

        assert_eq!(written, vec![pages_dir.join("block-storage.md")]);
        let page = std::fs::read_to_string(&written[0]).unwrap();
        assert!(page.starts_with("# Block_Storage\n"));
        assert!(page.contains("Volume lifecycle walkthrough.\n\n"));
        assert!(page.contains("**File:** `cmd/examples/block_storage/main.go`"));
        assert!(page.contains("```go\n// Volume lifecycle walkthrough.\npackage main\n```\n"));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
