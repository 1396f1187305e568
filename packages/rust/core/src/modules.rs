//! Per-module API pages built from `go doc` output.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use sdkdocs_markdown::{clean_go_doc, render_module_page};
use sdkdocs_shared::{DocGenError, Result, ToolCommand};

use crate::layout::DocLayout;
use crate::process::run_tool;
use crate::scaffold::write_text;

/// What happened for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// Page written; `with_docs` is false when no package docs could be fetched.
    Written { path: PathBuf, with_docs: bool },
    /// No directory for the module under the SDK root.
    Missing,
    /// The directory holds no non-test Go files.
    NoSources,
}

/// Fetch and clean package docs. `None` when the command is unavailable,
/// times out, fails, or prints nothing.
pub async fn fetch_package_doc(
    module: &str,
    project_root: &Path,
    cmd: &ToolCommand,
) -> Option<String> {
    match run_tool(cmd, [module], Some(project_root)).await {
        Ok(out) => match out.stdout_if_ok() {
            Some(_) => Some(clean_go_doc(&out.stdout)),
            None => {
                warn!(module, stderr = out.stderr_tail(), "no package documentation found");
                None
            }
        },
        Err(DocGenError::Timeout { secs, .. }) => {
            warn!(module, secs, "timeout getting package documentation");
            None
        }
        Err(e) => {
            warn!(module, error = %e, "error getting package documentation");
            None
        }
    }
}

/// Write `modules/<name>.md` for one module.
#[instrument(skip(layout, cmd))]
pub async fn document_module(
    module: &str,
    layout: &DocLayout,
    cmd: &ToolCommand,
) -> Result<ModuleOutcome> {
    let module_dir = layout.project_root.join(module);

    if !module_dir.is_dir() {
        warn!(path = %module_dir.display(), "module not found");
        return Ok(ModuleOutcome::Missing);
    }

    if !has_go_sources(&module_dir)? {
        warn!(path = %module_dir.display(), "no Go files found in module");
        return Ok(ModuleOutcome::NoSources);
    }

    let doc = fetch_package_doc(module, &layout.project_root, cmd).await;
    let with_docs = doc.as_deref().is_some_and(|d| !d.is_empty());

    let path = layout.modules_dir().join(format!("{module}.md"));
    write_text(&path, &render_module_page(module, doc.as_deref()))?;
    info!(with_docs, "module documentation created");

    Ok(ModuleOutcome::Written { path, with_docs })
}

/// Whether `dir` directly contains a `.go` file that is not a test.
fn has_go_sources(dir: &Path) -> Result<bool> {
    let entries = std::fs::read_dir(dir).map_err(|e| DocGenError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| DocGenError::io(dir, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.ends_with(".go") && !name.ends_with("_test.go") && entry.path().is_file() {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::tests::temp_dir;

    fn unavailable_tool() -> ToolCommand {
        ToolCommand {
            program: "sdkdocs-no-such-go".into(),
            args: vec!["doc".into(), "-all".into()],
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn missing_module_writes_nothing() {
        let tmp = temp_dir("modules");
        let layout = DocLayout::local(tmp.join("sdk"), tmp.join("docs"));

        let outcome = document_module("compute", &layout, &unavailable_tool()).await.unwrap();

        assert_eq!(outcome, ModuleOutcome::Missing);
        assert!(!layout.modules_dir().join("compute.md").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn test_only_module_is_skipped() {
        let tmp = temp_dir("modules");
        let layout = DocLayout::local(tmp.join("sdk"), tmp.join("docs"));
        write_text(&tmp.join("sdk/audit/audit_test.go"), "package audit").unwrap();
        write_text(&tmp.join("sdk/audit/README.md"), "docs").unwrap();

        let outcome = document_module("audit", &layout, &unavailable_tool()).await.unwrap();

        assert_eq!(outcome, ModuleOutcome::NoSources);
        assert!(!layout.modules_dir().join("audit.md").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn unavailable_tool_still_writes_title_page() {
        let tmp = temp_dir("modules");
        let layout = DocLayout::local(tmp.join("sdk"), tmp.join("docs"));
        write_text(&tmp.join("sdk/sshkeys/keys.go"), "package sshkeys").unwrap();

        let outcome = document_module("sshkeys", &layout, &unavailable_tool()).await.unwrap();

        let path = layout.modules_dir().join("sshkeys.md");
        assert_eq!(
            outcome,
            ModuleOutcome::Written {
                path: path.clone(),
                with_docs: false
            }
        );
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Sshkeys\n\n");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timed_out_doc_tool_writes_title_page() {
        let tmp = temp_dir("modules");
        let layout = DocLayout::local(tmp.join("sdk"), tmp.join("docs"));
        write_text(&tmp.join("sdk/lbaas/lbaas.go"), "package lbaas").unwrap();

        let slow_go = ToolCommand {
            program: "sh".into(),
            args: vec!["-c".into(), "sleep 5".into()],
            timeout_secs: 1,
        };

        let outcome = document_module("lbaas", &layout, &slow_go).await.unwrap();

        assert!(matches!(outcome, ModuleOutcome::Written { with_docs: false, .. }));
        let page = std::fs::read_to_string(layout.modules_dir().join("lbaas.md")).unwrap();
        assert_eq!(page, "# Lbaas\n\n");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn doc_output_is_cleaned_into_page() {
        let tmp = temp_dir("modules");
        let layout = DocLayout::local(tmp.join("sdk"), tmp.join("docs"));
        write_text(&tmp.join("sdk/client/client.go"), "package client").unwrap();

        // `sh -c script module`: the module name lands in $0.
        let fake_go = ToolCommand {
            program: "sh".into(),
            args: vec![
                "-c".into(),
                "printf 'package %s // import \"x/%s\"\\n\\nPackage %s talks to the API.\\n\\nfunc New() *Client\\n' \"$0\" \"$0\" \"$0\"".into(),
            ],
            timeout_secs: 5,
        };

        let outcome = document_module("client", &layout, &fake_go).await.unwrap();
        assert!(matches!(outcome, ModuleOutcome::Written { with_docs: true, .. }));

        let page = std::fs::read_to_string(layout.modules_dir().join("client.md")).unwrap();
        assert_eq!(
            page,
            "# Client\n\nPackage client talks to the API.\n```\nfunc New() *Client\n```\n\n"
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
