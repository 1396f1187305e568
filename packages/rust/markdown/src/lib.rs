//! Markdown rendering for sdkdocs pages.
//!
//! Splits the SDK README into sections, cleans `go doc` output, and renders
//! the section, module and example pages. Everything here is pure text in,
//! text out; writing files is the job of `sdkdocs-core`.

mod cleanup;
pub mod godoc;
pub mod sections;

use std::sync::LazyLock;

use regex::Regex;

pub use godoc::{GO_DECLARATION_KEYWORDS, clean_doc_output, clean_go_doc};
pub use sections::{INTRODUCTION, Sections, section_slug, sectionize};

// ---------------------------------------------------------------------------
// Section pages
// ---------------------------------------------------------------------------

/// Render a README section as a MyST page.
///
/// The title is the section key with `-` replaced by spaces, titlecased. It
/// goes both into the front-matter and the single H1. `### ` headings in the
/// body are demoted to `## `.
pub fn render_section_page(section: &str, content: &str) -> String {
    let title = section_title(section);
    let body = cleanup::run_pipeline(content);
    format!("---\ntitle: {title}\n---\n\n# {title}\n\n{body}")
}

/// Human title for a section key (`error-handling` → `Error Handling`).
pub fn section_title(section: &str) -> String {
    titleize(&section.replace('-', " "))
}

// ---------------------------------------------------------------------------
// Module pages
// ---------------------------------------------------------------------------

/// Render a module page: H1 title followed by the cleaned package docs, if any.
pub fn render_module_page(module: &str, doc: Option<&str>) -> String {
    let mut page = format!("# {}\n\n", titleize(module));
    if let Some(doc) = doc.filter(|d| !d.trim().is_empty()) {
        page.push_str(doc);
        page.push_str("\n\n");
    }
    page
}

// ---------------------------------------------------------------------------
// Example pages
// ---------------------------------------------------------------------------

/// Inputs for one example page.
#[derive(Debug, Clone)]
pub struct ExampleSource<'a> {
    /// Example directory name (e.g. `kubernetes_small`).
    pub name: &'a str,
    /// Entry file path shown on the page, relative to the SDK root.
    pub display_path: &'a str,
    /// Entry file contents; `None` when it could not be read.
    pub source: Option<&'a str>,
}

/// Render an example page embedding the entry file verbatim.
pub fn render_example_page(example: &ExampleSource<'_>) -> String {
    let mut page = format!(
        "# {}\n\nExample usage of the `{}` module.\n\n",
        titleize(example.name),
        example.name
    );

    if let Some(comment) = example.source.and_then(extract_leading_comment) {
        page.push_str(&comment);
        page.push_str("\n\n");
    }

    page.push_str(&format!("**File:** `{}`\n\n", example.display_path));
    page.push_str("```go\n");
    match example.source {
        Some(source) => {
            page.push_str(source);
            if !source.is_empty() && !source.ends_with('\n') {
                page.push('\n');
            }
        }
        None => page.push_str("// Error reading example file\n"),
    }
    page.push_str("```\n");

    page
}

/// Text of the first `//` comment in a source file.
pub fn extract_leading_comment(source: &str) -> Option<String> {
    static COMMENT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"//\s*(.+)").expect("valid regex"));

    COMMENT_RE
        .captures(source)
        .map(|c| c[1].trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Page file stem for an example directory (`kubernetes_small` → `kubernetes-small`).
pub fn example_page_name(dir_name: &str) -> String {
    dir_name.replace('_', "-")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Titlecase: uppercase the first letter of every run of letters, lowercase
/// the rest (`kubernetes_small` → `Kubernetes_Small`).
pub fn titleize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_page_has_frontmatter_and_h1() {
        let page = render_section_page("error-handling", "Intro\n### Retries\nBack off.");
        assert_eq!(
            page,
            "---\ntitle: Error Handling\n---\n\n# Error Handling\n\nIntro\n## Retries\nBack off.\n"
        );
    }

    #[test]
    fn readme_scenario_renders_three_pages() {
        let sections = sectionize("# Title\n## Installation\nrun this\n## Usage\ndo that");
        let pages: Vec<_> = sections
            .iter()
            .map(|(name, text)| render_section_page(name, text))
            .collect();

        assert!(pages[0].starts_with("---\ntitle: Introduction\n---"));
        assert!(pages[0].contains("# Title"));
        assert!(pages[1].contains("title: Installation"));
        assert!(pages[1].ends_with("run this\n"));
        assert!(pages[2].contains("title: Usage"));
        assert!(pages[2].ends_with("do that\n"));
    }

    #[test]
    fn module_page_with_and_without_docs() {
        assert_eq!(render_module_page("sshkeys", None), "# Sshkeys\n\n");
        assert_eq!(render_module_page("client", Some("  ")), "# Client\n\n");
        assert_eq!(
            render_module_page("client", Some("Package client.")),
            "# Client\n\nPackage client.\n\n"
        );
    }

    #[test]
    fn example_page_embeds_source_and_comment() {
        let source = "package main\n\n// Lists all instances.\nfunc main() {}\n";
        let page = render_example_page(&ExampleSource {
            name: "kubernetes_small",
            display_path: "cmd/examples/kubernetes_small/main.go",
            source: Some(source),
        });

        assert!(page.starts_with("# Kubernetes_Small\n\nExample usage of the `kubernetes_small` module.\n\n"));
        assert!(page.contains("Lists all instances.\n\n**File:** `cmd/examples/kubernetes_small/main.go`"));
        assert!(page.ends_with("```go\npackage main\n\n// Lists all instances.\nfunc main() {}\n```\n"));
    }

    #[test]
    fn example_page_without_newline_or_source() {
        let page = render_example_page(&ExampleSource {
            name: "audit",
            display_path: "cmd/examples/audit/main.go",
            source: Some("package main"),
        });
        assert!(page.ends_with("```go\npackage main\n```\n"));

        let page = render_example_page(&ExampleSource {
            name: "audit",
            display_path: "cmd/examples/audit/main.go",
            source: None,
        });
        assert!(page.contains("// Error reading example file\n```\n"));
    }

    #[test]
    fn leading_comment_extraction() {
        assert_eq!(
            extract_leading_comment("package main\n//   Manage volumes  \n// second"),
            Some("Manage volumes".to_string())
        );
        assert_eq!(extract_leading_comment("package main\nfunc main() {}"), None);
    }

    #[test]
    fn titleize_matches_word_boundaries() {
        assert_eq!(titleize("error handling"), "Error Handling");
        assert_eq!(titleize("kubernetes_small"), "Kubernetes_Small");
        assert_eq!(titleize("LBAAS"), "Lbaas");
        assert_eq!(titleize("v2beta"), "V2Beta");
    }

    #[test]
    fn example_page_names() {
        assert_eq!(example_page_name("kubernetes_small"), "kubernetes-small");
        assert_eq!(example_page_name("audit"), "audit");
    }
}
