//! Cleanup passes applied to page bodies before they are written.
//!
//! Each pass is a function `&str -> String`, applied in sequence.

/// Run the full cleanup pipeline on a page body.
pub(crate) fn run_pipeline(md: &str) -> String {
    let mut result = md.to_string();

    result = demote_level_three_headings(&result);
    result = ensure_trailing_newline(&result);

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Heading hierarchy
// ---------------------------------------------------------------------------

/// Turn `### ` headings into `## ` so README subsections sit directly under
/// the page title. Fenced code is left alone.
pub(crate) fn demote_level_three_headings(md: &str) -> String {
    let mut in_code_block = false;

    md.split('\n')
        .map(|line| {
            if line.trim_start().starts_with("```") {
                in_code_block = !in_code_block;
                return line.to_string();
            }
            match line.strip_prefix("### ") {
                Some(rest) if !in_code_block => format!("## {rest}"),
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Pass 2: Ensure trailing newline
// ---------------------------------------------------------------------------

/// Ensure the text ends with exactly one newline.
pub(crate) fn ensure_trailing_newline(md: &str) -> String {
    let trimmed = md.trim_end_matches('\n');
    format!("{trimmed}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demotes_h3_to_h2() {
        let input = "## Keep\n### Listing instances\n#### Deeper";
        assert_eq!(
            demote_level_three_headings(input),
            "## Keep\n## Listing instances\n#### Deeper"
        );
    }

    #[test]
    fn demotion_skips_code_blocks() {
        let input = "```bash\n### not a heading\n```\n### Heading";
        assert_eq!(
            demote_level_three_headings(input),
            "```bash\n### not a heading\n```\n## Heading"
        );
    }

    #[test]
    fn ensure_trailing_newline_normalizes_multiple() {
        assert_eq!(ensure_trailing_newline("Content\n\n\n"), "Content\n");
        assert_eq!(ensure_trailing_newline("Content"), "Content\n");
    }

    #[test]
    fn pipeline_combines_passes() {
        let result = run_pipeline("### Setup\nline one  \nline two\n\n");
        assert_eq!(result, "## Setup\nline one  \nline two\n");
    }
}
