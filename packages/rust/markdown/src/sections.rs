//! README sectionizer.
//!
//! Splits a Markdown README into named sections keyed by their `## ` heading.
//! Everything before the first such heading belongs to `introduction`.

use std::sync::LazyLock;

use regex::Regex;

/// Name of the section that collects text before the first `## ` heading.
pub const INTRODUCTION: &str = "introduction";

/// Ordered section name → trimmed text mapping.
///
/// Order is the order in which section names first appeared in the README.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(String, String)>,
}

impl Sections {
    /// Text of the named section.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.as_str())
    }

    /// Iterate `(name, text)` pairs in README order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }

    /// Section names in README order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates line buffers while scanning.
#[derive(Default)]
struct Builder {
    buffers: Vec<(String, Vec<String>)>,
}

impl Builder {
    fn slot(&mut self, name: &str) -> &mut Vec<String> {
        let idx = match self.buffers.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.buffers.push((name.to_string(), Vec::new()));
                self.buffers.len() - 1
            }
        };
        &mut self.buffers[idx].1
    }

    /// Start `name` over with the given lines, keeping its original position.
    fn reset(&mut self, name: &str, lines: Vec<String>) {
        *self.slot(name) = lines;
    }

    fn push(&mut self, name: &str, line: &str) {
        self.slot(name).push(line.to_string());
    }

    fn finish(self) -> Sections {
        Sections {
            entries: self
                .buffers
                .into_iter()
                .map(|(name, lines)| (name, lines.join("\n").trim().to_string()))
                .collect(),
        }
    }
}

/// Split README text into sections.
///
/// - `## Heading` opens (or restarts) the section named [`section_slug`]`("Heading")`.
/// - `# Title` restarts `introduction` with the title line as its only line.
/// - Any other line is appended to the current section.
pub fn sectionize(readme: &str) -> Sections {
    let mut builder = Builder::default();
    let mut current = INTRODUCTION.to_string();

    for line in readme.split('\n') {
        if let Some(heading) = line.strip_prefix("## ") {
            current = section_slug(heading);
            builder.reset(&current, Vec::new());
        } else if line.starts_with("# ") {
            builder.reset(INTRODUCTION, vec![line.to_string()]);
            current = INTRODUCTION.to_string();
        } else {
            builder.push(&current, line);
        }
    }

    let sections = builder.finish();
    tracing::debug!(sections = ?sections.names(), "README sectionized");
    sections
}

/// Turn heading text into a section key: lowercase, only `[a-z0-9-]` and
/// whitespace kept, whitespace runs replaced by `-`.
pub fn section_slug(heading: &str) -> String {
    static STRIP_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid regex"));
    static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    let lowered = heading.trim().to_lowercase();
    let stripped = STRIP_RE.replace_all(&lowered, "");
    SPACE_RE.replace_all(&stripped, "-").into_owned()
}
