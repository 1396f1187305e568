//! Reformat `go doc -all` output as Markdown.
//!
//! The scan is a single pass. Declarations become plain ``` fences (no
//! language tag, partial snippets break highlighters), `//` comments become
//! emphasized prose, everything else becomes plain prose.

/// Line prefixes that start a Go declaration.
pub const GO_DECLARATION_KEYWORDS: &[&str] = &["func", "type", "const", "var", "package", "import"];

/// Divider lines in `go doc -all` output. Each is dropped once.
const DIVIDERS: [&str; 2] = ["CONSTANTS", "TYPES"];

/// Clean `go doc -all` output using the Go declaration keywords.
pub fn clean_go_doc(raw: &str) -> String {
    clean_doc_output(raw, GO_DECLARATION_KEYWORDS)
}

/// Clean documentation command output.
///
/// The first line (the `package x // import "..."` header) is dropped.
/// `keywords` decides which lines open or continue a code block.
pub fn clean_doc_output(raw: &str, keywords: &[&str]) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut cleaner = Cleaner::new(keywords);
    for line in raw.split('\n').skip(1) {
        cleaner.feed(line);
    }
    let out = cleaner.finish();

    tracing::debug!(
        input_lines = raw.lines().count(),
        output_lines = out.lines().count(),
        "doc output cleaned"
    );
    out
}

/// An open code fence.
struct CodeBlock {
    lines: Vec<String>,
    /// Unbalanced `{`/`(` count; the block cannot close while positive.
    depth: i32,
    /// Blank lines seen at depth 0, kept only if the block continues.
    pending_blanks: usize,
}

impl CodeBlock {
    fn open(line: &str) -> Self {
        let mut block = Self {
            lines: Vec::new(),
            depth: 0,
            pending_blanks: 0,
        };
        block.push(line);
        block
    }

    fn push(&mut self, line: &str) {
        for _ in 0..std::mem::take(&mut self.pending_blanks) {
            self.lines.push(String::new());
        }
        self.depth = (self.depth + bracket_delta(line)).max(0);
        self.lines.push(line.to_string());
    }
}

struct Cleaner<'k> {
    keywords: &'k [&'k str],
    out: Vec<String>,
    block: Option<CodeBlock>,
    dividers_seen: [bool; DIVIDERS.len()],
}

impl<'k> Cleaner<'k> {
    fn new(keywords: &'k [&'k str]) -> Self {
        Self {
            keywords,
            out: Vec::new(),
            block: None,
            dividers_seen: [false; DIVIDERS.len()],
        }
    }

    fn feed(&mut self, line: &str) {
        let trimmed = line.trim();

        if self.out.is_empty() && self.block.is_none() && trimmed.is_empty() {
            return;
        }

        if self.take_divider(trimmed) {
            return;
        }

        if self.is_declaration(trimmed) {
            match &mut self.block {
                Some(block) if block.depth > 0 => block.push(line.trim_end()),
                Some(block) => block.push(trimmed),
                None => self.block = Some(CodeBlock::open(trimmed)),
            }
            return;
        }

        if let Some(block) = &mut self.block {
            if block.depth > 0 {
                block.push(line.trim_end());
                return;
            }
            if trimmed.is_empty() {
                block.pending_blanks += 1;
                return;
            }
            self.close_block();
        }

        self.push_prose(trimmed);
    }

    fn finish(mut self) -> String {
        self.close_block();
        self.out.join("\n").trim().to_string()
    }

    /// Drop the first occurrence of each divider line.
    fn take_divider(&mut self, trimmed: &str) -> bool {
        match DIVIDERS.iter().position(|d| *d == trimmed) {
            Some(idx) if !self.dividers_seen[idx] => {
                self.dividers_seen[idx] = true;
                true
            }
            _ => false,
        }
    }

    fn is_declaration(&self, trimmed: &str) -> bool {
        self.keywords.iter().any(|kw| {
            trimmed
                .strip_prefix(kw)
                .is_some_and(|rest| rest.starts_with(' '))
        })
    }

    fn close_block(&mut self) {
        if let Some(block) = self.block.take() {
            self.out.push("```".to_string());
            self.out.extend(block.lines);
            self.out.push("```".to_string());
        }
    }

    fn push_prose(&mut self, trimmed: &str) {
        if trimmed.is_empty() {
            return;
        }

        if let Some(comment) = trimmed.strip_prefix("//") {
            let comment = comment.trim();
            if !comment.is_empty() {
                self.out.push(format!("*{}*", escape_quotes(comment)));
            }
            return;
        }

        self.out.push(escape_quotes(trimmed));
    }
}

/// Backslash-escape single and double quotes.
fn escape_quotes(text: &str) -> String {
    text.replace('\'', "\\'").replace('"', "\\\"")
}

/// Net `{`/`(` opened by a line, ignoring string literals and `//` tails.
fn bracket_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' && q != '`' {
                chars.next();
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '`' | '\'' => quote = Some(c),
            '/' if chars.peek() == Some(&'/') => break,
            '{' | '(' => delta += 1,
            '}' | ')' => delta -= 1,
            _ => {}
        }
    }

    delta
}
