//! CSS Scoper - prefix component selectors with the instance id
//!
//! `.title { color: red }` becomes `#tag-42 .title { color: red }` so a
//! component's rules only reach its own subtree.
//!
//! # Rules
//!
//! - A stylesheet containing [`NO_SCOPE_MARKER`] is returned untouched
//! - `@media` / `@supports` lines pass through, their nested rules are scoped
//! - Other at-rule blocks (`@keyframes`, `@font-face`, ...) pass through with
//!   their whole body
//! - Blank lines, comments, declarations and closing braces pass through
//! - Braces inside `/* ... */` are ignored when tracking blocks
//! - An at-rule prelude may put its `{` on a later line
//! - A selector group must sit on the same line as its `{`. A line ending in
//!   `,` is left unscoped; only the part on the brace line gets the prefix.

use tracing::debug;

/// Opt-out directive for global or utility stylesheets
pub const NO_SCOPE_MARKER: &str = "/* @no-scope */";

/// What opened the block we are currently inside
#[derive(Debug, Clone, Copy, PartialEq)]
enum Block {
    /// `@media` / `@supports`: children are rules and get scoped
    Conditional,
    /// Any other at-rule: children are not selectors
    OtherAtRule,
    /// A style rule's declaration block
    Rule,
}

/// Scope every selector in `css` to `#component_id`
pub fn scope_css(css: &str, component_id: &str) -> String {
    if css.contains(NO_SCOPE_MARKER) {
        return css.to_string();
    }

    let mut blocks = BlockTracker::default();
    let mut in_comment = false;
    let mut out: Vec<String> = Vec::with_capacity(css.lines().count() + 1);

    for raw in css.split('\n') {
        let line = raw.trim();
        let inside_comment = in_comment;
        let code = strip_comments(raw, &mut in_comment);
        let code = code.trim();

        let rewritten = if inside_comment
            || !blocks.scopable()
            || is_passthrough(line)
            || !code.contains('{')
        {
            if blocks.scopable() && !inside_comment && !is_passthrough(line) && code.ends_with(',')
            {
                debug!(
                    selector = line,
                    "Selector list continues on next line; only the brace line is scoped"
                );
            }
            raw.to_string()
        } else {
            scope_rule_line(raw, component_id)
        };

        blocks.advance(code);
        out.push(rewritten);
    }

    out.join("\n")
}

fn is_passthrough(line: &str) -> bool {
    line.is_empty() || line.starts_with("/*") || line.starts_with('*') || line.starts_with('@')
}

/// The part of `line` outside `/* ... */`. `in_comment` carries an
/// unterminated comment over to the next line.
fn strip_comments(line: &str, in_comment: &mut bool) -> String {
    let mut code = String::with_capacity(line.len());
    let mut rest = line;
    loop {
        if *in_comment {
            let Some(end) = rest.find("*/") else {
                return code;
            };
            rest = &rest[end + 2..];
            *in_comment = false;
        } else {
            let Some(start) = rest.find("/*") else {
                code.push_str(rest);
                return code;
            };
            code.push_str(&rest[..start]);
            rest = &rest[start + 2..];
            *in_comment = true;
        }
    }
}

fn block_kind(code: &str) -> Block {
    if code.starts_with("@media") || code.starts_with("@supports") {
        Block::Conditional
    } else if code.starts_with('@') {
        Block::OtherAtRule
    } else {
        Block::Rule
    }
}

/// Open blocks, innermost last
#[derive(Debug, Default)]
struct BlockTracker {
    stack: Vec<Block>,
    /// Kind of an at-rule whose prelude ended without its `{`
    pending: Option<Block>,
}

impl BlockTracker {
    /// Whether a rule starting here is a top-level or conditional child
    fn scopable(&self) -> bool {
        matches!(self.stack.last(), None | Some(Block::Conditional))
    }

    /// Apply every brace in a comment-free line, in order
    fn advance(&mut self, code: &str) {
        if !code.contains('{') {
            if code.starts_with('@') && !code.ends_with(';') {
                self.pending = Some(block_kind(code));
            } else if code.ends_with(';') {
                self.pending = None;
            }
            for _ in code.matches('}') {
                self.stack.pop();
            }
            return;
        }

        let mut kind = self.pending.take().unwrap_or_else(|| block_kind(code));
        for c in code.chars() {
            match c {
                '{' => {
                    self.stack.push(kind);
                    kind = block_kind(code);
                }
                '}' => {
                    self.stack.pop();
                }
                _ => {}
            }
        }
    }
}

/// Rewrite `  .a, .b {` into `  #id .a, #id .b {`, keeping indentation and
/// whatever follows the brace
fn scope_rule_line(raw: &str, component_id: &str) -> String {
    let Some(brace) = raw.find('{') else {
        return raw.to_string();
    };
    let (head, tail) = raw.split_at(brace);

    let indent = &head[..head.len() - head.trim_start().len()];
    let gap = &head[head.trim_end().len()..];

    let selectors: Vec<String> = head
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("#{} {}", component_id, s))
        .collect();

    if selectors.is_empty() {
        return raw.to_string();
    }

    format!("{}{}{}{}", indent, selectors.join(", "), gap, tail)
}
