//! Include/require statement extraction.
//!
//! Works on raw source text with regexes; no parsing of the language itself.
//! Every include-like statement is classified so the caller can tell a
//! resolvable literal from a dynamic expression that must not produce an edge.

use std::iter::Peekable;
use std::str::Chars;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // include, include_once, require, require_once; optional parens; ends at `;` or `?>`.
    static ref INCLUDE_STATEMENT: Regex = Regex::new(
        r"(?i)\b(?:include|require)(?:_once)?\b\s*(?:\(\s*)?(?P<arg>[^;]+?)\s*\)?\s*(?:;|\?>)"
    )
    .unwrap();

    static ref SINGLE_QUOTED: Regex = Regex::new(r"^'(?P<path>[^']+)'$").unwrap();
    static ref DOUBLE_QUOTED: Regex = Regex::new(r#"^"(?P<path>[^"]+)"$"#).unwrap();

    // `__DIR__ . '/x.php'`, `dirname(__FILE__) . '/x.php'`, `dirname(__DIR__) . '/x.php'`
    static ref DIR_ANCHORED: Regex = Regex::new(
        r#"(?i)^(?:__DIR__|dirname\s*\(\s*__FILE__\s*\)|(?P<parent>dirname\s*\(\s*__DIR__\s*\)))\s*\.\s*(?:'(?P<single>[^']+)'|"(?P<double>[^"$]+)")$"#
    )
    .unwrap();
}

/// What an include statement points at, as far as it can be known statically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeTarget {
    /// A plain quoted path, resolved against the includer's directory, then the root.
    Literal(String),
    /// A path anchored on the includer's own directory, `levels` parents up.
    DirRelative { levels: usize, suffix: String },
    /// Variables, concatenations or calls. Present, but never resolved.
    Dynamic(String),
}

/// Yields the target of every include-like statement in `content`.
///
/// Comments are blanked out first, so commented-out includes are ignored
/// while code sharing a line with a comment is still scanned.
pub fn extract_includes(content: &str) -> impl Iterator<Item = IncludeTarget> {
    let code = strip_comments(content);
    let targets: Vec<IncludeTarget> = code
        .lines()
        .flat_map(|line| {
            INCLUDE_STATEMENT
                .captures_iter(line)
                .filter_map(|caps| caps.name("arg"))
                .map(|arg| classify_argument(arg.as_str()))
        })
        .collect();
    targets.into_iter()
}

/// Classifies the argument expression of a single include statement.
pub fn classify_argument(arg: &str) -> IncludeTarget {
    let arg = arg.trim();

    if let Some(caps) = SINGLE_QUOTED.captures(arg) {
        return IncludeTarget::Literal(caps["path"].to_string());
    }

    if let Some(caps) = DOUBLE_QUOTED.captures(arg) {
        let path = &caps["path"];
        // "$base/lib.php" and "{$dir}/x.php" are interpolated at runtime
        if !path.contains('$') {
            return IncludeTarget::Literal(path.to_string());
        }
    }

    if let Some(caps) = DIR_ANCHORED.captures(arg) {
        let levels = usize::from(caps.name("parent").is_some());
        let suffix = caps
            .name("single")
            .or_else(|| caps.name("double"))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        return IncludeTarget::DirRelative { levels, suffix };
    }

    IncludeTarget::Dynamic(arg.to_string())
}

/// Replaces comments with whitespace, keeping line breaks.
///
/// Block comments may span lines; `//` and `#` comments run to the end of the
/// line or to a closing `?>`. `#[` opens an attribute, not a comment. Quote
/// state is tracked per line so `'http://x'` is not mistaken for a comment.
fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_block = false;

    for line in content.lines() {
        let mut chars = line.chars().peekable();
        let mut quote: Option<char> = None;

        while let Some(c) = chars.next() {
            if in_block {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    in_block = false;
                }
                continue;
            }

            if let Some(open) = quote {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == open {
                    quote = None;
                }
                continue;
            }

            match c {
                '\'' | '"' => {
                    quote = Some(c);
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    in_block = true;
                    out.push(' ');
                }
                '/' if chars.peek() == Some(&'/') => skip_line_comment(&mut chars, &mut out),
                '#' if chars.peek() != Some(&'[') => skip_line_comment(&mut chars, &mut out),
                _ => out.push(c),
            }
        }
        out.push('\n');
    }
    out
}

fn skip_line_comment(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        if c == '?' && chars.peek() == Some(&'>') {
            chars.next();
            out.push_str(" ?>");
            return;
        }
    }
}
