// pathscrub-core/src/pattern.rs
//! pattern.rs - Compilation and matching of placeholder path patterns.
//!
//! A pattern such as `/orders/{secret}/order` is compiled once into an
//! alternating sequence of literal and wildcard tokens. Matching is a single
//! forward scan over the input path that only allocates when the output has
//! to carry an unmatched suffix:
//!
//! * no match: the input is handed back as-is,
//! * full match: the precomputed substitute is handed back,
//! * partial match: the substitute is joined with the remaining suffix.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::fmt;

/// Separator between path segments.
pub const SEGMENT_SEPARATOR: char = '/';

/// A single compiled element of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathToken {
    /// Text that must appear verbatim, separators included.
    Literal(String),
    /// A placeholder segment, redacted on output.
    Wildcard,
}

/// Outcome of testing a path against a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatch {
    /// A literal token did not line up with the path.
    NoMatch,
    /// The pattern accounted for the whole path.
    Full,
    /// The pattern matched a prefix; the path continues at `suffix_start`.
    Partial { suffix_start: usize },
}

impl PathMatch {
    pub fn is_match(&self) -> bool {
        !matches!(self, PathMatch::NoMatch)
    }
}

/// A compiled, immutable path pattern.
///
/// Compilation never fails. Segments that merely look like placeholders
/// (an unbalanced `{` or `}`) are kept as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    expression: String,
    replacement: String,
    tokens: Vec<PathToken>,
    substitute: String,
}

impl PathPattern {
    /// Compiles `expression` into tokens and precomputes the output of a full match.
    pub fn compile(replacement: impl Into<String>, expression: impl Into<String>) -> Self {
        let replacement = replacement.into();
        let expression = expression.into();
        let tokens = tokenize(&expression);

        let substitute = tokens
            .iter()
            .map(|token| match token {
                PathToken::Literal(text) => text.as_str(),
                PathToken::Wildcard => replacement.as_str(),
            })
            .collect::<String>();

        Self {
            expression,
            replacement,
            tokens,
            substitute,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    /// The exact output produced when the pattern consumes the whole path.
    pub fn substitute(&self) -> &str {
        &self.substitute
    }

    pub fn has_placeholders(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, PathToken::Wildcard))
    }

    /// Scans `path` against the compiled tokens without building any output.
    pub fn match_path(&self, path: &str) -> PathMatch {
        let mut pos = 0usize;
        let last = self.tokens.len().saturating_sub(1);

        for (index, token) in self.tokens.iter().enumerate() {
            match token {
                PathToken::Literal(text) => {
                    // Region comparison at the cursor, never a search.
                    if !path[pos..].starts_with(text.as_str()) {
                        return PathMatch::NoMatch;
                    }
                    pos += text.len();
                }
                PathToken::Wildcard => match path[pos..].find(SEGMENT_SEPARATOR) {
                    // The slash stays in place for the literal that follows.
                    Some(offset) if index < last => pos += offset,
                    // A trailing wildcard, or no separator left: swallow the rest.
                    _ => {
                        pos = path.len();
                        break;
                    }
                },
            }
        }

        if pos == path.len() {
            PathMatch::Full
        } else {
            PathMatch::Partial { suffix_start: pos }
        }
    }

    /// Redacts the placeholder regions of `path`.
    pub fn filter<'a>(&'a self, path: &'a str) -> Cow<'a, str> {
        self.render(path, self.match_path(path))
    }

    /// Builds the output for a `PathMatch` previously obtained from
    /// [`match_path`](Self::match_path) on the same `path`.
    pub fn render<'a>(&'a self, path: &'a str, outcome: PathMatch) -> Cow<'a, str> {
        match outcome {
            PathMatch::NoMatch => Cow::Borrowed(path),
            PathMatch::Full => Cow::Borrowed(&self.substitute),
            PathMatch::Partial { suffix_start } if self.substitute.is_empty() => {
                Cow::Borrowed(&path[suffix_start..])
            }
            PathMatch::Partial { suffix_start } => {
                let suffix = &path[suffix_start..];
                let mut out = String::with_capacity(self.substitute.len() + suffix.len());
                out.push_str(&self.substitute);
                out.push_str(suffix);
                Cow::Owned(out)
            }
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Splits on the separator and drops trailing empty parts, so `/a/` and `/a`
/// compile alike and `/` compiles to nothing.
fn split_segments(expression: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = expression.split(SEGMENT_SEPARATOR).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

fn is_placeholder(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Merges runs of literal segments, separators included, into single tokens.
fn tokenize(expression: &str) -> Vec<PathToken> {
    let parts = split_segments(expression);
    let mut tokens = Vec::new();
    let mut literal = String::new();

    for (i, part) in parts.iter().enumerate() {
        if is_placeholder(part) {
            if !literal.is_empty() {
                tokens.push(PathToken::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(PathToken::Wildcard);
        } else {
            literal.push_str(part);
        }
        if i + 1 < parts.len() {
            literal.push(SEGMENT_SEPARATOR);
        }
    }
    if !literal.is_empty() {
        tokens.push(PathToken::Literal(literal));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> PathToken {
        PathToken::Literal(s.to_string())
    }

    #[test]
    fn test_compile_merges_literal_runs() {
        let pattern = PathPattern::compile("XXX", "/myApp/orders/{secret}/order");
        assert_eq!(
            pattern.tokens(),
            &[lit("/myApp/orders/"), PathToken::Wildcard, lit("/order")]
        );
        assert_eq!(pattern.substitute(), "/myApp/orders/XXX/order");
    }

    #[test]
    fn test_compile_placeholder_only() {
        let pattern = PathPattern::compile("XXX", "{id}");
        assert_eq!(pattern.tokens(), &[PathToken::Wildcard]);
        assert_eq!(pattern.substitute(), "XXX");
    }

    #[test]
    fn test_compile_separated_placeholders_keep_slash_literal() {
        let pattern = PathPattern::compile("XXX", "/a/{x}/{y}/b");
        assert_eq!(
            pattern.tokens(),
            &[lit("/a/"), PathToken::Wildcard, lit("/"), PathToken::Wildcard, lit("/b")]
        );
    }

    #[test]
    fn test_compile_without_placeholders() {
        let pattern = PathPattern::compile("XXX", "/health/live");
        assert_eq!(pattern.tokens(), &[lit("/health/live")]);
        assert!(!pattern.has_placeholders());
    }

    #[test]
    fn test_compile_empty_and_root_patterns() {
        assert!(PathPattern::compile("XXX", "").tokens().is_empty());
        assert!(PathPattern::compile("XXX", "/").tokens().is_empty());
        assert_eq!(PathPattern::compile("XXX", "").substitute(), "");
    }

    #[test]
    fn test_compile_drops_trailing_separators() {
        let with_slash = PathPattern::compile("XXX", "/orders/{id}/");
        let without = PathPattern::compile("XXX", "/orders/{id}");
        assert_eq!(with_slash.tokens(), without.tokens());
    }

    #[test]
    fn test_compile_keeps_inner_empty_segments() {
        let pattern = PathPattern::compile("XXX", "//a//{b}");
        assert_eq!(pattern.tokens(), &[lit("//a//"), PathToken::Wildcard]);
    }

    #[test]
    fn test_malformed_braces_are_literal() {
        let pattern = PathPattern::compile("XXX", "/a/{b/c}/d");
        assert_eq!(pattern.tokens(), &[lit("/a/{b/c}/d")]);
        assert_eq!(pattern.filter("/a/{b/c}/d"), "/a/{b/c}/d");
    }

    #[test]
    fn test_empty_braces_are_a_placeholder() {
        let pattern = PathPattern::compile("XXX", "/a/{}");
        assert_eq!(pattern.tokens(), &[lit("/a/"), PathToken::Wildcard]);
    }

    #[test]
    fn test_match_outcomes() {
        let pattern = PathPattern::compile("XXX", "/orders/{secret}/order");
        assert_eq!(pattern.match_path("/customers/42"), PathMatch::NoMatch);
        assert_eq!(pattern.match_path("/orders/42/order"), PathMatch::Full);
        assert_eq!(
            pattern.match_path("/orders/42/order/items"),
            PathMatch::Partial { suffix_start: 16 }
        );
    }

    #[test]
    fn test_literal_longer_than_remaining_path() {
        let pattern = PathPattern::compile("XXX", "/orders/{secret}/order");
        assert_eq!(pattern.match_path("/orders/42/ord"), PathMatch::NoMatch);
        assert_eq!(pattern.match_path("/ord"), PathMatch::NoMatch);
    }

    #[test]
    fn test_wildcard_without_separator_swallows_remaining_tokens() {
        let pattern = PathPattern::compile("XXX", "/orders/{secret}/order");
        assert_eq!(pattern.filter("/orders/42"), "/orders/XXX/order");
    }

    #[test]
    fn test_wildcard_may_be_empty() {
        let pattern = PathPattern::compile("XXX", "/orders/{secret}/order");
        assert_eq!(pattern.filter("/orders//order"), "/orders/XXX/order");
    }

    #[test]
    fn test_no_match_borrows_input() {
        let pattern = PathPattern::compile("XXX", "/orders/{secret}/order");
        let path = String::from("/customers/42");
        let filtered = pattern.filter(&path);
        match filtered {
            Cow::Borrowed(out) => assert!(std::ptr::eq(out, path.as_str())),
            Cow::Owned(_) => panic!("a non-matching path must not be copied"),
        }
    }

    #[test]
    fn test_full_match_borrows_substitute() {
        let pattern = PathPattern::compile("XXX", "/orders/{secret}/order");
        match pattern.filter("/orders/42/order") {
            Cow::Borrowed(out) => assert!(std::ptr::eq(out, pattern.substitute())),
            Cow::Owned(_) => panic!("a full match must reuse the substitute"),
        }
    }

    #[test]
    fn test_partial_match_allocates_once() {
        let pattern = PathPattern::compile("XXX", "/orders/{secret}/order");
        let filtered = pattern.filter("/orders/42/order/extra/stuff");
        assert!(matches!(filtered, Cow::Owned(_)));
        assert_eq!(filtered, "/orders/XXX/order/extra/stuff");
    }

    #[test]
    fn test_empty_pattern_borrows_input() {
        let pattern = PathPattern::compile("XXX", "");
        let filtered = pattern.filter("/anything/here");
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert_eq!(filtered, "/anything/here");
        assert_eq!(pattern.filter(""), "");
    }

    #[test]
    fn test_display_shows_expression() {
        let pattern = PathPattern::compile("XXX", "/orders/{secret}");
        assert_eq!(pattern.to_string(), "/orders/{secret}");
    }
}
