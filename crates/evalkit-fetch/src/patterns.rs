//! Allow/ignore glob filtering of remote paths.
//!
//! Patterns are shell-style globs matched against the whole `/`-separated
//! remote path, with `fnmatch` rules: `*` and `?` may cross directory
//! separators, `[...]` is the only special bracket syntax, and braces and
//! backslashes match themselves. A pattern ending in `/` selects everything
//! below that directory.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{FetchError, FetchResult};

/// Compiled allow and ignore pattern sets.
#[derive(Debug, Clone)]
pub struct PathFilter {
    allow: GlobSet,
    ignore: GlobSet,
}

impl PathFilter {
    /// Compile the given patterns.
    ///
    /// Fails on the first pattern that is not a valid glob.
    pub fn new<A, I>(allow: A, ignore: I) -> FetchResult<Self>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(Self {
            allow: compile(allow)?,
            ignore: compile(ignore)?,
        })
    }

    /// True when `path` matches an allow pattern and no ignore pattern.
    pub fn is_selected(&self, path: &str) -> bool {
        self.allow.is_match(path) && !self.ignore.is_match(path)
    }
}

fn compile<P>(patterns: P) -> FetchResult<GlobSet>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let raw = pattern.as_ref();
        let mut translated = translate(raw);
        if raw.ends_with('/') {
            translated.push('*');
        }
        let glob = GlobBuilder::new(&translated)
            .literal_separator(false)
            .backslash_escape(false)
            .build()
            .map_err(|source| FetchError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| FetchError::InvalidPattern {
        pattern: "<set>".to_string(),
        source,
    })
}

/// Rewrite an `fnmatch` pattern into globset syntax with the same meaning.
///
/// Braces become one-character classes, runs of `*` collapse to one, a `[`
/// without a closing `]` is literal, and a leading `^` in a class is moved
/// so it stays literal.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i + 1..end]);
                    i = end;
                }
                None => out.push_str("[[]"),
            },
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `start`.
///
/// A `]` right after `[` or `[!` belongs to the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut from = start + 1;
    if chars.get(from) == Some(&'!') {
        from += 1;
    }
    if chars.get(from) == Some(&']') {
        from += 1;
    }
    chars
        .get(from..)?
        .iter()
        .position(|&c| c == ']')
        .map(|offset| from + offset)
}

fn push_class(out: &mut String, body: &[char]) {
    match body {
        ['^'] => out.push('^'),
        ['^', rest @ ..] => {
            out.push('[');
            out.extend(rest);
            out.push_str("^]");
        }
        _ => {
            out.push('[');
            out.extend(body);
            out.push(']');
        }
    }
}
