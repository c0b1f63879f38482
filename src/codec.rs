//! Value-level escaping for comma-delimited rows.
//!
//! Row values may contain literal commas, which would otherwise collide with
//! the column separator. The codec keeps the wire form unambiguous:
//!
//! - [`escape`] doubles backslashes and writes `\,` for each literal comma
//! - [`unescape`] strips one level of backslash escaping
//! - [`split_escaped`] finds column boundaries at unescaped commas only
//!
//! `unescape(escape(s)) == s` holds for every string `s`.
//!
//! ## Examples
//!
//! ```rust
//! use toon_records::codec::{escape, split_escaped, unescape};
//!
//! assert_eq!(escape("Alice,Wonderland"), "Alice\\,Wonderland");
//! assert_eq!(unescape("Alice\\,Wonderland"), "Alice,Wonderland");
//! assert_eq!(split_escaped("1,Alice\\,Wonderland,admin").len(), 3);
//! ```

/// Escapes a scalar's textual form for embedding in a comma-delimited row.
///
/// Backslashes are doubled before commas are escaped so that [`unescape`] is
/// an exact inverse for arbitrary input.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            _ => out.push(ch),
        }
    }
    out
}

/// Strips one level of backslash escaping from a row token.
///
/// A backslash always consumes the character that follows it, so `\x` yields
/// `x` for any `x`, not only commas. A dangling trailing backslash is dropped.
#[must_use]
pub fn unescape(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Splits a data line into raw tokens at unescaped commas.
///
/// Escape sequences are left intact in the returned slices; callers unescape
/// each token separately via [`unescape`].
#[must_use]
pub fn split_escaped(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, ch) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == ',' {
            tokens.push(&line[start..i]);
            start = i + 1;
        }
    }

    tokens.push(&line[start..]);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_replaces_commas() {
        assert_eq!(escape("a,b"), "a\\,b");
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn escape_doubles_backslashes() {
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("\\,"), "\\\\\\,");
    }

    #[test]
    fn unescape_inverts_escape() {
        for s in ["", "plain", "a,b", "a\\b", "\\,", ",,,", "trailing\\"] {
            assert_eq!(unescape(&escape(s)), s);
        }
    }

    #[test]
    fn unescape_consumes_any_escaped_char() {
        assert_eq!(unescape("\\x"), "x");
        assert_eq!(unescape("a\\"), "a");
    }

    #[test]
    fn split_honors_escaped_commas() {
        assert_eq!(split_escaped("1,Alice\\,W,admin"), vec!["1", "Alice\\,W", "admin"]);
        assert_eq!(split_escaped("a,,c"), vec!["a", "", "c"]);
        assert_eq!(split_escaped(""), vec![""]);
    }
}
