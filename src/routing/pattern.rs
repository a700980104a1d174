//! Route pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a route path into an anchored, full-string regular expression
//! - Extract positional captures from a matching URI
//!
//! # Design Decisions
//! - Compiled once at registration, never on the dispatch path
//! - The path is wrapped in a non-capturing group so alternations stay anchored
//! - Matching is byte-oriented with ASCII classes: `\d`, `\w` and `\s` never
//!   match non-ASCII characters, while literal UTF-8 text in a path still does
//! - Group 0 is discarded; groups 1..n are returned left to right
//! - A group that did not participate yields an empty string, except at the
//!   tail, where non-participating groups are dropped

use regex::bytes::{Regex, RegexBuilder};

/// A compiled route path.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
}

impl PathPattern {
    pub fn compile(path: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&format!("^(?:{path})$"))
            .unicode(false)
            .build()?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, uri: &str) -> bool {
        self.regex.is_match(uri.as_bytes())
    }

    /// Positional captures if the whole URI matches.
    pub fn captures(&self, uri: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(uri.as_bytes())?;

        let mut groups: Vec<Option<&[u8]>> = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_bytes()))
            .collect();

        while matches!(groups.last(), Some(None)) {
            groups.pop();
        }

        Some(
            groups
                .into_iter()
                .map(|group| String::from_utf8_lossy(group.unwrap_or_default()).into_owned())
                .collect(),
        )
    }
}
