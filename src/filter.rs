//! File dialog filters
//!
//! A filter string is a `|`-separated list of description/pattern pairs,
//! e.g. `"Text Files (*.txt)|*.txt|All Files (*.*)|*.*"`. A pattern list may
//! hold several wildcards separated by `;`.

use crate::error::Error;

/// One description/pattern pair from a filter string
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFilter {
    pub description: String,
    pub patterns: Vec<String>,
}

impl FileFilter {
    /// Check if a file name matches any of this filter's patterns
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| wildcard_match(p, name))
    }
}

/// Parse a filter string into its description/pattern pairs
pub fn parse_filter(filter: &str) -> Result<Vec<FileFilter>, Error> {
    if filter.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parts: Vec<&str> = filter.split('|').collect();
    if parts.len() % 2 != 0 {
        return Err(Error::InvalidFilter(filter.to_string()));
    }

    let mut filters = Vec::with_capacity(parts.len() / 2);
    for pair in parts.chunks(2) {
        let patterns: Vec<String> = pair[1]
            .split(';')
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect();
        if patterns.is_empty() {
            return Err(Error::InvalidFilter(filter.to_string()));
        }
        filters.push(FileFilter {
            description: pair[0].trim().to_string(),
            patterns,
        });
    }
    Ok(filters)
}

/// Match a file name against a `*` / `?` wildcard pattern (ASCII case-insensitive).
///
/// `*.*` matches every name, including names without a dot.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    if pattern == "*.*" || pattern == "*" {
        return true;
    }

    let pat: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let text: Vec<char> = name.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (mut p, mut t) = (0, 0);
    let mut star: Option<usize> = None;
    let mut star_t = 0;

    while t < text.len() {
        if p < pat.len() && (pat[p] == '?' || pat[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pat.len() && pat[p] == '*' {
            star = Some(p);
            star_t = t;
            p += 1;
        } else if let Some(s) = star {
            p = s + 1;
            star_t += 1;
            t = star_t;
        } else {
            return false;
        }
    }

    while p < pat.len() && pat[p] == '*' {
        p += 1;
    }
    p == pat.len()
}
