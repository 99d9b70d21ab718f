//! The project-local override store, `local.properties`.
//!
//! Android projects keep machine-specific settings (SDK and NDK locations,
//! tool paths) in an untracked `local.properties` file at the project root.
//! It uses Java properties syntax, which this module reads:
//!
//! - Lines starting with `#` or `!` are comments; blank lines are skipped.
//! - The key ends at the first unescaped `=`, `:` or whitespace. Whitespace
//!   around the separator is dropped; trailing whitespace in the value is kept.
//! - A line ending in an odd number of backslashes continues on the next line,
//!   whose leading whitespace is dropped.
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are decoded; any other escaped
//!   character stands for itself (`C\:\\sdk` is `C:\sdk`).
//!
//! A missing file is an empty store. Only real I/O errors are reported.

use std::collections::HashMap;
use std::path::Path;

use crate::error::NdkfigError;

/// Conventional file name of the local override store.
pub const LOCAL_PROPERTIES: &str = "local.properties";

const SEPARATOR_WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Flat string-to-string pairs read from a `local.properties` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalProperties {
    entries: HashMap<String, String>,
}

impl LocalProperties {
    /// Parse properties text. Later duplicates of a key win.
    pub fn parse(content: &str) -> Self {
        let entries = logical_lines(content)
            .iter()
            .map(|line| {
                let (key, value) = split_entry(line);
                (unescape(key), unescape(value))
            })
            .collect();
        Self { entries }
    }

    /// Read and parse `path`. A file that does not exist yields an empty store.
    pub fn load(path: &Path) -> Result<Self, NdkfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(NdkfigError::IoError {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalProperties {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Join continuation lines and drop comments and blanks.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut buf = String::new();
    let mut continuing = false;

    for raw in content.lines() {
        let trimmed = raw.trim_start_matches(SEPARATOR_WHITESPACE);
        if !continuing {
            if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                continue;
            }
            buf.clear();
        }
        buf.push_str(trimmed);
        continuing = ends_with_continuation(&buf);
        if continuing {
            buf.pop();
        } else {
            lines.push(std::mem::take(&mut buf));
        }
    }

    // A continuation on the final line just ends the entry.
    if continuing && !buf.is_empty() {
        lines.push(buf);
    }
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(SEPARATOR_WHITESPACE);
    if let Some(after) = rest.strip_prefix(['=', ':']) {
        rest = after.trim_start_matches(SEPARATOR_WHITESPACE);
    }
    (key, rest)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    // Malformed escape: keep it as written.
                    _ => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
