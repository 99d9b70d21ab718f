//! Strict-mode validation: detect unknown keys in a declaration file.
//!
//! Each section (the base table and every build-type and flavor entry) is
//! deserialized into `CargoConfig` through `serde_ignored`, which reports any
//! key the struct doesn't consume. Unknown keys are reported with the file path
//! and a best-effort line number. A section whose known keys have the wrong
//! type fails with [`NdkfigError::InvalidValue`] naming the section, as it does
//! in lenient mode.

use std::path::Path;

use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::config::CargoConfig;
use crate::error::NdkfigError;
use crate::file::{self, BUILD_TYPES, PRODUCT_FLAVORS};
use crate::settings::ToolCommands;

/// Validate that a parsed declaration contains only known keys.
///
/// `content` is the raw file text, used to locate line numbers.
pub fn validate_unknown_keys(table: &Table, content: &str, path: &Path) -> Result<(), NdkfigError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let mut base = table.clone();
    let registries: Vec<(&str, Option<Value>)> = [BUILD_TYPES, PRODUCT_FLAVORS]
        .into_iter()
        .map(|section| (section, base.remove(section)))
        .collect();

    let commands = file::split_commands(&mut base);
    collect_unknown::<ToolCommands>(Value::Table(commands), "", "<commands>", &mut unknown_keys)?;
    collect_unknown::<CargoConfig>(Value::Table(base), "", "<base>", &mut unknown_keys)?;

    for (section, value) in registries {
        match value {
            Some(Value::Table(entries)) => {
                for (name, entry) in entries {
                    let prefix = format!("{section}.{name}");
                    collect_unknown::<CargoConfig>(entry, &prefix, &prefix, &mut unknown_keys)?;
                }
            }
            Some(_) => {
                return Err(NdkfigError::InvalidValue {
                    key: section.into(),
                    reason: "expected a table of named entries".into(),
                });
            }
            None => {}
        }
    }

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<NdkfigError> = unknown_keys
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            NdkfigError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(NdkfigError::UnknownKeys(errors))
}

/// Deserialize one section as `T`, recording ignored keys under `prefix`.
/// Type errors are reported against `label`.
fn collect_unknown<T: DeserializeOwned>(
    section: Value,
    prefix: &str,
    label: &str,
    unknown_keys: &mut Vec<String>,
) -> Result<(), NdkfigError> {
    let _section: T = serde_ignored::deserialize(section, |ignored_path| {
        let key = ignored_path.to_string();
        if prefix.is_empty() {
            unknown_keys.push(key);
        } else {
            unknown_keys.push(format!("{prefix}.{key}"));
        }
    })
    .map_err(|e: toml::de::Error| NdkfigError::InvalidValue {
        key: label.into(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Line (1-indexed) where an unknown key is assigned, or 0 if not found.
///
/// Top-level keys are searched before the first table header. Keys under
/// `build_types.<name>` or `product_flavors.<name>` are searched only below
/// the matching `[build_types.<name>]` header. Quoted keys and keys inside
/// inline tables are not located.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let leaf = segments.last().unwrap_or(&dotted_key);
    let expected_section = &segments[..segments.len() - 1];

    let mut current_section: Vec<String> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && !trimmed.starts_with("[[") {
            let header = trimmed.trim_start_matches('[').trim_end_matches(']').trim();
            current_section = header.split('.').map(|s| s.trim().to_string()).collect();
            continue;
        }

        let in_right_section = expected_section.len() == current_section.len()
            && expected_section
                .iter()
                .zip(&current_section)
                .all(|(a, b)| *a == b);

        if in_right_section
            && let Some(after_key) = trimmed.strip_prefix(leaf)
            && after_key.trim_start().starts_with('=')
        {
            return i + 1;
        }
    }

    0
}
