//! Declaration file loading.
//!
//! A declaration file describes a [`CargoExtension`] in TOML. Top-level keys
//! form the base configuration; `[build_types.<name>]` and
//! `[product_flavors.<name>]` tables form the two registries:
//!
//! ```toml
//! module = "../rust"
//! libname = "native"
//! targets = ["arm", "arm64", "x86"]
//!
//! [api_levels]
//! arm = 16
//!
//! [build_types.release]
//! profile = "release"
//!
//! [product_flavors.demo]
//! features = { default_and = ["demo"] }
//! ```
//!
//! The top-level `cargo_command`, `rustup_channel`, `python_command` and
//! `rustc_command` keys are not part of the base configuration; they fill
//! [`CargoExtension::commands`].
//!
//! In strict mode, keys that no section understands are rejected with their
//! line number. The `exec` hook cannot be declared in a file; attach it to the
//! loaded extension programmatically.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;
use toml::{Table, Value};

use crate::config::CargoConfig;
use crate::error::NdkfigError;
use crate::extension::CargoExtension;
use crate::settings::ToolCommands;
use crate::validate;

/// Default declaration file name, looked up in the project directory.
pub const DEFAULT_FILE_NAME: &str = "ndkfig.toml";

pub(crate) const BUILD_TYPES: &str = "build_types";
pub(crate) const PRODUCT_FLAVORS: &str = "product_flavors";

/// Read and parse the declaration file at `path`.
pub fn load_extension<H: Clone>(path: &Path, strict: bool) -> Result<CargoExtension<H>, NdkfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| NdkfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let extension = parse_extension(&content, path, strict)?;
    debug!(
        path = %path.display(),
        build_types = extension.build_types.len(),
        product_flavors = extension.product_flavors.len(),
        "loaded declaration file"
    );
    Ok(extension)
}

/// Parse declaration text. `path` is only used in error messages.
pub fn parse_extension<H: Clone>(
    content: &str,
    path: &Path,
    strict: bool,
) -> Result<CargoExtension<H>, NdkfigError> {
    let mut table: Table = toml::from_str(content).map_err(|e| NdkfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if strict {
        validate::validate_unknown_keys(&table, content, path)?;
    }

    let build_types = take_registry(&mut table, BUILD_TYPES)?;
    let product_flavors = take_registry(&mut table, PRODUCT_FLAVORS)?;
    let commands: ToolCommands = Value::Table(split_commands(&mut table))
        .try_into()
        .map_err(|e: toml::de::Error| NdkfigError::InvalidValue {
            key: "<commands>".into(),
            reason: e.to_string(),
        })?;
    let base = into_config(Value::Table(table), "<base>")?;

    Ok(CargoExtension {
        base,
        build_types,
        product_flavors,
        commands,
    })
}

/// Move the top-level command keys out of `table`.
pub(crate) fn split_commands(table: &mut Table) -> Table {
    ToolCommands::KEYS
        .into_iter()
        .filter_map(|key| table.remove(key).map(|value| (key.to_string(), value)))
        .collect()
}

fn take_registry<H>(
    table: &mut Table,
    section: &str,
) -> Result<BTreeMap<String, CargoConfig<H>>, NdkfigError> {
    let entries = match table.remove(section) {
        None => return Ok(BTreeMap::new()),
        Some(Value::Table(entries)) => entries,
        Some(_) => {
            return Err(NdkfigError::InvalidValue {
                key: section.into(),
                reason: "expected a table of named entries".into(),
            });
        }
    };

    entries
        .into_iter()
        .map(|(name, entry)| {
            let key = format!("{section}.{name}");
            into_config(entry, &key).map(|config| (name, config))
        })
        .collect()
}

fn into_config<H>(value: Value, key: &str) -> Result<CargoConfig<H>, NdkfigError> {
    value
        .try_into()
        .map_err(|e: toml::de::Error| NdkfigError::InvalidValue {
            key: key.into(),
            reason: e.to_string(),
        })
}
