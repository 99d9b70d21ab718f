//! Tool settings: the commands and directories a Cargo invocation needs.
//!
//! A command set explicitly in the declaration file ([`ToolCommands`]) is used
//! as-is unless it is empty. Everything else goes through [`PropertyResolver`]
//! (local properties, then the environment). Whatever is still unset is filled
//! from the compiled defaults below by confique, the same way a sparse config
//! layer is completed.

use std::path::{Path, PathBuf};

use confique::Config;
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use crate::error::NdkfigError;
use crate::property::{
    CARGO_COMMAND, PYTHON_COMMAND, PropertyResolver, RUSTC_COMMAND, RUSTUP_CHANNEL,
};

/// Commands declared at the top level of the declaration file.
///
/// They belong to the extension as a whole and take no part in variant
/// resolution. An empty string counts as unset.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCommands {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rustup_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rustc_command: Option<String>,
}

impl ToolCommands {
    /// Declaration-file keys holding these commands.
    pub(crate) const KEYS: [&'static str; 4] = [
        "cargo_command",
        "rustup_channel",
        "python_command",
        "rustc_command",
    ];
}

#[derive(Config, Serialize, Debug, Clone, PartialEq)]
pub struct ToolSettings {
    /// Cargo executable.
    #[config(default = "cargo")]
    pub cargo_command: String,

    /// Rustup channel passed as `+channel`. Empty uses the default toolchain.
    #[config(default = "")]
    pub rustup_channel: String,

    /// Python interpreter used by the linker wrapper.
    #[config(default = "python")]
    pub python_command: String,

    /// Rustc executable, used to read the host triple.
    #[config(default = "rustc")]
    pub rustc_command: String,

    /// Whether prebuilt NDK toolchains are used when the configuration leaves
    /// `prebuilt_toolchains` unset.
    #[config(default = true)]
    pub prebuilt_toolchains: bool,

    /// Shared directory for generated NDK toolchains.
    pub toolchain_directory: PathBuf,
}

impl ToolSettings {
    /// Resolve every setting through `resolver`, then fill compiled defaults.
    pub fn resolve(resolver: &PropertyResolver) -> Result<Self, NdkfigError> {
        Self::resolve_with(resolver, &ToolCommands::default())
    }

    /// Like [`resolve`](Self::resolve), but non-empty `commands` win over
    /// `resolver`.
    pub fn resolve_with(
        resolver: &PropertyResolver,
        commands: &ToolCommands,
    ) -> Result<Self, NdkfigError> {
        let mut table = Table::new();
        for (field, explicit, (local_key, env_key)) in [
            ("cargo_command", &commands.cargo_command, CARGO_COMMAND),
            ("rustup_channel", &commands.rustup_channel, RUSTUP_CHANNEL),
            ("python_command", &commands.python_command, PYTHON_COMMAND),
            ("rustc_command", &commands.rustc_command, RUSTC_COMMAND),
        ] {
            let value = match explicit.as_deref() {
                Some(value) if !value.is_empty() => Some(value.to_string()),
                _ => resolver.get(local_key, env_key)?,
            };
            if let Some(value) = value {
                table.insert(field.into(), Value::String(value));
            }
        }
        table.insert(
            "prebuilt_toolchains".into(),
            Value::Boolean(resolver.prebuilt_toolchains()?),
        );
        table.insert(
            "toolchain_directory".into(),
            path_value("toolchain_directory", &resolver.toolchain_directory()?)?,
        );

        let layer: <ToolSettings as Config>::Layer =
            Value::Table(table)
                .try_into()
                .map_err(|e: toml::de::Error| NdkfigError::InvalidValue {
                    key: "<settings>".into(),
                    reason: e.to_string(),
                })?;

        ToolSettings::builder()
            .preloaded(layer)
            .load()
            .map_err(NdkfigError::from)
    }

    /// Settings as `(key, value)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(String, String)> {
        vec![
            ("cargo_command".into(), self.cargo_command.clone()),
            ("rustup_channel".into(), self.rustup_channel.clone()),
            ("python_command".into(), self.python_command.clone()),
            ("rustc_command".into(), self.rustc_command.clone()),
            (
                "prebuilt_toolchains".into(),
                self.prebuilt_toolchains.to_string(),
            ),
            (
                "toolchain_directory".into(),
                self.toolchain_directory.display().to_string(),
            ),
        ]
    }
}

fn path_value(key: &str, path: &Path) -> Result<Value, NdkfigError> {
    path.to_str()
        .map(|s| Value::String(s.to_string()))
        .ok_or_else(|| NdkfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("path is not valid Unicode: {}", path.display()),
        })
}
