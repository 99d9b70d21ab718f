//! Property lookup with a fixed precedence.
//!
//! ```text
//! Built-in default      get_or(.., default)
//!        ↑ overridden by
//! Environment variable  e.g. RUST_ANDROID_GRADLE_CARGO_COMMAND
//!        ↑ overridden by
//! local.properties      e.g. rust.cargoCommand
//! ```
//!
//! The local store is read lazily on the first lookup and kept for the life of
//! the resolver; it is never reloaded. Environment variables are read on every
//! lookup. A set variable whose value is not valid Unicode is an error, not a
//! miss.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::NdkfigError;
use crate::local::{LOCAL_PROPERTIES, LocalProperties};

pub const CARGO_COMMAND: (&str, &str) = ("rust.cargoCommand", "RUST_ANDROID_GRADLE_CARGO_COMMAND");
pub const RUSTUP_CHANNEL: (&str, &str) =
    ("rust.rustupChannel", "RUST_ANDROID_GRADLE_RUSTUP_CHANNEL");
pub const PYTHON_COMMAND: (&str, &str) =
    ("rust.pythonCommand", "RUST_ANDROID_GRADLE_PYTHON_COMMAND");
pub const RUSTC_COMMAND: (&str, &str) = ("rust.rustcCommand", "RUST_ANDROID_GRADLE_RUSTC_COMMAND");
pub const PREBUILT_TOOLCHAINS: (&str, &str) = (
    "rust.prebuiltToolchains",
    "RUST_ANDROID_GRADLE_PREBUILT_TOOLCHAINS",
);
pub const TOOLCHAIN_DIRECTORY: (&str, &str) =
    ("rust.androidNdkToolchainDir", "ANDROID_NDK_TOOLCHAIN_DIR");

/// Subdirectory of the system temp dir used when no toolchain dir is configured.
pub const DEFAULT_TOOLCHAIN_SUBDIR: &str = "rust-android-ndk-toolchains";

/// Where environment lookups go.
#[derive(Debug, Clone)]
enum EnvSource {
    Process,
    Fixed(HashMap<String, OsString>),
}

impl EnvSource {
    fn var(&self, name: &str) -> Result<Option<String>, NdkfigError> {
        let raw = match self {
            EnvSource::Process => std::env::var_os(name),
            EnvSource::Fixed(vars) => vars.get(name).cloned(),
        };
        raw.map(|value| {
            value.into_string().map_err(|value| NdkfigError::InvalidValue {
                key: name.to_string(),
                reason: format!("not valid Unicode: {value:?}"),
            })
        })
        .transpose()
    }
}

/// Resolves named settings from `local.properties`, then the environment.
#[derive(Debug)]
pub struct PropertyResolver {
    local_path: Option<PathBuf>,
    local: OnceLock<LocalProperties>,
    env: EnvSource,
}

impl PropertyResolver {
    /// Read `local.properties` from `project_dir` (on first use) and the
    /// process environment.
    pub fn for_project(project_dir: &Path) -> Self {
        Self {
            local_path: Some(project_dir.join(LOCAL_PROPERTIES)),
            local: OnceLock::new(),
            env: EnvSource::Process,
        }
    }

    /// Use pre-loaded data instead of the filesystem and process environment.
    ///
    /// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
    pub fn from_parts<K, V>(
        local: LocalProperties,
        env_vars: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<OsString>,
    {
        Self {
            local_path: None,
            local: OnceLock::from(local),
            env: EnvSource::Fixed(
                env_vars
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn local(&self) -> &LocalProperties {
        self.local.get_or_init(|| {
            let Some(path) = &self.local_path else {
                return LocalProperties::default();
            };
            match LocalProperties::load(path) {
                Ok(props) => {
                    debug!(path = %path.display(), entries = props.len(), "loaded local properties");
                    props
                }
                Err(e) => {
                    warn!("ignoring unreadable local properties: {e}");
                    LocalProperties::default()
                }
            }
        })
    }

    /// Look up `local_key` in the local store, then `env_key` in the environment.
    pub fn get(&self, local_key: &str, env_key: &str) -> Result<Option<String>, NdkfigError> {
        if let Some(value) = self.local().get(local_key) {
            return Ok(Some(value.to_string()));
        }
        self.env.var(env_key)
    }

    /// Like [`get`](Self::get), falling back to `default` when both are unset.
    pub fn get_or(
        &self,
        local_key: &str,
        env_key: &str,
        default: &str,
    ) -> Result<String, NdkfigError> {
        Ok(self
            .get(local_key, env_key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Interpret a setting as a boolean flag.
    ///
    /// `1`/`true` and `0`/`false` are accepted; an unset or empty value yields
    /// `if_unset`. Anything else is [`NdkfigError::InvalidConfiguration`].
    pub fn get_flag(
        &self,
        local_key: &str,
        env_key: &str,
        if_unset: bool,
    ) -> Result<bool, NdkfigError> {
        match self.get(local_key, env_key)?.as_deref() {
            Some("1") | Some("true") => Ok(true),
            Some("0") | Some("false") => Ok(false),
            None | Some("") => Ok(if_unset),
            Some(other) => Err(NdkfigError::InvalidConfiguration {
                local_key: local_key.to_string(),
                env_key: env_key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Whether to use the NDK's prebuilt toolchains when the configuration
    /// leaves it unset.
    pub fn prebuilt_toolchains(&self) -> Result<bool, NdkfigError> {
        self.get_flag(PREBUILT_TOOLCHAINS.0, PREBUILT_TOOLCHAINS.1, true)
    }

    /// The shared NDK toolchain directory, as an absolute path.
    ///
    /// Prefers `rust.androidNdkToolchainDir`, then `ANDROID_NDK_TOOLCHAIN_DIR`,
    /// then `rust-android-ndk-toolchains` under the system temp dir. Nothing is
    /// created on disk.
    pub fn toolchain_directory(&self) -> Result<PathBuf, NdkfigError> {
        let dir = self
            .get(TOOLCHAIN_DIRECTORY.0, TOOLCHAIN_DIRECTORY.1)?
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_TOOLCHAIN_SUBDIR));
        Ok(absolute(dir))
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}
