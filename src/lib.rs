//! Per-variant Cargo configuration for Android NDK builds.
//!
//! An Android app that ships native Rust code builds it once per build
//! variant. Most of the Cargo settings are shared, but some differ by build
//! type (`release` wants the release profile) or by product flavor (a `demo`
//! flavor enables a `demo` feature, an `x86only` flavor trims the targets).
//! ndkfig resolves the Cargo configuration for one variant from a base
//! configuration and two registries of sparse overrides.
//!
//! ```ignore
//! let extension: CargoExtension = ndkfig::load_extension(Path::new("ndkfig.toml"), true)?;
//! let config = extension.config_for(&Variant::new("release", ["demo", "free"]));
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Base configuration    top-level keys
//!        ↑ overridden by
//! Build type entry      [build_types.<name>]
//!        ↑ overridden by
//! Flavor entries        [product_flavors.<name>], last dimension first,
//!                       first declared dimension applied last
//! ```
//!
//! Every layer is **sparse**. A field left unset inherits from the layer
//! below; a field that is set, even to an empty list or `false`, overrides.
//! Two fields are special:
//!
//! - **`api_levels`** merges key by key. An override's entries replace the
//!   same targets below and leave other targets alone.
//! - **`features`** is a single selector ([`Features`]) and is replaced whole.
//!
//! A build type or flavor without a registered entry is skipped. Most variants
//! customize only some of their dimensions.
//!
//! # The `exec` hook
//!
//! [`CargoConfig`] is generic over the type of its `exec` hook. ndkfig never
//! calls the hook; it only clones it and carries it through merges, so the
//! caller picks any shape that suits its process runner:
//!
//! ```ignore
//! type Hook = Arc<dyn Fn(&mut std::process::Command) + Send + Sync>;
//! let extension: CargoExtension<Hook> = ndkfig::load_extension(path, true)?;
//! ```
//!
//! # Tool settings
//!
//! The Cargo, rustc and Python commands, the rustup channel and the shared NDK
//! toolchain directory are resolved from, in order:
//!
//! 1. a non-empty command declared in the declaration file ([`ToolCommands`])
//! 2. `local.properties` in the project directory (`rust.cargoCommand`, ...)
//! 3. an environment variable (`RUST_ANDROID_GRADLE_CARGO_COMMAND`, ...)
//! 4. a compiled default (`cargo`, `rustc`, `python`, or
//!    `rust-android-ndk-toolchains` under the system temp dir)
//!
//! Steps 2 and 3 are [`PropertyResolver`]; the toolchain directory starts at
//! step 2.
//!
//! Boolean flags accept `1`/`true`/`0`/`false`; any other value fails with
//! [`NdkfigError::InvalidConfiguration`].
//!
//! # Declaration files
//!
//! See the [`file`] module for the TOML layout. Strict mode, on by default,
//! rejects keys that no section understands with the file path and line
//! number.

pub mod error;
pub mod file;
pub mod types;

#[cfg(feature = "clap")]
mod cli;
mod config;
mod extension;
mod local;
mod merge;
mod ops;
mod property;
mod resolve;
mod settings;
mod validate;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::{Cli, Command};
pub use config::CargoConfig;
pub use error::NdkfigError;
pub use extension::CargoExtension;
pub use file::{DEFAULT_FILE_NAME, load_extension, parse_extension};
pub use local::{LOCAL_PROPERTIES, LocalProperties};
pub use ops::{ConfigResult, OutputFormat, RunOptions, handle, resolve_variant, show_settings};
pub use property::{DEFAULT_TOOLCHAIN_SUBDIR, PropertyResolver};
pub use resolve::resolve_for_variant;
pub use settings::{ToolCommands, ToolSettings};
pub use types::{Action, Features, Variant};
