//! The Cargo configuration record that base, build-type and flavor entries
//! share.
//!
//! Every field is optional. `None` means "not set here, inherit from the layer
//! below"; a present-but-empty list is a real value and overrides. The one
//! exception is [`api_levels`](CargoConfig::api_levels), which merges key by
//! key, so an empty map simply contributes nothing.
//!
//! The `exec` hook is generic over `H`. The crate never inspects or calls it:
//! it is cloned and carried through merges so the caller gets back whatever
//! hook the winning layer registered. Use `()` when no hook is needed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Features;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CargoConfig<H = ()> {
    /// Path to the Cargo project, relative to the Android module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Name of the library produced by the Cargo project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub libname: Option<String>,

    /// Android targets to build for (`arm`, `arm64`, `x86`, `x86_64`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prebuilt_toolchains: Option<bool>,

    /// Cargo profile, `debug` or `release`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Cargo target directory, relative to the Cargo project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_directory: Option<String>,

    /// Glob patterns selecting which built artifacts are copied out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_includes: Option<Vec<String>>,

    /// Android API level used for every target without its own entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_level: Option<u32>,

    /// Per-target API levels, keyed by target name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub api_levels: BTreeMap<String, u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_cargo_build_arguments: Option<Vec<String>>,

    /// Caller-supplied hook run around the Cargo invocation.
    #[serde(skip)]
    pub exec: Option<H>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
}

impl<H> Default for CargoConfig<H> {
    fn default() -> Self {
        Self {
            module: None,
            libname: None,
            targets: None,
            prebuilt_toolchains: None,
            profile: None,
            verbose: None,
            target_directory: None,
            target_includes: None,
            api_level: None,
            api_levels: BTreeMap::new(),
            extra_cargo_build_arguments: None,
            exec: None,
            features: None,
        }
    }
}

impl<H> fmt::Debug for CargoConfig<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CargoConfig")
            .field("module", &self.module)
            .field("libname", &self.libname)
            .field("targets", &self.targets)
            .field("prebuilt_toolchains", &self.prebuilt_toolchains)
            .field("profile", &self.profile)
            .field("verbose", &self.verbose)
            .field("target_directory", &self.target_directory)
            .field("target_includes", &self.target_includes)
            .field("api_level", &self.api_level)
            .field("api_levels", &self.api_levels)
            .field("extra_cargo_build_arguments", &self.extra_cargo_build_arguments)
            .field("exec", &self.exec.as_ref().map(|_| "<hook>"))
            .field("features", &self.features)
            .finish()
    }
}

impl<H> CargoConfig<H> {
    /// Build with every optional feature enabled.
    pub fn all_features(&mut self) {
        self.features = Some(Features::All);
    }

    /// Build with the default features plus `extra`.
    pub fn default_features_and<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(Features::DefaultAnd(
            extra.into_iter().map(Into::into).collect(),
        ));
    }

    /// Build with default features disabled and only `only` enabled.
    pub fn no_default_features_but<I, S>(&mut self, only: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(Features::NoDefaultBut(
            only.into_iter().map(Into::into).collect(),
        ));
    }

    /// API level for `target`: its own entry if present, else `api_level`.
    pub fn api_level_for(&self, target: &str) -> Option<u32> {
        self.api_levels.get(target).copied().or(self.api_level)
    }

    /// Cargo feature flags for this configuration (empty when unset).
    pub fn feature_args(&self) -> Vec<String> {
        self.features
            .as_ref()
            .map(Features::cargo_args)
            .unwrap_or_default()
    }
}
