//! Small value types shared across the crate.
//!
//! - [`Features`] selects which Cargo features a build enables. It is a single
//!   selector: choosing a new variant discards the old one, and merging
//!   replaces it wholesale.
//! - [`Variant`] names one Android build variant the way the host project
//!   model describes it: a build type plus the product flavors, one per flavor
//!   dimension, in the host's declared dimension order.
//! - [`Action`] is an operation request, independent of any CLI framework.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Which Cargo features to build with.
///
/// In a declaration file this is written as `features = "all"`,
/// `features = { default_and = ["foo"] }` or
/// `features = { no_default_but = ["foo"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Features {
    /// Every optional feature enabled.
    All,
    /// The default feature set plus these extra features.
    DefaultAnd(BTreeSet<String>),
    /// Default features disabled; only these features enabled.
    NoDefaultBut(BTreeSet<String>),
}

impl Features {
    /// Render the selector as `cargo build` flags.
    pub fn cargo_args(&self) -> Vec<String> {
        match self {
            Features::All => vec!["--all-features".to_string()],
            Features::DefaultAnd(set) => feature_list_args(set),
            Features::NoDefaultBut(set) => {
                let mut args = vec!["--no-default-features".to_string()];
                args.extend(feature_list_args(set));
                args
            }
        }
    }
}

fn feature_list_args(set: &BTreeSet<String>) -> Vec<String> {
    if set.is_empty() {
        return vec![];
    }
    let joined = set.iter().map(String::as_str).collect::<Vec<_>>().join(",");
    vec!["--features".to_string(), joined]
}

/// One Android build variant as supplied by the host project model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub build_type: String,
    /// Flavor names in declared dimension order (first dimension first).
    pub product_flavors: Vec<String>,
}

impl Variant {
    pub fn new<I, S>(build_type: &str, product_flavors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            build_type: build_type.to_string(),
            product_flavors: product_flavors.into_iter().map(Into::into).collect(),
        }
    }

    /// The conventional camel-cased variant name, e.g. `demoFreeDebug`.
    pub fn name(&self) -> String {
        let mut name = String::new();
        for part in self
            .product_flavors
            .iter()
            .chain(std::iter::once(&self.build_type))
        {
            if name.is_empty() {
                name.push_str(part);
            } else {
                name.push_str(&capitalize(part));
            }
        }
        name
    }
}

/// An operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Resolve and print the configuration for one variant.
    Resolve { variant: Variant },
    /// Print the resolved tool settings.
    Settings,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
