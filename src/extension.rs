use std::collections::BTreeMap;

use tracing::debug;

use crate::config::CargoConfig;
use crate::resolve::resolve_for_variant;
use crate::settings::ToolCommands;
use crate::types::Variant;

/// A base configuration plus the build-type and product-flavor registries.
///
/// Populate it once (programmatically or from a declaration file via
/// [`load_extension`](crate::load_extension)), then ask it for the
/// configuration of each variant with [`config_for`](Self::config_for).
///
/// `commands` apply to every variant and are never merged.
#[derive(Clone, PartialEq)]
pub struct CargoExtension<H = ()> {
    pub base: CargoConfig<H>,
    pub build_types: BTreeMap<String, CargoConfig<H>>,
    pub product_flavors: BTreeMap<String, CargoConfig<H>>,
    pub commands: ToolCommands,
}

impl<H> Default for CargoExtension<H> {
    fn default() -> Self {
        Self {
            base: CargoConfig::default(),
            build_types: BTreeMap::new(),
            product_flavors: BTreeMap::new(),
            commands: ToolCommands::default(),
        }
    }
}

impl<H> std::fmt::Debug for CargoExtension<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CargoExtension")
            .field("base", &self.base)
            .field("build_types", &self.build_types)
            .field("product_flavors", &self.product_flavors)
            .field("commands", &self.commands)
            .finish()
    }
}

impl<H: Clone> CargoExtension<H> {
    pub fn new(base: CargoConfig<H>) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    pub fn commands(mut self, commands: ToolCommands) -> Self {
        self.commands = commands;
        self
    }

    /// Register (or replace) the override for a build type.
    pub fn build_type(mut self, name: &str, config: CargoConfig<H>) -> Self {
        self.build_types.insert(name.to_string(), config);
        self
    }

    /// Register (or replace) the override for a product flavor.
    pub fn product_flavor(mut self, name: &str, config: CargoConfig<H>) -> Self {
        self.product_flavors.insert(name.to_string(), config);
        self
    }

    /// Resolve the configuration for one build variant.
    ///
    /// The variant's flavors are in declared dimension order, where the first
    /// dimension has the highest priority. They are merged in reverse so the
    /// first dimension is applied last and wins ties.
    pub fn config_for(&self, variant: &Variant) -> CargoConfig<H> {
        debug!(variant = %variant.name(), "resolving cargo configuration");
        let priority: Vec<&str> = variant
            .product_flavors
            .iter()
            .rev()
            .map(String::as_str)
            .collect();
        resolve_for_variant(
            &self.base,
            &variant.build_type,
            &priority,
            &self.build_types,
            &self.product_flavors,
        )
    }
}
