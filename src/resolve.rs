//! Core resolution pipeline: produce the configuration for one build variant.
//!
//! Operates on already-declared registries with no I/O. Steps:
//!
//! 1. Clone the base configuration
//! 2. Merge the build-type entry, if one is registered under that name
//! 3. Merge each flavor entry, in the priority order the caller supplies
//!    (lowest priority first, so the last merged entry wins)
//!
//! Names without a registered entry are skipped. Most variants only customize
//! some of their dimensions, so a missing entry is never an error.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::CargoConfig;

/// Resolve the configuration for a build type and an ordered flavor list.
///
/// `flavors` is in **priority-ascending** order: later names override earlier
/// ones. [`CargoExtension::config_for`](crate::CargoExtension::config_for)
/// derives this order from the host's declared dimension order.
pub fn resolve_for_variant<H, S>(
    base: &CargoConfig<H>,
    build_type: &str,
    flavors: &[S],
    build_types: &BTreeMap<String, CargoConfig<H>>,
    product_flavors: &BTreeMap<String, CargoConfig<H>>,
) -> CargoConfig<H>
where
    H: Clone,
    S: AsRef<str>,
{
    let mut resolved = base.clone();

    match build_types.get(build_type) {
        Some(entry) => {
            debug!(build_type, "merging build type override");
            resolved.merge(entry);
        }
        None => debug!(build_type, "no override registered for build type"),
    }

    for flavor in flavors {
        let flavor = flavor.as_ref();
        match product_flavors.get(flavor) {
            Some(entry) => {
                debug!(flavor, "merging product flavor override");
                resolved.merge(entry);
            }
            None => debug!(flavor, "no override registered for product flavor"),
        }
    }

    resolved
}
