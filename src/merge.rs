use crate::config::CargoConfig;

impl<H: Clone> CargoConfig<H> {
    /// Overlay `other` on top of `self`.
    ///
    /// Each field takes `other`'s value when present and keeps `self`'s
    /// otherwise. `api_levels` is a key union where `other` wins on collision.
    /// `features` is replaced wholesale, never merged set by set.
    pub fn merge(&mut self, other: &CargoConfig<H>) {
        overlay(&mut self.module, &other.module);
        overlay(&mut self.libname, &other.libname);
        overlay(&mut self.targets, &other.targets);
        overlay(&mut self.prebuilt_toolchains, &other.prebuilt_toolchains);
        overlay(&mut self.profile, &other.profile);
        overlay(&mut self.verbose, &other.verbose);
        overlay(&mut self.target_directory, &other.target_directory);
        overlay(&mut self.target_includes, &other.target_includes);
        overlay(&mut self.api_level, &other.api_level);
        for (target, level) in &other.api_levels {
            self.api_levels.insert(target.clone(), *level);
        }
        overlay(
            &mut self.extra_cargo_build_arguments,
            &other.extra_cargo_build_arguments,
        );
        overlay(&mut self.exec, &other.exec);
        overlay(&mut self.features, &other.features);
    }
}

fn overlay<T: Clone>(base: &mut Option<T>, overlay: &Option<T>) {
    if let Some(value) = overlay {
        *base = Some(value.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use crate::fixtures::test::{Config, full_config};
    use crate::types::Features;

    fn levels(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_overlay_leaves_base_unchanged() {
        let mut base = full_config();
        let before = base.clone();
        base.merge(&Config::default());
        assert_eq!(base, before);
    }

    #[test]
    fn full_overlay_replaces_every_field() {
        let mut base = Config::default();
        let overlay = full_config();
        base.merge(&overlay);
        assert_eq!(base, overlay);
    }

    #[test]
    fn present_scalar_wins() {
        let mut base = Config {
            profile: Some("debug".into()),
            verbose: Some(true),
            ..Default::default()
        };
        base.merge(&Config {
            profile: Some("release".into()),
            ..Default::default()
        });
        assert_eq!(base.profile.as_deref(), Some("release"));
        assert_eq!(base.verbose, Some(true));
    }

    #[test]
    fn false_is_a_value_not_absence() {
        let mut base = Config {
            prebuilt_toolchains: Some(true),
            ..Default::default()
        };
        base.merge(&Config {
            prebuilt_toolchains: Some(false),
            ..Default::default()
        });
        assert_eq!(base.prebuilt_toolchains, Some(false));
    }

    #[test]
    fn empty_list_overrides_non_empty_list() {
        let mut base = Config {
            targets: Some(vec!["arm".into(), "x86".into()]),
            extra_cargo_build_arguments: Some(vec!["--locked".into()]),
            ..Default::default()
        };
        base.merge(&Config {
            targets: Some(vec![]),
            ..Default::default()
        });
        assert_eq!(base.targets, Some(vec![]));
        assert_eq!(
            base.extra_cargo_build_arguments,
            Some(vec!["--locked".to_string()])
        );
    }

    #[test]
    fn api_levels_union_keeps_disjoint_keys() {
        let mut base = Config {
            api_levels: levels(&[("armv7", 16)]),
            ..Default::default()
        };
        base.merge(&Config {
            api_levels: levels(&[("arm64", 21)]),
            ..Default::default()
        });
        assert_eq!(base.api_levels, levels(&[("armv7", 16), ("arm64", 21)]));
    }

    #[test]
    fn api_levels_overlay_wins_on_collision() {
        let mut base = Config {
            api_levels: levels(&[("armv7", 16)]),
            ..Default::default()
        };
        base.merge(&Config {
            api_levels: levels(&[("armv7", 19)]),
            ..Default::default()
        });
        assert_eq!(base.api_levels, levels(&[("armv7", 19)]));
    }

    #[test]
    fn features_replaced_wholesale() {
        let mut base = Config::default();
        base.default_features_and(["foo", "bar"]);
        let mut overlay = Config::default();
        overlay.no_default_features_but(["baz"]);
        base.merge(&overlay);
        assert_eq!(
            base.features,
            Some(Features::NoDefaultBut(BTreeSet::from(["baz".to_string()])))
        );
    }

    #[test]
    fn unset_features_inherit() {
        let mut base = Config::default();
        base.all_features();
        base.merge(&Config::default());
        assert_eq!(base.features, Some(Features::All));
    }

    #[test]
    fn hook_follows_last_present_layer() {
        let mut base = crate::CargoConfig::<&'static str> {
            exec: Some("base"),
            ..Default::default()
        };
        base.merge(&crate::CargoConfig::default());
        assert_eq!(base.exec, Some("base"));
        base.merge(&crate::CargoConfig {
            exec: Some("flavor"),
            ..Default::default()
        });
        assert_eq!(base.exec, Some("flavor"));
    }

    #[test]
    fn merge_does_not_alias_overlay_storage() {
        let mut base = Config::default();
        let overlay = Config {
            targets: Some(vec!["arm".into()]),
            ..Default::default()
        };
        base.merge(&overlay);
        base.targets.as_mut().unwrap().push("x86".into());
        assert_eq!(overlay.targets, Some(vec!["arm".to_string()]));
    }
}
