#[cfg(test)]
pub mod test {
    use std::collections::BTreeMap;

    use crate::config::CargoConfig;

    pub type Config = CargoConfig<()>;

    /// A configuration with every field set.
    pub fn full_config() -> Config {
        let mut config = Config {
            module: Some("../rust".into()),
            libname: Some("native".into()),
            targets: Some(vec!["arm".into(), "arm64".into()]),
            prebuilt_toolchains: Some(true),
            profile: Some("release".into()),
            verbose: Some(false),
            target_directory: Some("target".into()),
            target_includes: Some(vec!["libnative.so".into()]),
            api_level: Some(21),
            api_levels: BTreeMap::from([("arm".to_string(), 19)]),
            extra_cargo_build_arguments: Some(vec!["--locked".into()]),
            exec: Some(()),
            features: None,
        };
        config.default_features_and(["jni"]);
        config
    }

    /// A small declaration file exercising both registries.
    pub const DECLARATION: &str = r#"
module = "../rust"
libname = "native"
targets = ["arm", "x86"]
profile = "debug"

[api_levels]
arm = 16

[build_types.release]
profile = "release"

[product_flavors.demo]
profile = "debug"
features = { default_and = ["demo"] }

[product_flavors.full]
profile = "release"
features = "all"
"#;
}
