//! Operations behind the CLI commands and the result types they return.
//!
//! [`resolve_variant`] and [`show_settings`] are pure: they take already-loaded
//! data and render a [`ConfigResult`] for the caller to display. [`handle`] is
//! the I/O wrapper that loads their inputs for an [`Action`].

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::error::NdkfigError;
use crate::extension::CargoExtension;
use crate::file::{self, DEFAULT_FILE_NAME};
use crate::property::PropertyResolver;
use crate::settings::{ToolCommands, ToolSettings};
use crate::types::{Action, Variant};

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

/// Where [`handle`] finds its inputs and how it renders results.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Android project directory holding `local.properties`.
    pub project_dir: PathBuf,
    /// Declaration file, relative to `project_dir` unless absolute.
    pub file: PathBuf,
    /// Reject unknown keys in the declaration file.
    pub strict: bool,
    pub format: OutputFormat,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            file: PathBuf::from(DEFAULT_FILE_NAME),
            strict: true,
            format: OutputFormat::default(),
        }
    }
}

/// Load what `action` needs from disk and run it.
pub fn handle(action: &Action, options: &RunOptions) -> Result<ConfigResult, NdkfigError> {
    let path = options.project_dir.join(&options.file);
    match action {
        Action::Resolve { variant } => {
            let extension: CargoExtension = file::load_extension(&path, options.strict)?;
            resolve_variant(&extension, variant, options.format)
        }
        Action::Settings => {
            // Commands may be declared explicitly, but the file is optional here.
            let commands = if path.is_file() {
                file::load_extension::<()>(&path, options.strict)?.commands
            } else {
                debug!(path = %path.display(), "no declaration file, using property lookups only");
                ToolCommands::default()
            };
            let resolver = PropertyResolver::for_project(&options.project_dir);
            let settings = ToolSettings::resolve_with(&resolver, &commands)?;
            show_settings(&settings, options.format)
        }
    }
}

/// Result of an operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A resolved variant configuration rendered as TOML.
    Resolved {
        variant: String,
        config: String,
        feature_args: Vec<String>,
    },
    /// Resolved tool settings as key-value pairs.
    Settings { entries: Vec<(String, String)> },
    /// Any result rendered as a JSON document.
    Json(String),
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Resolved {
                variant,
                config,
                feature_args,
            } => {
                writeln!(f, "# variant: {variant}")?;
                write!(f, "{config}")?;
                if !config.is_empty() && !config.ends_with('\n') {
                    writeln!(f)?;
                }
                write!(f, "# cargo feature args: {}", feature_args.join(" "))
            }
            ConfigResult::Settings { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::Json(json) => write!(f, "{json}"),
        }
    }
}

#[derive(Serialize)]
struct ResolvedJson<'a, T: Serialize> {
    variant: &'a str,
    config: &'a T,
    feature_args: &'a [String],
}

/// Resolve `variant` against `extension` and render it.
pub fn resolve_variant<H: Clone>(
    extension: &CargoExtension<H>,
    variant: &Variant,
    format: OutputFormat,
) -> Result<ConfigResult, NdkfigError> {
    let config = extension.config_for(variant);
    let name = variant.name();
    let feature_args = config.feature_args();

    match format {
        OutputFormat::Toml => {
            let rendered = toml::to_string(&config).map_err(|e| NdkfigError::InvalidValue {
                key: name.clone(),
                reason: e.to_string(),
            })?;
            Ok(ConfigResult::Resolved {
                variant: name,
                config: rendered,
                feature_args,
            })
        }
        OutputFormat::Json => {
            let doc = ResolvedJson {
                variant: &name,
                config: &config,
                feature_args: &feature_args,
            };
            to_json(&doc, &name)
        }
    }
}

/// Render resolved tool settings.
pub fn show_settings(settings: &ToolSettings, format: OutputFormat) -> Result<ConfigResult, NdkfigError> {
    match format {
        OutputFormat::Toml => Ok(ConfigResult::Settings {
            entries: settings.entries(),
        }),
        OutputFormat::Json => to_json(settings, "<settings>"),
    }
}

fn to_json<T: Serialize>(value: &T, key: &str) -> Result<ConfigResult, NdkfigError> {
    serde_json::to_string_pretty(value)
        .map(ConfigResult::Json)
        .map_err(|e| NdkfigError::InvalidValue {
            key: key.into(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::parse_extension;
    use crate::fixtures::test::DECLARATION;
    use crate::local::LocalProperties;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn extension() -> CargoExtension {
        parse_extension(DECLARATION, Path::new("ndkfig.toml"), true).unwrap()
    }

    #[test]
    fn resolved_toml_display() {
        let result = resolve_variant(
            &extension(),
            &Variant::new("debug", ["demo"]),
            OutputFormat::Toml,
        )
        .unwrap();
        let out = result.to_string();
        assert!(out.starts_with("# variant: demoDebug\n"));
        assert!(out.contains("profile = \"debug\""));
        assert!(out.contains("module = \"../rust\""));
        assert!(out.ends_with("# cargo feature args: --features demo"));
    }

    #[test]
    fn resolved_json_is_valid_document() {
        let result = resolve_variant(
            &extension(),
            &Variant::new("release", ["full"]),
            OutputFormat::Json,
        )
        .unwrap();
        let ConfigResult::Json(text) = result else {
            panic!("expected json result");
        };
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["variant"], "fullRelease");
        assert_eq!(doc["config"]["profile"], "release");
        assert_eq!(doc["config"]["features"], "all");
        assert_eq!(doc["feature_args"][0], "--all-features");
    }

    #[test]
    fn empty_resolution_still_displays() {
        let result = resolve_variant(
            &CargoExtension::<()>::default(),
            &Variant::new("debug", Vec::<String>::new()),
            OutputFormat::Toml,
        )
        .unwrap();
        assert_eq!(
            result.to_string(),
            "# variant: debug\n# cargo feature args: "
        );
    }

    fn settings() -> ToolSettings {
        let resolver = PropertyResolver::from_parts(
            [("rust.androidNdkToolchainDir", "/opt/tc")]
                .into_iter()
                .collect::<LocalProperties>(),
            Vec::<(String, String)>::new(),
        );
        ToolSettings::resolve(&resolver).unwrap()
    }

    #[test]
    fn settings_listing_display() {
        let out = show_settings(&settings(), OutputFormat::Toml)
            .unwrap()
            .to_string();
        assert!(out.starts_with("cargo_command = cargo\n"));
        assert!(out.contains("toolchain_directory = /opt/tc"));
    }

    #[test]
    fn settings_json() {
        let ConfigResult::Json(text) = show_settings(&settings(), OutputFormat::Json).unwrap()
        else {
            panic!("expected json result");
        };
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["python_command"], "python");
        assert_eq!(
            PathBuf::from(doc["toolchain_directory"].as_str().unwrap()),
            PathBuf::from("/opt/tc")
        );
    }

    #[test]
    fn handle_resolve_reads_declaration_from_project_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_FILE_NAME), DECLARATION).unwrap();
        let options = RunOptions {
            project_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let action = Action::Resolve {
            variant: Variant::new("release", ["full"]),
        };
        let out = handle(&action, &options).unwrap().to_string();
        assert!(out.starts_with("# variant: fullRelease"));
        assert!(out.contains("profile = \"release\""));
    }

    #[test]
    fn handle_resolve_respects_strictness() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("custom.toml"), "profle = \"release\"\n").unwrap();
        let strict = RunOptions {
            project_dir: dir.path().to_path_buf(),
            file: "custom.toml".into(),
            ..Default::default()
        };
        let action = Action::Resolve {
            variant: Variant::new("debug", Vec::<String>::new()),
        };
        assert!(matches!(
            handle(&action, &strict),
            Err(NdkfigError::UnknownKeys(_))
        ));

        let lenient = RunOptions {
            strict: false,
            ..strict
        };
        assert!(handle(&action, &lenient).is_ok());
    }

    #[test]
    fn handle_settings_reads_local_properties() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("local.properties"),
            "rust.cargoCommand=/opt/bin/cargo\n",
        )
        .unwrap();
        let options = RunOptions {
            project_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let out = handle(&Action::Settings, &options).unwrap().to_string();
        assert!(out.starts_with("cargo_command = /opt/bin/cargo"));
    }

    #[test]
    fn handle_settings_prefers_declared_commands() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("local.properties"),
            "rust.cargoCommand=/opt/bin/cargo\nrust.pythonCommand=python3\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(DEFAULT_FILE_NAME),
            "cargo_command = \"/usr/local/bin/cargo\"\npython_command = \"\"\n",
        )
        .unwrap();
        let options = RunOptions {
            project_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let out = handle(&Action::Settings, &options).unwrap().to_string();
        assert!(out.starts_with("cargo_command = /usr/local/bin/cargo\n"));
        assert!(out.contains("python_command = python3\n"));
    }

    #[test]
    fn handle_settings_checks_declaration_strictly() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_FILE_NAME), "cargo_comand = \"x\"\n").unwrap();
        let options = RunOptions {
            project_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(matches!(
            handle(&Action::Settings, &options),
            Err(NdkfigError::UnknownKeys(_))
        ));
    }

    #[test]
    fn handle_settings_invalid_flag_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("local.properties"),
            "rust.prebuiltToolchains=maybe\n",
        )
        .unwrap();
        let options = RunOptions {
            project_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = handle(&Action::Settings, &options).unwrap_err();
        assert!(err.to_string().contains("rust.prebuiltToolchains"));
    }
}
