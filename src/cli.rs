//! Clap adapter for ndkfig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The only bridge
//! to the core is [`Cli::into_request()`], which converts parsed arguments into
//! an [`Action`] plus [`RunOptions`]. Everything downstream goes through the
//! clap-free [`handle`](crate::handle).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::file::DEFAULT_FILE_NAME;
use crate::ops::{OutputFormat, RunOptions};
use crate::types::{Action, Variant};

/// Resolve per-variant Cargo configuration for Android NDK builds.
#[derive(Debug, Parser)]
#[command(name = "ndkfig", version)]
pub struct Cli {
    /// Android project directory holding the declaration file and local.properties.
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Declaration file, relative to the project directory.
    #[arg(long, global = true, default_value = DEFAULT_FILE_NAME)]
    pub file: PathBuf,

    /// Ignore unknown keys in the declaration file instead of failing.
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the resolved configuration for one build variant.
    Resolve {
        /// Build type name (e.g. "debug", "release").
        #[arg(short, long)]
        build_type: String,

        /// Product flavor, once per flavor dimension, in declared dimension order.
        #[arg(short = 'f', long = "flavor")]
        flavors: Vec<String>,
    },
    /// Print tool commands, the toolchain directory and toolchain flags.
    Settings,
}

impl Cli {
    /// Convert clap-parsed args into a framework-agnostic request.
    pub fn into_request(self) -> (Action, RunOptions) {
        let action = match self.command {
            Command::Resolve { build_type, flavors } => Action::Resolve {
                variant: Variant::new(&build_type, flavors),
            },
            Command::Settings => Action::Settings,
        };
        let options = RunOptions {
            project_dir: self.project_dir,
            file: self.file,
            strict: !self.lenient,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Toml
            },
        };
        (action, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> (Action, RunOptions) {
        Cli::try_parse_from(args).unwrap().into_request()
    }

    #[test]
    fn resolve_with_flavors_in_order() {
        let (action, _) = parse(&[
            "ndkfig", "resolve", "-b", "release", "-f", "demo", "--flavor", "free",
        ]);
        assert_eq!(
            action,
            Action::Resolve {
                variant: Variant::new("release", ["demo", "free"]),
            }
        );
    }

    #[test]
    fn resolve_without_flavors() {
        let (action, _) = parse(&["ndkfig", "resolve", "--build-type", "debug"]);
        assert_eq!(
            action,
            Action::Resolve {
                variant: Variant::new("debug", Vec::<String>::new()),
            }
        );
    }

    #[test]
    fn resolve_requires_build_type() {
        assert!(Cli::try_parse_from(["ndkfig", "resolve"]).is_err());
    }

    #[test]
    fn settings_subcommand() {
        let (action, _) = parse(&["ndkfig", "settings"]);
        assert_eq!(action, Action::Settings);
    }

    #[test]
    fn defaults_are_strict_toml_in_cwd() {
        let (_, options) = parse(&["ndkfig", "settings"]);
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let (_, options) = parse(&[
            "ndkfig",
            "settings",
            "--project-dir",
            "/work/app",
            "--file",
            "variants.toml",
            "--lenient",
            "--json",
        ]);
        assert_eq!(options.project_dir, PathBuf::from("/work/app"));
        assert_eq!(options.file, PathBuf::from("variants.toml"));
        assert!(!options.strict);
        assert_eq!(options.format, OutputFormat::Json);
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["ndkfig"]).is_err());
    }
}
