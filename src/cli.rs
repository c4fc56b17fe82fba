//! Clap adapter for layerfig.
//!
//! Compiled only with the `clap` feature (on by default). [`ConfigArgs`]
//! gives an app `config list|gen|get|url` subcommands; [`ScaffoldArgs`]
//! carries the scaffolder's `--name`, `--description` and `--output` flags.
//! Both convert into clap-free core types, so every piece of logic below
//! them works without clap.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::scaffold::ScaffoldRequest;
use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show all resolved settings as key-value pairs.
    List,
    /// Generate a commented sample YAML settings file.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the resolved value and documentation for a settings key.
    Get {
        /// Dotted key path (e.g. "database.host").
        key: String,
    },
    /// Print the database connection string.
    Url,
}

impl ConfigArgs {
    /// Bare `config` and explicit `config list` both map to `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Gen { output }) => ConfigAction::Gen { output },
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(ConfigSubcommand::Url) => ConfigAction::Url,
        }
    }
}

/// Arguments for creating a new skill directory.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Skill name: lowercase letters, digits and hyphens (max 64 characters).
    #[arg(short, long)]
    pub name: String,

    /// One-line description of what the skill does (max 1024 characters).
    #[arg(short, long)]
    pub description: String,

    /// Directory the skill folder is created in.
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

impl ScaffoldArgs {
    pub fn into_request(self) -> ScaffoldRequest {
        ScaffoldRequest::new(self.name, self.description, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Wrapper so we can use `try_parse_from` on the subcommand.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    #[derive(Debug, Parser)]
    struct TestScaffold {
        #[command(flatten)]
        args: ScaffoldArgs,
    }

    fn parse(args: &[&str]) -> ConfigArgs {
        TestCli::try_parse_from(args).unwrap().config
    }

    #[test]
    fn parse_gen_no_output() {
        let action = parse(&["test", "gen"]).into_action();
        assert_eq!(action, ConfigAction::Gen { output: None });
    }

    #[test]
    fn parse_gen_with_output() {
        let action = parse(&["test", "gen", "-o", "settings.yaml"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Gen {
                output: Some(PathBuf::from("settings.yaml"))
            }
        );
    }

    #[test]
    fn parse_gen_with_long_output() {
        let action = parse(&["test", "gen", "--output", "/etc/app/base.yaml"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Gen {
                output: Some(PathBuf::from("/etc/app/base.yaml"))
            }
        );
    }

    #[test]
    fn parse_get() {
        let action = parse(&["test", "get", "database.host"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Get {
                key: "database.host".into()
            }
        );
    }

    #[test]
    fn parse_url() {
        assert_eq!(parse(&["test", "url"]).into_action(), ConfigAction::Url);
    }

    #[test]
    fn parse_bare_config_is_list() {
        assert_eq!(parse(&["test"]).into_action(), ConfigAction::List);
    }

    #[test]
    fn parse_explicit_list() {
        assert_eq!(parse(&["test", "list"]).into_action(), ConfigAction::List);
    }

    #[test]
    fn invalid_subcommand_errors() {
        assert!(TestCli::try_parse_from(["test", "set", "port", "1"]).is_err());
        assert!(TestCli::try_parse_from(["test", "nope"]).is_err());
    }

    #[test]
    fn get_requires_key() {
        assert!(TestCli::try_parse_from(["test", "get"]).is_err());
    }

    #[test]
    fn scaffold_short_flags() {
        let args = TestScaffold::try_parse_from([
            "test",
            "-n",
            "excel-handler",
            "-d",
            "Handle Excel files",
            "-o",
            "skills",
        ])
        .unwrap()
        .args;
        assert_eq!(
            args.into_request(),
            ScaffoldRequest::new("excel-handler", "Handle Excel files", "skills")
        );
    }

    #[test]
    fn scaffold_output_defaults_to_cwd() {
        let args = TestScaffold::try_parse_from([
            "test",
            "--name",
            "excel-handler",
            "--description",
            "Handle Excel files",
        ])
        .unwrap()
        .args;
        assert_eq!(args.output, PathBuf::from("."));
    }

    #[test]
    fn scaffold_requires_name_and_description() {
        assert!(TestScaffold::try_parse_from(["test", "-n", "x"]).is_err());
        assert!(TestScaffold::try_parse_from(["test", "-d", "x"]).is_err());
    }
}
