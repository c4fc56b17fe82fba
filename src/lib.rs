//! Layered configuration with a typed, read-only settings facade.
//!
//! Layerfig resolves one [`Settings`] value from YAML files, a dotenv file,
//! environment variables and programmatic overrides. Built on
//! [confique](https://docs.rs/confique) for struct-driven defaults, doc
//! comments and template generation.
//!
//! ```ignore
//! let settings = Layerfig::builder().load()?;
//! println!("{}", settings.database_url());
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Base YAML             file named by CONFIG_BASE_PATH
//!        ↑ deep-merged with
//! Environment YAML      file named by CONFIG_ENV_PATH
//!        ↑ overridden by
//! Environment vars      DATABASE__HOST, APP__MAX_WORKERS, ...
//!        ↑ overridden by
//! Overrides             .override_value()
//!        ↑ overridden by
//! DATABASE_PASSWORD     always wins for database.password
//! ```
//!
//! The dotenv file (`.env` by default) is read first and only fills
//! variables that are not already set, so the real environment always beats
//! it. Both YAML paths are themselves read from the environment after the
//! dotenv file has been applied.
//!
//! YAML files merge recursively: nested mappings combine key by key, any
//! other value from the environment file replaces the base value. A missing
//! or empty file contributes nothing.
//!
//! # Sections
//!
//! Each of `database`, `api`, `app` and `logging` is built and validated on
//! its own. When an override supplies keys for a section, that section's
//! YAML values are dropped and only the override keys (over environment
//! variables and defaults) are used. Every failing section is reported
//! together in [`LayerfigError::InvalidSections`].
//!
//! # Environment variables
//!
//! `__` separates nesting levels and names are matched case-insensitively:
//!
//! | Env var | Settings key |
//! |---------|--------------|
//! | `DATABASE__HOST` | `database.host` |
//! | `APP__MAX_WORKERS` | `app.max_workers` |
//!
//! With [`env_prefix("MYAPP")`](SettingsBuilder::env_prefix) the same key
//! reads from `MYAPP__APP__MAX_WORKERS`. Values for string fields are taken
//! verbatim (`DATABASE__PASSWORD=007` stays `007`); other values are parsed as
//! bool, integer, float, then string.
//!
//! # Strict mode
//!
//! Off by default: keys that match no field are logged and ignored. With
//! [`.strict(true)`](SettingsBuilder::strict) they fail the load with
//! [`LayerfigError::UnknownKeys`].
//!
//! # Construct-once access
//!
//! [`SettingsCell`] wraps a builder and hands out the same `&Settings` on
//! every call after the first successful load.
//!
//! # Skill scaffolding
//!
//! The [`scaffold`] module creates a skill directory with `SKILL.md`,
//! `examples/README.md` and `scripts/.gitkeep`, after validating the skill
//! name and description. The `skill-scaffold` binary wraps it.

pub mod error;
pub mod merge;
pub mod scaffold;
pub mod types;

mod builder;
mod cell;
#[cfg(feature = "clap")]
mod cli;
mod dotenv;
mod env;
mod file;
mod ops;
mod overrides;
mod resolve;
mod settings;

#[cfg(test)]
mod fixtures;

pub use builder::{BASE_PATH_VAR, ENV_PATH_VAR, Layerfig, PASSWORD_VAR, SettingsBuilder};
pub use cell::SettingsCell;
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand, ScaffoldArgs};
pub use dotenv::{DEFAULT_DOTENV_FILE, load_dotenv, parse_dotenv, read_dotenv};
pub use error::{LayerfigError, ScaffoldError};
pub use file::load_yaml_file;
pub use merge::deep_merge;
pub use ops::ConfigResult;
pub use resolve::merged_config;
pub use scaffold::{ScaffoldReport, ScaffoldRequest, create_scaffold};
pub use settings::{ApiSettings, AppSettings, DatabaseSettings, LoggingSettings, Settings};
pub use types::{ConfigAction, ConfigLayer, Section};
