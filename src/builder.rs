use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::dotenv::{self, DEFAULT_DOTENV_FILE};
use crate::error::LayerfigError;
use crate::file;
use crate::ops::{self, ConfigResult};
use crate::resolve::{self, ResolveInput};
use crate::settings::Settings;
use crate::types::ConfigAction;

/// Default variable naming the base YAML file.
pub const BASE_PATH_VAR: &str = "CONFIG_BASE_PATH";
/// Default variable naming the environment-specific YAML file.
pub const ENV_PATH_VAR: &str = "CONFIG_ENV_PATH";
/// Default variable whose value always wins for `database.password`.
pub const PASSWORD_VAR: &str = "DATABASE_PASSWORD";

/// Entry point for building layered settings.
pub struct Layerfig;

impl Layerfig {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }
}

/// Builder for configuring and loading [`Settings`].
///
/// The defaults reproduce the conventional layout: a `.env` file in the
/// working directory, YAML paths in `CONFIG_BASE_PATH` / `CONFIG_ENV_PATH`,
/// the password in `DATABASE_PASSWORD`, and unprefixed field variables such
/// as `APP__MAX_WORKERS`.
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    dotenv_path: Option<PathBuf>,
    base_path_var: String,
    env_path_var: String,
    password_var: String,
    env_prefix: Option<String>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
    strict: bool,
    overrides: Vec<(String, Value)>,
}

impl SettingsBuilder {
    fn new() -> Self {
        Self {
            dotenv_path: Some(PathBuf::from(DEFAULT_DOTENV_FILE)),
            base_path_var: BASE_PATH_VAR.to_string(),
            env_path_var: ENV_PATH_VAR.to_string(),
            password_var: PASSWORD_VAR.to_string(),
            env_prefix: None,
            env_enabled: true,
            env_vars: None,
            strict: false,
            overrides: Vec::new(),
        }
    }

    /// Read dotenv entries from `path` instead of `.env`.
    pub fn dotenv_file(mut self, path: impl AsRef<Path>) -> Self {
        self.dotenv_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip the dotenv file entirely.
    pub fn no_dotenv(mut self) -> Self {
        self.dotenv_path = None;
        self
    }

    /// Name of the variable holding the base YAML path (default `CONFIG_BASE_PATH`).
    pub fn base_path_var(mut self, name: &str) -> Self {
        self.base_path_var = name.to_string();
        self
    }

    /// Name of the variable holding the env YAML path (default `CONFIG_ENV_PATH`).
    pub fn env_path_var(mut self, name: &str) -> Self {
        self.env_path_var = name.to_string();
        self
    }

    /// Name of the variable that overrides `database.password` (default `DATABASE_PASSWORD`).
    pub fn password_var(mut self, name: &str) -> Self {
        self.password_var = name.to_string();
        self
    }

    /// Require field variables to carry a prefix: `{PREFIX}__APP__MAX_WORKERS`.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable the environment layer: no field bindings, no password override.
    /// The YAML path variables are still consulted.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Resolve against this environment snapshot instead of the process
    /// environment. Dotenv entries are folded into the snapshot and the
    /// process environment is left untouched.
    pub fn env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, unknown keys in YAML files produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override one section field by dotted key. `None` values are ignored
    /// (useful for optional clap args).
    ///
    /// Supplying any field of a section makes that whole section
    /// caller-supplied: the YAML section is not consulted for it.
    pub fn override_value<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.overrides.push((key.to_string(), v.into()));
        }
        self
    }

    /// Snapshot the environment (applying the dotenv file) and read both YAML layers.
    fn build_input(&self) -> Result<ResolveInput, LayerfigError> {
        let env_vars = match &self.env_vars {
            Some(injected) => {
                let mut vars = injected.clone();
                if let Some(path) = &self.dotenv_path {
                    dotenv::fill_missing(&mut vars, dotenv::read_dotenv(path)?);
                }
                vars
            }
            None => {
                if let Some(path) = &self.dotenv_path {
                    dotenv::load_dotenv(path)?;
                }
                utf8_vars(std::env::vars_os())
            }
        };

        let base_yaml =
            file::read_yaml_source(file::path_from_vars(&env_vars, &self.base_path_var))?;
        let env_yaml = file::read_yaml_source(file::path_from_vars(&env_vars, &self.env_path_var))?;

        Ok(ResolveInput {
            base_yaml,
            env_yaml,
            env_vars,
            env_enabled: self.env_enabled,
            env_prefix: self.env_prefix.clone(),
            password_var: self.password_var.clone(),
            overrides: self.overrides.clone(),
            strict: self.strict,
        })
    }

    /// Load and resolve settings through all layers.
    pub fn load(self) -> Result<Settings, LayerfigError> {
        let input = self.build_input()?;
        resolve::resolve(input)
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &ConfigAction) -> Result<(), LayerfigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (list / gen / get / url).
    pub fn handle(self, action: &ConfigAction) -> Result<ConfigResult, LayerfigError> {
        match action {
            ConfigAction::List => {
                let settings = self.load()?;
                ops::list_values(&settings)
            }
            ConfigAction::Gen { output } => {
                let template = ops::generate_template();
                match output {
                    Some(path) => {
                        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                            std::fs::create_dir_all(parent).map_err(|e| LayerfigError::IoError {
                                path: parent.to_path_buf(),
                                source: e,
                            })?;
                        }
                        std::fs::write(path, &template).map_err(|e| LayerfigError::IoError {
                            path: path.clone(),
                            source: e,
                        })?;
                        Ok(ConfigResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(ConfigResult::Template(template)),
                }
            }
            ConfigAction::Get { key } => {
                let settings = self.load()?;
                ops::get_value(&settings, key)
            }
            ConfigAction::Url => {
                let settings = self.load()?;
                Ok(ConfigResult::Url(settings.database_url()))
            }
        }
    }
}

/// Keep the variables whose name and value are both valid UTF-8.
fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Vec<(String, String)> {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.to_str(), value.to_str()) {
            (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
            _ => {
                tracing::debug!(var = %key.to_string_lossy(), "skipping environment variable that is not valid UTF-8");
                None
            }
        })
        .collect()
}
