//! Core resolution pipeline: fold every layer and construct typed settings.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Parse the base and env YAML layers and deep-merge them (env wins)
//! 2. Pick each section's input: a caller-supplied section replaces the YAML
//!    section wholesale, otherwise the YAML sub-mapping is adopted
//! 3. Deep-merge environment bindings into each section, beneath caller keys
//! 4. Force `database.password` from the password variable, if set
//! 5. Construct every section independently; confique fills defaults
//! 6. Report all failing sections together, or assemble `Settings`

use std::collections::HashSet;

use confique::Config;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::env;
use crate::error::LayerfigError;
use crate::file::{self, YamlSource};
use crate::merge::deep_merge;
use crate::overrides;
use crate::settings::{ApiSettings, AppSettings, DatabaseSettings, LoggingSettings, Settings};
use crate::types::{ConfigLayer, Section};

/// All pre-loaded data needed to resolve settings. No I/O happens here.
#[derive(Debug, Clone)]
pub struct ResolveInput {
    /// The base YAML layer.
    pub base_yaml: YamlSource,
    /// The environment-specific YAML layer, merged over the base.
    pub env_yaml: YamlSource,
    /// Environment snapshot, dotenv entries already folded in.
    pub env_vars: Vec<(String, String)>,
    /// Whether environment variables bind to settings fields.
    pub env_enabled: bool,
    /// Optional prefix for field-binding variables (e.g. `"MYAPP"`).
    pub env_prefix: Option<String>,
    /// Variable whose value always wins for `database.password`.
    pub password_var: String,
    /// Caller overrides as `(dotted_key, value)` pairs.
    pub overrides: Vec<(String, Value)>,
    /// Whether unknown keys in the YAML layers are errors.
    pub strict: bool,
}

/// Parse both YAML layers and fold them: the env layer overrides the base.
pub fn merged_config(base: &YamlSource, env: &YamlSource) -> Result<Mapping, LayerfigError> {
    let base = file::parse_yaml(ConfigLayer::BaseYaml, base)?;
    let env = file::parse_yaml(ConfigLayer::EnvYaml, env)?;
    Ok(deep_merge(&base, &env))
}

/// Resolve settings from pre-loaded inputs.
pub fn resolve(input: ResolveInput) -> Result<Settings, LayerfigError> {
    let merged = merged_config(&input.base_yaml, &input.env_yaml)?;

    let valid = overrides::valid_keys(&Settings::META);
    let section_keys: HashSet<String> = valid
        .iter()
        .filter(|key| key.contains('.'))
        .cloned()
        .collect();

    for (key, _) in &input.overrides {
        if !valid.contains(key) {
            return Err(LayerfigError::KeyNotFound(key.clone()));
        }
        if !section_keys.contains(key) {
            return Err(LayerfigError::InvalidValue {
                key: key.clone(),
                reason: "only section fields can be overridden".into(),
            });
        }
    }
    let callers = overrides::overrides_to_mapping(&input.overrides);

    let (env_layer, password) = if input.env_enabled {
        (
            env::env_to_mapping(
                input.env_prefix.as_deref(),
                &input.env_vars,
                &section_keys,
                &schema_text_keys()?,
            ),
            password_override(&input.env_vars, &input.password_var),
        )
    } else {
        (Mapping::new(), None)
    };

    let mut ignored = unknown_top_level_keys(&merged);
    let layers = SectionLayers {
        yaml: &merged,
        env: &env_layer,
        callers: &callers,
    };

    let database = layers
        .input(Section::Database)
        .map(|mut section| {
            if let Some(password) = &password {
                tracing::debug!(var = %input.password_var, "database password taken from environment");
                section.insert("password".into(), Value::String(password.clone()));
            }
            section
        })
        .and_then(|section| build_section::<DatabaseSettings>(Section::Database, section, &mut ignored));
    let api = layers
        .input(Section::Api)
        .and_then(|section| build_section::<ApiSettings>(Section::Api, section, &mut ignored));
    let app = layers
        .input(Section::App)
        .and_then(|section| build_section::<AppSettings>(Section::App, section, &mut ignored));
    let logging = layers
        .input(Section::Logging)
        .and_then(|section| build_section::<LoggingSettings>(Section::Logging, section, &mut ignored));

    let settings = match (database, api, app, logging) {
        (Ok(database), Ok(api), Ok(app), Ok(logging)) => Settings {
            config_base_path: input.base_yaml.path,
            config_env_path: input.env_yaml.path,
            database,
            api,
            app,
            logging,
        },
        (database, api, app, logging) => {
            let errors = [database.err(), api.err(), app.err(), logging.err()]
                .into_iter()
                .flatten()
                .collect();
            return Err(LayerfigError::InvalidSections(errors));
        }
    };

    if !ignored.is_empty() {
        if input.strict {
            let errors = ignored
                .into_iter()
                .map(|key| LayerfigError::UnknownKey { key })
                .collect();
            return Err(LayerfigError::UnknownKeys(errors));
        }
        for key in &ignored {
            tracing::debug!(%key, "ignoring unknown config key");
        }
    }

    Ok(settings)
}

/// The three mappings a section's input is drawn from.
struct SectionLayers<'a> {
    yaml: &'a Mapping,
    env: &'a Mapping,
    callers: &'a Mapping,
}

impl SectionLayers<'_> {
    /// Build the raw input for one section.
    ///
    /// A caller-supplied section replaces the YAML section entirely; env
    /// bindings then sit between the chosen base and the caller's own keys.
    fn input(&self, section: Section) -> Result<Mapping, LayerfigError> {
        let key = section.as_str();
        let env = section_mapping(section, self.env.get(key))?;
        match self.callers.get(key) {
            Some(caller) => {
                let caller = section_mapping(section, Some(caller))?;
                tracing::debug!(%section, "caller-supplied section replaces yaml section");
                Ok(deep_merge(&env, &caller))
            }
            None => {
                let yaml = section_mapping(section, self.yaml.get(key))?;
                Ok(deep_merge(&yaml, &env))
            }
        }
    }
}

fn section_mapping(section: Section, value: Option<&Value>) -> Result<Mapping, LayerfigError> {
    match value {
        None | Some(Value::Null) => Ok(Mapping::new()),
        Some(Value::Mapping(mapping)) => Ok(mapping.clone()),
        Some(other) => Err(LayerfigError::InvalidSection {
            section,
            reason: format!("expected a mapping, found {}", value_kind(other)),
        }),
    }
}

/// Construct one typed section from its raw input.
///
/// Keys the section does not know are recorded in `ignored` as dotted paths.
fn build_section<S>(
    section: Section,
    input: Mapping,
    ignored: &mut Vec<String>,
) -> Result<S, LayerfigError>
where
    S: Config,
    S::Layer: DeserializeOwned,
{
    let invalid = |reason: String| LayerfigError::InvalidSection { section, reason };

    let layer: S::Layer = serde_ignored::deserialize(Value::Mapping(input), |path| {
        ignored.push(format!("{section}.{path}"));
    })
    .map_err(|e| invalid(e.to_string()))?;

    S::builder()
        .preloaded(layer)
        .load()
        .map_err(|e| invalid(e.to_string()))
}

/// Top-level keys other than sections. `config_base_path` and
/// `config_env_path` count too: they are recorded from the path variables,
/// never read from YAML.
fn unknown_top_level_keys(merged: &Mapping) -> Vec<String> {
    merged
        .keys()
        .map(|key| match key {
            Value::String(s) => s.clone(),
            other => serde_yaml::to_string(other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_else(|_| format!("{other:?}")),
        })
        .filter(|key| Section::from_key(key).is_none())
        .collect()
}

/// Text leaves of the schema, read off the serialized defaults.
fn schema_text_keys() -> Result<HashSet<String>, LayerfigError> {
    let invalid = |reason: String| LayerfigError::InvalidValue {
        key: "<defaults>".into(),
        reason,
    };
    let defaults = Settings::builder().load().map_err(|e| invalid(e.to_string()))?;
    let tree = serde_yaml::to_value(&defaults).map_err(|e| invalid(e.to_string()))?;
    Ok(env::text_keys(&tree))
}

/// The password variable wins only when it is set to a non-empty value.
fn password_override(vars: &[(String, String)], name: &str) -> Option<String> {
    vars.iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
        .filter(|value| !value.is_empty())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
