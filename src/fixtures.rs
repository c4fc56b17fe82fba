#[cfg(test)]
pub mod test {
    use confique::Config;

    use crate::file::YamlSource;
    use crate::resolve::ResolveInput;
    use crate::settings::Settings;

    /// Settings built purely from schema defaults.
    pub fn default_settings() -> Settings {
        Settings::builder().load().unwrap()
    }

    /// Resolve input with no files, no variables and no overrides.
    pub fn empty_input() -> ResolveInput {
        ResolveInput {
            base_yaml: YamlSource::default(),
            env_yaml: YamlSource::default(),
            env_vars: vec![],
            env_enabled: true,
            env_prefix: None,
            password_var: "DATABASE_PASSWORD".into(),
            overrides: vec![],
            strict: false,
        }
    }

    /// An in-memory YAML layer.
    pub fn yaml(path: &str, content: &str) -> YamlSource {
        YamlSource {
            path: Some(path.into()),
            content: Some(content.into()),
        }
    }

    pub fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn default_settings_load() {
        let settings = default_settings();
        assert_eq!(settings.database.port, 3306);
        assert_eq!(settings.config_env_path, None);
    }
}
