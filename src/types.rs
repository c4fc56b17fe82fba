//! Small shared vocabulary: schema sections, configuration layers, and the
//! framework-agnostic config actions handled by the builder.

use std::fmt;
use std::path::PathBuf;

/// A named, independently validated section of [`Settings`](crate::Settings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Database,
    Api,
    App,
    Logging,
}

impl Section {
    /// Every section, in schema order.
    pub const ALL: [Section; 4] = [
        Section::Database,
        Section::Api,
        Section::App,
        Section::Logging,
    ];

    /// The top-level key of this section in YAML files and dotted paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Database => "database",
            Section::Api => "api",
            Section::App => "app",
            Section::Logging => "logging",
        }
    }

    /// Look up a section by its top-level key.
    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.as_str() == key)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source of configuration values with a fixed priority rank.
///
/// Variants are declared highest priority first; the derived `Ord` therefore
/// sorts `Environment` before `Defaults`. Use [`priority()`](Self::priority)
/// when a numeric rank is clearer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Process environment variables.
    Environment,
    /// Values read from the dotenv file (only fill variables not already set).
    DotEnv,
    /// The environment-specific YAML file (`CONFIG_ENV_PATH`).
    EnvYaml,
    /// The base YAML file (`CONFIG_BASE_PATH`).
    BaseYaml,
    /// Compiled schema defaults.
    Defaults,
}

impl ConfigLayer {
    /// Numeric rank; higher wins.
    pub fn priority(self) -> u8 {
        match self {
            ConfigLayer::Environment => 4,
            ConfigLayer::DotEnv => 3,
            ConfigLayer::EnvYaml => 2,
            ConfigLayer::BaseYaml => 1,
            ConfigLayer::Defaults => 0,
        }
    }
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigLayer::Environment => "environment",
            ConfigLayer::DotEnv => "dotenv",
            ConfigLayer::EnvYaml => "env yaml",
            ConfigLayer::BaseYaml => "base yaml",
            ConfigLayer::Defaults => "defaults",
        };
        f.write_str(name)
    }
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Show every resolved key-value pair.
    List,
    /// Write (or print) a commented YAML template.
    Gen { output: Option<PathBuf> },
    /// Show one resolved value with its documentation.
    Get { key: String },
    /// Show the derived database connection string.
    Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_keys_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_key(section.as_str()), Some(section));
        }
        assert_eq!(Section::from_key("nope"), None);
    }

    #[test]
    fn layers_ordered_by_priority() {
        let mut layers = vec![
            ConfigLayer::Defaults,
            ConfigLayer::EnvYaml,
            ConfigLayer::Environment,
            ConfigLayer::BaseYaml,
            ConfigLayer::DotEnv,
        ];
        layers.sort_by_key(|l| std::cmp::Reverse(l.priority()));
        assert_eq!(
            layers,
            vec![
                ConfigLayer::Environment,
                ConfigLayer::DotEnv,
                ConfigLayer::EnvYaml,
                ConfigLayer::BaseYaml,
                ConfigLayer::Defaults,
            ]
        );
    }

    #[test]
    fn derived_order_matches_priority() {
        assert!(ConfigLayer::Environment < ConfigLayer::Defaults);
        assert!(ConfigLayer::Environment.priority() > ConfigLayer::Defaults.priority());
    }
}
