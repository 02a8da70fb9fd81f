// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ExtractError, Result};
use crate::models::EntityKind;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Kinds to extract; empty means every kind.
    #[serde(default)]
    pub kinds: Vec<EntityKind>,
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub context_window: usize,
    #[serde(default = "default_true")]
    pub validate_dates: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub extensions: Vec<String>,
    pub max_file_size_mb: usize,
    #[serde(default)]
    pub follow_links: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub show_offsets: bool,
    #[serde(default = "default_true")]
    pub progress: bool,
}

/// How matches of different kinds that cover the same text are treated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Every kind matches over the full text; a substring may appear under several kinds.
    #[default]
    Independent,
    /// Like `independent`, and cross-kind overlaps are listed in the result.
    Flag,
    /// Earlier kinds claim their spans; later overlapping matches are dropped.
    Exclusive,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `ENTITY_EXTRACT__<SECTION>__<KEY>` overrides; list values are comma separated.
fn environment() -> config::Environment {
    config::Environment::with_prefix("ENTITY_EXTRACT")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("extraction.kinds")
        .with_list_parse_key("input.extensions")
}

fn default_true() -> bool {
    true
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            kinds: Vec::new(),
            overlap_policy: OverlapPolicy::Independent,
            unique: false,
            context_window: 0,
            validate_dates: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty: false,
            show_offsets: false,
            progress: true,
        }
    }
}

impl ExtractionConfig {
    /// Enabled kinds in priority order, without duplicates.
    pub fn enabled_kinds(&self) -> Vec<EntityKind> {
        if self.kinds.is_empty() {
            return EntityKind::ALL.to_vec();
        }
        let mut kinds = self.kinds.clone();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(env);

        let settings = builder
            .build()
            .map_err(|e| ExtractError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ExtractError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            input: InputConfig {
                extensions: vec!["txt".to_string(), "md".to_string(), "log".to_string()],
                max_file_size_mb: 10,
                follow_links: false,
            },
            output: OutputConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.max_file_size_mb == 0 {
            return Err(ExtractError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.input.extensions.is_empty() {
            return Err(ExtractError::Config(
                "at least one input extension is required".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.enabled_kinds().len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_enabled_kinds_sorted_and_deduped() {
        let extraction = ExtractionConfig {
            kinds: vec![EntityKind::Date, EntityKind::Email, EntityKind::Date],
            ..ExtractionConfig::default()
        };
        assert_eq!(
            extraction.enabled_kinds(),
            vec![EntityKind::Email, EntityKind::Date]
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[extraction]
kinds = ["email", "phone_number"]
overlap_policy = "exclusive"
context_window = 20

[input]
extensions = ["txt"]
max_file_size_mb = 1

[output]
format = "json"
pretty = true
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(
            config.extraction.kinds,
            vec![EntityKind::Email, EntityKind::PhoneNumber]
        );
        assert_eq!(config.extraction.overlap_policy, OverlapPolicy::Exclusive);
        assert!(config.extraction.validate_dates);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.progress);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[extraction]\nkinds = [\"zipcode\"]\n[input]\nextensions = [\"txt\"]\nmax_file_size_mb = 1\n[output]\n",
        )
        .unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides_lists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[input]\nextensions = [\"txt\"]\nmax_file_size_mb = 1\n",
        )
        .unwrap();

        let vars = config::Map::from([
            (
                "ENTITY_EXTRACT__EXTRACTION__KINDS".to_string(),
                "email,date".to_string(),
            ),
            (
                "ENTITY_EXTRACT__EXTRACTION__OVERLAP_POLICY".to_string(),
                "flag".to_string(),
            ),
            (
                "ENTITY_EXTRACT__INPUT__EXTENSIONS".to_string(),
                "md".to_string(),
            ),
        ]);
        let config = Config::load_with_env(Some(&path), environment().source(Some(vars))).unwrap();

        assert_eq!(
            config.extraction.kinds,
            vec![EntityKind::Email, EntityKind::Date]
        );
        assert_eq!(config.extraction.overlap_policy, OverlapPolicy::Flag);
        assert_eq!(config.input.extensions, vec!["md".to_string()]);
    }

    #[test]
    fn test_zero_file_size_rejected() {
        let mut config = Config::default_config();
        config.input.max_file_size_mb = 0;
        assert!(config.validate().is_err());
    }
}
