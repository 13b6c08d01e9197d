//! Configuration file loading.
//!
//! Settings live in `$XDG_CONFIG_HOME/deskcalc/config.toml`. Every key is
//! optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::calculator::{AngleUnit, EngineSettings};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: EngineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub angle_unit: AngleUnit,
    pub max_input_digits: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            angle_unit: settings.angle_unit,
            max_input_digits: settings.max_input_digits,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Copy the final display to the clipboard on exit.
    pub copy_result: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Invalid config file")?;
        if config.engine.max_input_digits == 0 {
            anyhow::bail!("engine.max_input_digits must be at least 1");
        }
        Ok(config)
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist; the default one may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        debug!(path = %path.display(), ?config, "Loaded config");

        Ok(config)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            angle_unit: self.engine.angle_unit,
            max_input_digits: self.engine.max_input_digits,
        }
    }

    /// Engine settings with command-line overrides applied on top of the file.
    pub fn engine_settings_with(&self, radians: bool, max_digits: Option<usize>) -> EngineSettings {
        let mut settings = self.engine_settings();
        if radians {
            settings.angle_unit = AngleUnit::Radians;
        }
        if let Some(max_digits) = max_digits {
            settings.max_input_digits = max_digits;
        }
        settings
    }
}

/// `$XDG_CONFIG_HOME/deskcalc/config.toml`, if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deskcalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine_settings(), EngineSettings::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            [engine]
            angle_unit = "radians"
            max_input_digits = 10

            [output]
            format = "json"
            copy_result = true
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.angle_unit, AngleUnit::Radians);
        assert_eq!(config.engine_settings().max_input_digits, 10);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.copy_result);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::from_toml_str("[engine]\nmax_input_digits = 10\n").unwrap();

        let unchanged = config.engine_settings_with(false, None);
        assert_eq!(unchanged, config.engine_settings());

        let overridden = config.engine_settings_with(true, Some(4));
        assert_eq!(overridden.angle_unit, AngleUnit::Radians);
        assert_eq!(overridden.max_input_digits, 4);
    }

    #[test]
    fn test_radians_flag_does_not_undo_file_setting() {
        let config = Config::from_toml_str("[engine]\nangle_unit = \"radians\"\n").unwrap();
        let settings = config.engine_settings_with(false, Some(15));
        assert_eq!(settings.angle_unit, AngleUnit::Radians);
        assert_eq!(settings.max_input_digits, 15);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = Config::from_toml_str("[engine]\nangle_unit = \"degrees\"\n").unwrap();
        assert_eq!(config.engine.max_input_digits, 15);
        assert_eq!(config.output.format, OutputFormat::Plain);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(Config::from_toml_str("[engine]\nprecision = 4\n").is_err());
        assert!(Config::from_toml_str("[theme]\n").is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_toml_str("[engine]\nangle_unit = \"gradians\"\n").is_err());
        assert!(Config::from_toml_str("[engine]\nmax_input_digits = 0\n").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("deskcalc-test-does-not-exist.toml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("deskcalc-test-{}.toml", std::process::id()));
        fs::write(&path, "[output]\ncopy_result = true\n").unwrap();

        let config = Config::load(Some(&path));
        let _ = fs::remove_file(&path);

        assert!(config.unwrap().output.copy_result);
    }
}
