//! Session configuration, read from `STOREKEEP_*` environment variables.

use core::str::FromStr;

use storekeep_observability::{LogConfig, LogFormat};

/// How command results are written to the output stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format `{other}` (expected `text` or `json`)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output: OutputFormat,
    pub log: LogConfig,
    /// Print the menu and argument prompts.
    pub prompt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            log: LogConfig::default(),
            prompt: true,
        }
    }
}

impl Config {
    pub const OUTPUT_VAR: &'static str = "STOREKEEP_OUTPUT";
    pub const LOG_FORMAT_VAR: &'static str = "STOREKEEP_LOG_FORMAT";
    pub const LOG_FILTER_VAR: &'static str = "STOREKEEP_LOG";
    pub const PROMPT_VAR: &'static str = "STOREKEEP_PROMPT";

    /// Load configuration from the process environment.
    ///
    /// Invalid values fall back to their defaults; the returned warnings say
    /// which ones. Logging is not set up yet at this point, so the caller logs them.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(raw) = lookup(Self::OUTPUT_VAR) {
            match raw.parse() {
                Ok(output) => config.output = output,
                Err(e) => warnings.push(format!("{}: {e}; using text", Self::OUTPUT_VAR)),
            }
        }

        if let Some(raw) = lookup(Self::LOG_FORMAT_VAR) {
            match raw.parse::<LogFormat>() {
                Ok(format) => config.log.format = format,
                Err(e) => warnings.push(format!("{}: {e}; using text", Self::LOG_FORMAT_VAR)),
            }
        }

        if let Some(raw) = lookup(Self::LOG_FILTER_VAR) {
            if !raw.trim().is_empty() {
                config.log.default_filter = raw.trim().to_string();
            }
        }

        if let Some(raw) = lookup(Self::PROMPT_VAR) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.prompt = true,
                "0" | "false" | "no" | "off" => config.prompt = false,
                other => warnings.push(format!(
                    "{}: expected a boolean, got `{other}`; prompts stay enabled",
                    Self::PROMPT_VAR
                )),
            }
        }

        (config, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> (Config, Vec<String>) {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let (config, warnings) = load(&[]);
        assert_eq!(config, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn every_variable_is_honoured() {
        let (config, warnings) = load(&[
            ("STOREKEEP_OUTPUT", "json"),
            ("STOREKEEP_LOG_FORMAT", "JSON"),
            ("STOREKEEP_LOG", "storekeep_catalog=debug"),
            ("STOREKEEP_PROMPT", "0"),
        ]);

        assert!(warnings.is_empty());
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.default_filter, "storekeep_catalog=debug");
        assert!(!config.prompt);
    }

    #[test]
    fn invalid_values_fall_back_with_warnings() {
        let (config, warnings) = load(&[
            ("STOREKEEP_OUTPUT", "xml"),
            ("STOREKEEP_LOG_FORMAT", "yaml"),
            ("STOREKEEP_PROMPT", "maybe"),
        ]);

        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("STOREKEEP_OUTPUT"));
    }
}
