use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "bru-gen.json";

pub const DEFAULT_INPUT: &str = "openapi.json";
pub const DEFAULT_OUTPUT: &str = ".";
pub const DEFAULT_COMPANY: &str = "Company";
pub const DEFAULT_ENVIRONMENTS: [&str; 3] = ["DEV", "QA", "PROD"];

/// Project configuration, as found in `bru-gen.json` or built from CLI
/// flags. Every field is optional: an unset field means "not supplied",
/// never "use the default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BruGenConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub company: Option<String>,
    pub environments: Option<Vec<String>>,
    /// Environment name → base URL override.
    pub base_urls: Option<IndexMap<String, String>>,
}

/// Configuration with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub company: String,
    pub environments: Vec<String>,
    pub base_urls: IndexMap<String, String>,
}

impl BruGenConfig {
    /// Layer `self` (caller-supplied values) over `fallback` (config file).
    /// Base URL overrides merge per environment, `self` winning.
    pub fn merge(self, fallback: BruGenConfig) -> BruGenConfig {
        let base_urls = match (fallback.base_urls, self.base_urls) {
            (Some(mut merged), Some(overrides)) => {
                merged.extend(overrides);
                Some(merged)
            }
            (fallback, overrides) => overrides.or(fallback),
        };
        BruGenConfig {
            input: self.input.or(fallback.input),
            output: self.output.or(fallback.output),
            company: self.company.or(fallback.company),
            environments: self.environments.or(fallback.environments),
            base_urls,
        }
    }

    /// Fill every unset field with its hardcoded default.
    pub fn resolve(self) -> ResolvedConfig {
        ResolvedConfig {
            input: PathBuf::from(self.input.unwrap_or_else(|| DEFAULT_INPUT.to_string())),
            output: PathBuf::from(self.output.unwrap_or_else(|| DEFAULT_OUTPUT.to_string())),
            company: self.company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            environments: self
                .environments
                .unwrap_or_else(|| DEFAULT_ENVIRONMENTS.iter().map(|e| e.to_string()).collect()),
            base_urls: self.base_urls.unwrap_or_default(),
        }
    }
}

/// Load config from a JSON (or `.yaml`/`.yml`) file. Returns `None` if the
/// file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<BruGenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml_ng::from_str(&content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };
    parsed
        .map(Some)
        .map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"{
  "input": "openapi.json",
  "output": ".",
  "company": "Company",
  "environments": ["DEV", "QA", "PROD"],
  "baseUrls": {}
}
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves_to_defaults() {
        let config = BruGenConfig::default().resolve();
        assert_eq!(config.input, PathBuf::from("openapi.json"));
        assert_eq!(config.output, PathBuf::from("."));
        assert_eq!(config.company, "Company");
        assert_eq!(config.environments, vec!["DEV", "QA", "PROD"]);
        assert!(config.base_urls.is_empty());
    }

    #[test]
    fn test_parse_config_json() {
        let json = r#"{
            "input": "api.json",
            "company": "Acme",
            "environments": ["Local", "Prod"],
            "baseUrls": {"Local": "http://localhost:8080"}
        }"#;
        let config: BruGenConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.input.as_deref(), Some("api.json"));
        assert_eq!(config.output, None);
        assert_eq!(config.company.as_deref(), Some("Acme"));
        assert_eq!(
            config.environments,
            Some(vec!["Local".to_string(), "Prod".to_string()])
        );
        assert_eq!(
            config.base_urls.unwrap()["Local"],
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_default_config_content_parses() {
        let config: BruGenConfig = serde_json::from_str(default_config_content()).unwrap();
        assert_eq!(config.clone().resolve(), BruGenConfig::default().resolve());
        assert_eq!(config.base_urls, Some(IndexMap::new()));
    }

    #[test]
    fn test_caller_value_equal_to_default_still_wins() {
        let file = BruGenConfig {
            company: Some("FromFile".to_string()),
            ..Default::default()
        };
        let caller = BruGenConfig {
            company: Some(DEFAULT_COMPANY.to_string()),
            ..Default::default()
        };
        assert_eq!(caller.merge(file).resolve().company, DEFAULT_COMPANY);
    }

    #[test]
    fn test_merge_falls_back_per_field() {
        let file = BruGenConfig {
            input: Some("spec.json".to_string()),
            company: Some("Acme".to_string()),
            environments: Some(vec!["DEV".to_string()]),
            ..Default::default()
        };
        let caller = BruGenConfig {
            company: Some("Globex".to_string()),
            ..Default::default()
        };
        let resolved = caller.merge(file).resolve();
        assert_eq!(resolved.input, PathBuf::from("spec.json"));
        assert_eq!(resolved.company, "Globex");
        assert_eq!(resolved.environments, vec!["DEV"]);
        assert_eq!(resolved.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_merge_base_urls_per_environment() {
        let file = BruGenConfig {
            base_urls: Some(IndexMap::from([
                ("DEV".to_string(), "https://dev.file".to_string()),
                ("QA".to_string(), "https://qa.file".to_string()),
            ])),
            ..Default::default()
        };
        let caller = BruGenConfig {
            base_urls: Some(IndexMap::from([(
                "DEV".to_string(),
                "https://dev.cli".to_string(),
            )])),
            ..Default::default()
        };
        let urls = caller.merge(file).resolve().base_urls;
        assert_eq!(urls["DEV"], "https://dev.cli");
        assert_eq!(urls["QA"], "https://qa.file");
    }

    #[test]
    fn test_load_missing_config() {
        assert_eq!(
            load_config(Path::new("/no/such/dir/bru-gen.json")).unwrap(),
            None
        );
    }
}
