use crate::schema::LitheConfig;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Jsonc,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;

        match ext {
            "jsonc" => Some(Self::Jsonc),
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: LitheConfig,
    pub path: PathBuf,
    pub format: ConfigFormat,
}

pub fn load_config(config_path: Option<&Path>) -> Result<LitheConfig> {
    resolve_config(config_path).map(|r| r.config)
}

pub fn resolve_config(config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let path = config_path
        .map(|p| p.to_path_buf())
        .or_else(find_config_file)
        .ok_or_else(|| anyhow!("No configuration file found"))?;

    load_config_from_file(&path)
}

pub fn load_config_from_file(path: &Path) -> Result<ResolvedConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| anyhow!("Unknown config format for: {}", path.display()))?;

    let config = parse_config(&content, format)?;
    tracing::debug!(path = %path.display(), ?format, "Loaded configuration");

    Ok(ResolvedConfig {
        config,
        path: path.to_path_buf(),
        format,
    })
}

/// Parses `content` and expands `${VAR}` / `$VAR` references in string settings.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<LitheConfig> {
    let config: LitheConfig = match format {
        ConfigFormat::Jsonc => json5::from_str(content).context("Failed to parse JSONC")?,
        ConfigFormat::Json => serde_json::from_str(content).context("Failed to parse JSON")?,
        ConfigFormat::Yaml => serde_yaml_ng::from_str(content).context("Failed to parse YAML")?,
    };

    Ok(expand_env_vars(config))
}

const CONFIG_CANDIDATES: &[&str] = &[
    "lithe.jsonc",
    "lithe.json",
    "lithe.yml",
    "lithe.yaml",
    ".lithe.jsonc",
    ".lithe.json",
    ".lithe.yml",
    ".lithe.yaml",
];

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = CONFIG_CANDIDATES.iter().map(PathBuf::from).collect();

    if let Ok(home) = env::var("HOME") {
        let global_dir = PathBuf::from(home).join(".config").join("lithe");
        paths.extend(CONFIG_CANDIDATES.iter().map(|c| global_dir.join(c)));
    }

    paths
}

fn find_config_file() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|path| path.exists())
}

pub fn find_all_config_files() -> Vec<PathBuf> {
    candidate_paths()
        .into_iter()
        .filter(|path| path.exists())
        .collect()
}

fn expand_env_vars(mut config: LitheConfig) -> LitheConfig {
    config.telemetry.level = expand_env_string(&config.telemetry.level);
    config
}

fn expand_env_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        if chars.peek() == Some(&'{') {
            chars.next();
            let var_name: String = chars.by_ref().take_while(|&c| c != '}').collect();
            match env::var(&var_name) {
                Ok(value) => result.push_str(&value),
                Err(_) => {
                    result.push_str("${");
                    result.push_str(&var_name);
                    result.push('}');
                }
            }
            continue;
        }

        // $VAR stops at the first character that cannot be part of a name
        let mut var_name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                var_name.push(c);
                chars.next();
            } else {
                break;
            }
        }

        if var_name.is_empty() {
            result.push('$');
        } else if let Ok(value) = env::var(&var_name) {
            result.push_str(&value);
        } else {
            result.push('$');
            result.push_str(&var_name);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use lithe_events::FailurePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_expand_env_string_with_braces() {
        env::set_var("LITHE_TEST_VAR", "test_value");
        let result = expand_env_string("prefix_${LITHE_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");
    }

    #[test]
    fn test_expand_env_string_without_braces() {
        env::set_var("LITHE_TEST_VAR", "test_value");
        let result = expand_env_string("prefix_$LITHE_TEST_VAR");
        assert_eq!(result, "prefix_test_value");
    }

    #[test]
    fn test_expand_env_string_missing_var() {
        let result = expand_env_string("prefix_${LITHE_NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix_${LITHE_NONEXISTENT_VAR}_suffix");
    }

    #[test]
    fn test_expand_env_string_lone_dollar() {
        assert_eq!(expand_env_string("cost: $ 5"), "cost: $ 5");
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("lithe.jsonc")),
            Some(ConfigFormat::Jsonc)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("lithe.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("lithe.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("lithe.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("lithe.txt")), None);
    }

    #[test]
    fn test_parse_jsonc_with_comments() {
        let content = r#"{
  // dispatcher
  "events": { "failure_policy": "isolate" } /* trailing */
}"#;
        let config = parse_config(content, ConfigFormat::Jsonc).unwrap();
        assert_eq!(config.events.failure_policy, FailurePolicy::Isolate);
    }

    #[test]
    fn test_parse_expands_telemetry_level() {
        env::set_var("LITHE_TEST_LEVEL", "trace");
        let content = r#"{"telemetry": {"level": "${LITHE_TEST_LEVEL}"}}"#;
        let config = parse_config(content, ConfigFormat::Json).unwrap();
        assert_eq!(config.telemetry.level, "trace");
    }

    #[test]
    fn test_resolve_config_from_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lithe.yml");

        let content = r#"
events:
  failure_policy: isolate
telemetry:
  json_output: true
"#;
        fs::write(&path, content).unwrap();

        let resolved = load_config_from_file(&path).unwrap();
        assert_eq!(resolved.format, ConfigFormat::Yaml);
        assert_eq!(resolved.config.events.failure_policy, FailurePolicy::Isolate);
        assert!(resolved.config.telemetry.json_output);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lithe.toml");
        fs::write(&path, "").unwrap();

        let err = load_config_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unknown config format"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lithe.json");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_config_priority_order_documented() {
        assert_eq!(CONFIG_CANDIDATES[0], "lithe.jsonc");
        assert_eq!(CONFIG_CANDIDATES[1], "lithe.json");
        assert_eq!(CONFIG_CANDIDATES[2], "lithe.yml");
        assert_eq!(CONFIG_CANDIDATES[3], "lithe.yaml");
        assert_eq!(CONFIG_CANDIDATES[4], ".lithe.jsonc");
    }
}
