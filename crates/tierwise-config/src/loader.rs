use crate::schema::TierwiseConfig;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tierwise_router::Router;

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

/// A loaded configuration and where it came from.
///
/// `path` and `format` are `None` when no file was found and the built-in
/// defaults are in effect.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: TierwiseConfig,
    pub path: Option<PathBuf>,
    pub format: Option<ConfigFormat>,
}

impl ResolvedConfig {
    pub fn defaults() -> Self {
        Self {
            config: TierwiseConfig::default(),
            path: None,
            format: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.path.is_none()
    }
}

pub fn load_config(config_path: Option<&Path>) -> Result<TierwiseConfig> {
    resolve_config(config_path).map(|r| r.config)
}

/// Load an explicit path, or discover one, or fall back to defaults.
///
/// An explicit path that does not exist is an error; discovery finding
/// nothing is not.
pub fn resolve_config(config_path: Option<&Path>) -> Result<ResolvedConfig> {
    if let Some(path) = config_path {
        return load_config_from_file(path);
    }

    match find_config_file() {
        Some(path) => load_config_from_file(&path),
        None => {
            tracing::debug!("no configuration file found, using built-in defaults");
            Ok(ResolvedConfig::defaults())
        }
    }
}

pub fn load_config_from_file(path: &Path) -> Result<ResolvedConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| anyhow!("Unknown config format for: {}", path.display()))?;

    let config = parse_config_content(&content, format)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), ?format, "loaded configuration");

    Ok(ResolvedConfig {
        config: expand_env_vars(config),
        path: Some(path.to_path_buf()),
        format: Some(format),
    })
}

fn parse_config_content(content: &str, format: ConfigFormat) -> Result<TierwiseConfig> {
    match format {
        ConfigFormat::Jsonc => json5::from_str(content).context("Failed to parse JSONC"),
        ConfigFormat::Json => serde_json::from_str(content).context("Failed to parse JSON"),
        ConfigFormat::Yaml => serde_yaml_ng::from_str(content).context("Failed to parse YAML"),
    }
}

/// Compile a configuration into a ready router.
pub fn build_router(config: &TierwiseConfig) -> Result<Router> {
    Router::new(config.routing.clone(), config.resources.clone())
        .context("Failed to build router from configuration")
}

pub const CONFIG_CANDIDATES: &[&str] = &[
    "tierwise.jsonc",
    "tierwise.json",
    "tierwise.yml",
    "tierwise.yaml",
    ".tierwise.jsonc",
    ".tierwise.json",
    ".tierwise.yml",
    ".tierwise.yaml",
];

pub fn find_config_file() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    let home = env::var_os("HOME").map(PathBuf::from);
    find_config_file_in(&cwd, home.as_deref())
}

/// First candidate under `dir`, then under `<home>/.config/tierwise/`.
pub fn find_config_file_in(dir: &Path, home: Option<&Path>) -> Option<PathBuf> {
    candidate_paths(dir, home).find(|path| path.exists())
}

pub fn find_all_config_files() -> Vec<PathBuf> {
    let Ok(cwd) = env::current_dir() else {
        return Vec::new();
    };
    let home = env::var_os("HOME").map(PathBuf::from);
    candidate_paths(&cwd, home.as_deref())
        .filter(|path| path.exists())
        .collect()
}

fn candidate_paths<'a>(
    dir: &'a Path,
    home: Option<&'a Path>,
) -> impl Iterator<Item = PathBuf> + 'a {
    let local = CONFIG_CANDIDATES.iter().map(move |c| dir.join(c));
    let global = home.into_iter().flat_map(|home| {
        CONFIG_CANDIDATES
            .iter()
            .map(move |c| home.join(".config").join("tierwise").join(c))
    });
    local.chain(global)
}

fn expand_env_vars(mut config: TierwiseConfig) -> TierwiseConfig {
    for (_, id) in config.resources.iter_mut() {
        *id = expand_env_string(id.as_str()).into();
    }
    config
}

/// Expand `${VAR}` and `$VAR` references. Unset variables are left as written.
pub fn expand_env_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        if chars.peek() == Some(&'{') {
            chars.next();
            let mut var_name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                var_name.push(c);
            }
            if !closed {
                result.push_str("${");
                result.push_str(&var_name);
                continue;
            }
            match env::var(&var_name) {
                Ok(value) => result.push_str(&value),
                Err(_) => {
                    result.push_str("${");
                    result.push_str(&var_name);
                    result.push('}');
                }
            }
        } else {
            let mut var_name = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    var_name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            match env::var(&var_name) {
                Ok(value) if !var_name.is_empty() => result.push_str(&value),
                _ => {
                    result.push('$');
                    result.push_str(&var_name);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tierwise_router::Tier;

    #[test]
    fn test_expand_env_string_with_braces() {
        env::set_var("TIERWISE_TEST_VAR", "test_value");
        let result = expand_env_string("prefix_${TIERWISE_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");
    }

    #[test]
    fn test_expand_env_string_without_braces() {
        env::set_var("TIERWISE_TEST_VAR", "test_value");
        let result = expand_env_string("prefix_$TIERWISE_TEST_VAR");
        assert_eq!(result, "prefix_test_value");
    }

    #[test]
    fn test_expand_env_string_preserves_delimiter_after_var() {
        env::set_var("TIERWISE_TEST_VAR2", "value");
        let result = expand_env_string("model-$TIERWISE_TEST_VAR2-latest");
        assert_eq!(result, "model-value-latest");
    }

    #[test]
    fn test_expand_env_string_missing_var() {
        let result = expand_env_string("prefix_${TIERWISE_NONEXISTENT}_suffix");
        assert_eq!(result, "prefix_${TIERWISE_NONEXISTENT}_suffix");
        assert_eq!(expand_env_string("cost $"), "cost $");
    }

    #[test]
    fn test_expand_env_string_unterminated_braces_kept_verbatim() {
        env::set_var("TIERWISE_TEST_UNCLOSED", "value");
        assert_eq!(
            expand_env_string("model-${TIERWISE_TEST_UNCLOSED"),
            "model-${TIERWISE_TEST_UNCLOSED"
        );
        assert_eq!(expand_env_string("${"), "${");
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("tierwise.jsonc")),
            Some(ConfigFormat::Jsonc)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("tierwise.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("tierwise.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("tierwise.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("tierwise.toml")), None);
    }

    #[test]
    fn test_load_jsonc_with_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tierwise.jsonc");
        fs::write(
            &path,
            r#"{
  // cheaper model for lookups
  "resources": { "LOW": "small", "MEDIUM": "mid", "HIGH": "large" },
  /* tuned boundary */
  "routing": { "boundaries": { "medium_high": 0.7 } }
}"#,
        )
        .unwrap();

        let resolved = load_config_from_file(&path).unwrap();
        assert_eq!(resolved.format, Some(ConfigFormat::Jsonc));
        assert_eq!(resolved.config.routing.boundaries.medium_high, 0.7);
        assert_eq!(
            resolved.config.resources.select(Tier::Low).unwrap().as_str(),
            "small"
        );
    }

    #[test]
    fn test_load_yaml_expands_resource_env_vars() {
        env::set_var("TIERWISE_TEST_HIGH_MODEL", "opus-from-env");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tierwise.yml");
        fs::write(
            &path,
            "resources:\n  LOW: small\n  MEDIUM: mid\n  HIGH: ${TIERWISE_TEST_HIGH_MODEL}\n",
        )
        .unwrap();

        let resolved = load_config_from_file(&path).unwrap();
        assert_eq!(
            resolved.config.resources.select(Tier::High).unwrap().as_str(),
            "opus-from-env"
        );
    }

    #[test]
    fn test_invalid_content_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tierwise.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("tierwise.json"));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tierwise.toml");
        fs::write(&path, "").unwrap();
        assert!(load_config_from_file(&path).is_err());
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_config(Some(&dir.path().join("missing.yml"))).is_err());
    }

    #[test]
    fn test_config_priority_order() {
        assert_eq!(CONFIG_CANDIDATES[0], "tierwise.jsonc");
        assert_eq!(CONFIG_CANDIDATES[1], "tierwise.json");
        assert_eq!(CONFIG_CANDIDATES[2], "tierwise.yml");
        assert_eq!(CONFIG_CANDIDATES[3], "tierwise.yaml");
        assert_eq!(CONFIG_CANDIDATES[4], ".tierwise.jsonc");
        assert_eq!(CONFIG_CANDIDATES[7], ".tierwise.yaml");
    }

    #[test]
    fn test_find_prefers_local_over_global() {
        let local = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let global_dir = home.path().join(".config").join("tierwise");
        fs::create_dir_all(&global_dir).unwrap();
        fs::write(global_dir.join("tierwise.yaml"), "{}").unwrap();

        assert_eq!(
            find_config_file_in(local.path(), Some(home.path())),
            Some(global_dir.join("tierwise.yaml"))
        );

        fs::write(local.path().join(".tierwise.json"), "{}").unwrap();
        fs::write(local.path().join("tierwise.yml"), "{}").unwrap();
        assert_eq!(
            find_config_file_in(local.path(), Some(home.path())),
            Some(local.path().join("tierwise.yml"))
        );
    }

    #[test]
    fn test_find_returns_none_when_nothing_exists() {
        let local = TempDir::new().unwrap();
        assert_eq!(find_config_file_in(local.path(), None), None);
    }

    #[test]
    fn test_build_router_from_defaults() {
        let router = build_router(&TierwiseConfig::default()).unwrap();
        assert_eq!(router.quick_tier("oracle"), Tier::High);
    }

    #[test]
    fn test_build_router_reports_misconfiguration() {
        let mut config = TierwiseConfig::default();
        config.routing.boundaries.low_medium = 0.8;
        let err = build_router(&config).unwrap_err();
        assert!(format!("{err:#}").contains("misconfiguration"));
    }
}
