mod schema;

pub use schema::{Config, ServerConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Get the config directory path (~/.config/perf-scorer/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("perf-scorer"))
}

/// Get the default config file path (~/.config/perf-scorer/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, the default path is
///   tried and built-in defaults are used when it does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => match get_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))
}

/// Parse configuration from YAML text.
pub fn parse_config(yaml: &str) -> Result<Config> {
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_saphyr::from_str(yaml)?;
    Ok(config)
}

/// A debug flag is on only when it spells `true`, in any case.
pub fn parse_debug_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Values from the command line or environment that win over the file.
#[derive(Debug, Default, Clone)]
pub struct ServerOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: Option<String>,
}

/// Older deployments set the port and debug flag under these names.
pub const LEGACY_PORT_ENV: &str = "FASTAPI_PORT";
pub const LEGACY_DEBUG_ENV: &str = "FASTAPI_DEBUG";

impl ServerOverrides {
    /// Fill an unset port or debug flag from [`LEGACY_PORT_ENV`] and
    /// [`LEGACY_DEBUG_ENV`], read through `lookup`.
    pub fn or_legacy_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.port.is_none() {
            if let Some(raw) = lookup(LEGACY_PORT_ENV) {
                let port = raw
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("Invalid {}: {:?}", LEGACY_PORT_ENV, raw))?;
                self.port = Some(port);
            }
        }
        if self.debug.is_none() {
            self.debug = lookup(LEGACY_DEBUG_ENV);
        }
        Ok(self)
    }
}

impl ServerConfig {
    pub fn apply(&mut self, overrides: &ServerOverrides) {
        if let Some(ref host) = overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(ref debug) = overrides.debug {
            self.debug = parse_debug_flag(debug);
        }
    }

    /// Parsed `request_timeout`.
    pub fn request_timeout(&self) -> Result<Duration> {
        humantime::parse_duration(self.request_timeout.trim()).with_context(|| {
            format!(
                "server.request_timeout: invalid duration '{}'",
                self.request_timeout
            )
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Validate server configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_server(config: &ServerConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.host.trim().is_empty() {
        errors.push("server.host: must not be empty".to_string());
    }
    if config.max_upload_bytes == 0 {
        errors.push("server.max_upload_bytes: must be positive".to_string());
    }
    match config.request_timeout() {
        Ok(d) if d.is_zero() => errors.push("server.request_timeout: must be positive".to_string()),
        Ok(_) => {}
        Err(e) => errors.push(e.to_string()),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8050);
        assert!(config.debug);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.request_timeout().unwrap(), Duration::from_secs(30));
        assert_eq!(config.bind_addr(), "0.0.0.0:8050");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 9000
  debug: false
  max_upload_bytes: 1024
  request_timeout: 2m
scoring:
  max_score: 100
  thresholds:
    excellent: 95
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert!(!config.server.debug);
        assert_eq!(config.server.max_upload_bytes, 1024);
        assert_eq!(config.server.request_timeout().unwrap(), Duration::from_secs(120));
        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.thresholds.excellent, 95.0);
        assert_eq!(scoring.thresholds.good, 75.0);
    }

    #[test]
    fn test_parse_partial_server_config() {
        let config = parse_config("server:\n  port: 8100\n").unwrap();
        assert_eq!(config.server.port, 8100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.scoring.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_unknown_key_fails() {
        assert!(parse_config("listen: 80\n").is_err());
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let result = load_config(Some(PathBuf::from("/nonexistent/perf-scorer.yaml")));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 7001").unwrap();
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 7001);
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [not, a, map").unwrap();
        let err = load_config(Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_parse_debug_flag() {
        assert!(parse_debug_flag("true"));
        assert!(parse_debug_flag("TRUE"));
        assert!(parse_debug_flag(" True "));
        assert!(!parse_debug_flag("false"));
        assert!(!parse_debug_flag("1"));
        assert!(!parse_debug_flag("yes"));
        assert!(!parse_debug_flag(""));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = ServerConfig::default();
        config.apply(&ServerOverrides {
            host: Some("127.0.0.1".to_string()),
            port: Some(9999),
            debug: Some("false".to_string()),
        });
        assert_eq!(config.bind_addr(), "127.0.0.1:9999");
        assert!(!config.debug);
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut config = ServerConfig {
            port: 1234,
            debug: false,
            ..ServerConfig::default()
        };
        config.apply(&ServerOverrides::default());
        assert_eq!(config.port, 1234);
        assert!(!config.debug);
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_legacy_env_fills_unset_values() {
        let overrides = ServerOverrides::default()
            .or_legacy_env(env(&[("FASTAPI_PORT", "9000"), ("FASTAPI_DEBUG", "False")]))
            .unwrap();
        let mut config = ServerConfig::default();
        config.apply(&overrides);
        assert_eq!(config.port, 9000);
        assert!(!config.debug);
    }

    #[test]
    fn test_legacy_env_loses_to_explicit_values() {
        let overrides = ServerOverrides {
            port: Some(7000),
            debug: Some("true".to_string()),
            ..ServerOverrides::default()
        }
        .or_legacy_env(env(&[("FASTAPI_PORT", "9000"), ("FASTAPI_DEBUG", "false")]))
        .unwrap();
        assert_eq!(overrides.port, Some(7000));
        assert_eq!(overrides.debug.as_deref(), Some("true"));
    }

    #[test]
    fn test_legacy_env_absent() {
        let overrides = ServerOverrides::default().or_legacy_env(env(&[])).unwrap();
        assert_eq!(overrides.port, None);
        assert_eq!(overrides.debug, None);
    }

    #[test]
    fn test_legacy_env_bad_port() {
        let err = ServerOverrides::default()
            .or_legacy_env(env(&[("FASTAPI_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("FASTAPI_PORT"));
    }

    #[test]
    fn test_validate_server() {
        assert!(validate_server(&ServerConfig::default()).is_ok());

        let config = ServerConfig {
            host: " ".to_string(),
            max_upload_bytes: 0,
            request_timeout: "soon".to_string(),
            ..ServerConfig::default()
        };
        let errors = validate_server(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[2].contains("server.request_timeout"));
    }
}
