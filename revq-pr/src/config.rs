//! Configuration resolution for revq-pr
//!
//! One explicit structure holds every recognized option; defaults are
//! enumerated once as constants. Each option resolves through the
//! priority order: command line (port only) → environment → TOML file →
//! compiled default.

use revq_common::config::TomlConfig;

/// Default listen port
pub const DEFAULT_PORT: u16 = 3099;
/// Default state of the title-variation fallback
pub const DEFAULT_TITLE_VARIATIONS: bool = true;

/// Resolved service configuration
///
/// Notion credentials are optional at startup; the update endpoint
/// reports the missing option per request instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Notion integration token
    pub notion_api_key: Option<String>,
    /// Notion database holding the problem pages
    pub notion_database_id: Option<String>,
    /// Google Custom Search API key
    pub google_api_key: Option<String>,
    /// Google Custom Search engine id
    pub google_cx: Option<String>,
    /// Whether the title-variation fallback runs between the direct
    /// lookup and the web search
    pub title_variations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            notion_api_key: None,
            notion_database_id: None,
            google_api_key: None,
            google_cx: None,
            title_variations: DEFAULT_TITLE_VARIATIONS,
        }
    }
}

impl Config {
    /// Resolve configuration from CLI, environment, TOML file, and defaults.
    ///
    /// `cli_port` already carries the `REVQ_PORT` environment tier (clap
    /// reads it), so ports resolve CLI/ENV → TOML → default.
    pub fn resolve(cli_port: Option<u16>, toml: &TomlConfig) -> Self {
        Self {
            port: cli_port.or(toml.port).unwrap_or(DEFAULT_PORT),
            notion_api_key: env_string("REVQ_NOTION_API_KEY")
                .or_else(|| toml.notion_api_key.clone()),
            notion_database_id: env_string("REVQ_NOTION_DATABASE_ID")
                .or_else(|| toml.notion_database_id.clone()),
            google_api_key: env_string("REVQ_GOOGLE_API_KEY")
                .or_else(|| toml.google_api_key.clone()),
            google_cx: env_string("REVQ_GOOGLE_CX").or_else(|| toml.google_cx.clone()),
            title_variations: env_bool("REVQ_TITLE_VARIATIONS")
                .or(toml.title_variations)
                .unwrap_or(DEFAULT_TITLE_VARIATIONS),
        }
    }
}

/// Non-empty environment variable, or None
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Boolean environment variable; unrecognized values are ignored
fn env_bool(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            tracing::warn!(
                variable = name,
                value = other,
                "Unrecognized boolean value; ignoring"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 5] = [
        "REVQ_NOTION_API_KEY",
        "REVQ_NOTION_DATABASE_ID",
        "REVQ_GOOGLE_API_KEY",
        "REVQ_GOOGLE_CX",
        "REVQ_TITLE_VARIATIONS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_with_nothing_set() {
        clear_env();

        let config = Config::resolve(None, &TomlConfig::default());
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.notion_api_key.is_none());
        assert!(config.notion_database_id.is_none());
        assert!(config.google_api_key.is_none());
        assert!(config.google_cx.is_none());
        assert_eq!(config.title_variations, DEFAULT_TITLE_VARIATIONS);
    }

    #[test]
    #[serial]
    fn test_environment_beats_toml() {
        clear_env();
        std::env::set_var("REVQ_NOTION_API_KEY", "env-key");

        let toml = TomlConfig {
            notion_api_key: Some("toml-key".to_string()),
            ..Default::default()
        };

        let config = Config::resolve(None, &toml);
        assert_eq!(config.notion_api_key.as_deref(), Some("env-key"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_toml_fills_missing_environment() {
        clear_env();

        let toml = TomlConfig {
            port: Some(4100),
            notion_database_id: Some("db-from-toml".to_string()),
            ..Default::default()
        };

        let config = Config::resolve(None, &toml);
        assert_eq!(config.port, 4100);
        assert_eq!(config.notion_database_id.as_deref(), Some("db-from-toml"));
    }

    #[test]
    #[serial]
    fn test_cli_port_beats_toml_port() {
        clear_env();

        let toml = TomlConfig {
            port: Some(4100),
            ..Default::default()
        };

        let config = Config::resolve(Some(5000), &toml);
        assert_eq!(config.port, 5000);
    }

    #[test]
    #[serial]
    fn test_empty_environment_value_is_unset() {
        clear_env();
        std::env::set_var("REVQ_NOTION_API_KEY", "   ");

        let config = Config::resolve(None, &TomlConfig::default());
        assert!(config.notion_api_key.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_variation_toggle_from_environment() {
        clear_env();
        std::env::set_var("REVQ_TITLE_VARIATIONS", "false");

        let config = Config::resolve(None, &TomlConfig::default());
        assert!(!config.title_variations);

        std::env::set_var("REVQ_TITLE_VARIATIONS", "on");
        let config = Config::resolve(None, &TomlConfig::default());
        assert!(config.title_variations);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unrecognized_toggle_value_falls_through() {
        clear_env();
        std::env::set_var("REVQ_TITLE_VARIATIONS", "maybe");

        let toml = TomlConfig {
            title_variations: Some(false),
            ..Default::default()
        };

        let config = Config::resolve(None, &toml);
        assert!(!config.title_variations);

        clear_env();
    }
}
