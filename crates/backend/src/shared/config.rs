use contracts::shared::format::CurrencyFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding `[dataset].path`
pub const DATASET_ENV_VAR: &str = "DASHBOARD_DATASET";

/// Currency the bundled dataset is denominated in
pub const DATASET_CURRENCY: &str = "BRL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "all_datafix.csv".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// ISO 4217 code used for the revenue metric
    pub currency: String,
    /// Locale name controlling separators, e.g. "pt_BR"
    pub locale: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: DATASET_CURRENCY.to_string(),
            locale: "pt_BR".to_string(),
        }
    }
}

impl Config {
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::resolve(&self.display.currency, &self.display.locale)
    }

    /// `true` when revenue would be labelled with a currency other than the
    /// one the dataset is recorded in
    pub fn currency_mismatch(&self) -> bool {
        !self.display.currency.eq_ignore_ascii_case(DATASET_CURRENCY)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[dataset]
path = "all_datafix.csv"

[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[display]
currency = "BRL"
locale = "pt_BR"
"#;

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Get the dataset file path from configuration
///
/// `DASHBOARD_DATASET` wins over the config file. A relative path is looked
/// up next to the executable first, then in the working directory.
pub fn get_dataset_path(config: &Config) -> PathBuf {
    let configured = std::env::var(DATASET_ENV_VAR).unwrap_or_else(|_| config.dataset.path.clone());
    let dataset_path = Path::new(&configured);

    if dataset_path.is_absolute() {
        return dataset_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(dataset_path);
            if resolved_path.exists() {
                return resolved_path;
            }
        }
    }

    PathBuf::from(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.dataset.path, "all_datafix.csv");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
        assert!(!config.currency_mismatch());
    }

    #[test]
    fn test_workspace_config_matches_embedded_default() {
        let workspace = parse_config(include_str!("../../../../config.toml")).unwrap();
        let embedded = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(workspace.dataset.path, embedded.dataset.path);
        assert_eq!(workspace.server.port, embedded.server.port);
        assert_eq!(workspace.server.static_dir, embedded.server.static_dir);
        assert_eq!(workspace.display.currency, embedded.display.currency);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dataset.path, "all_datafix.csv");
        assert_eq!(config.display.locale, "pt_BR");
    }

    #[test]
    fn test_currency_mismatch_detected() {
        let config = parse_config("[display]\ncurrency = \"AUD\"\nlocale = \"es_CO\"\n").unwrap();
        assert!(config.currency_mismatch());
        assert_eq!(config.currency_format().symbol, "AU$");
    }

    #[test]
    fn test_absolute_dataset_path_kept() {
        let mut config = Config::default();
        config.dataset.path = "/data/orders.csv".to_string();
        if std::env::var(DATASET_ENV_VAR).is_err() {
            assert_eq!(get_dataset_path(&config), PathBuf::from("/data/orders.csv"));
        }
    }
}
