use std::fmt;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u64 = 1000;
pub const SETTINGS_DIRECTORY_NAME: &str = "nexo";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const SETTINGS_ENV_PREFIX: &str = "NEXO_";

/// Non-secret gateway knobs, layered from defaults, a settings file and `NEXO_*` env vars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u64,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            max_output_tokens: default_max_output_tokens(),
            base_url: None,
        }
    }
}

impl GatewaySettings {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".nexo"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed(SETTINGS_ENV_PREFIX))
            .extract::<Self>()
            .context(ExtractSnafu {
                stage: "extract-gateway-settings",
                path: path.to_path_buf(),
            })?;

        Ok(settings.normalized())
    }

    fn normalized(mut self) -> Self {
        self.model_id = self.model_id.trim().to_string();
        if self.model_id.is_empty() {
            self.model_id = default_model_id();
        }

        self.base_url = self
            .base_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        self
    }
}

/// Everything the Gemini gateway needs. The API key comes only from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub settings: GatewaySettings,
}

impl GatewayConfig {
    pub fn new(api_key: Option<String>, settings: GatewaySettings) -> Self {
        Self {
            api_key: api_key
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            settings,
        }
    }

    /// Reads `GEMINI_API_KEY` and the layered settings.
    ///
    /// A missing key is not an error here: it is reported on first use so the
    /// user sees it in the conversation. Broken settings fall back to defaults.
    pub fn load() -> Self {
        let path = GatewaySettings::default_config_path();
        let settings = match GatewaySettings::load_from(&path) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(path = ?path, error = %error, "failed to load gateway settings, using defaults");
                GatewaySettings::default()
            }
        };

        let config = Self::new(std::env::var(GEMINI_API_KEY_ENV).ok(), settings);
        if !config.has_api_key() {
            tracing::error!(
                env_var = GEMINI_API_KEY_ENV,
                "Gemini API key is not configured; requests will fail until it is set"
            );
        }
        config
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("settings", &self.settings)
            .finish()
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read gateway settings from {path:?} on `{stage}`: {source}"))]
    Extract {
        stage: &'static str,
        path: PathBuf,
        source: figment::Error,
    },
}

fn default_model_id() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_max_output_tokens() -> u64 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn missing_settings_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("settings.json");
            let settings = GatewaySettings::load_from(&path).expect("defaults load");

            assert_eq!(settings, GatewaySettings::default());
            assert_eq!(settings.model_id, "gemini-flash-latest");
            assert_eq!(settings.max_output_tokens, 1000);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_settings_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "settings.json",
                r#"{ "model_id": "gemini-pro", "max_output_tokens": 512, "base_url": "  " }"#,
            )?;
            jail.set_env("NEXO_MAX_OUTPUT_TOKENS", "256");

            let path = jail.directory().join("settings.json");
            let settings = GatewaySettings::load_from(&path).expect("settings load");

            assert_eq!(settings.model_id, "gemini-pro");
            assert_eq!(settings.max_output_tokens, 256);
            assert_eq!(settings.base_url, None);
            Ok(())
        });
    }

    #[test]
    fn zero_output_cap_is_kept_as_configured() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.json", r#"{ "max_output_tokens": 0 }"#)?;

            let path = jail.directory().join("settings.json");
            let settings = GatewaySettings::load_from(&path).expect("settings load");

            assert_eq!(settings.max_output_tokens, 0);
            Ok(())
        });
    }

    #[test]
    fn malformed_settings_report_extract_error() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.json", r#"{ "max_output_tokens": "lots" }"#)?;

            let path = jail.directory().join("settings.json");
            let error = GatewaySettings::load_from(&path).expect_err("invalid type");

            assert!(matches!(error, ConfigError::Extract { .. }));
            Ok(())
        });
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = GatewayConfig::new(Some("   ".to_string()), GatewaySettings::default());
        assert!(!config.has_api_key());

        let config = GatewayConfig::new(Some(" key ".to_string()), GatewaySettings::default());
        assert_eq!(config.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = GatewayConfig::new(Some("secret".to_string()), GatewaySettings::default());
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
