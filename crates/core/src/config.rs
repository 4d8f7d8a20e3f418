use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub twilio: TwilioConfig,
    pub llm: LlmConfig,
    pub pricing: crate::pricing::PricingConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: SecretString,
    pub from_address: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub enabled: bool,
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_from_address: Option<String>,
    pub llm_enabled: Option<bool>,
    pub llm_api_key: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            twilio: TwilioConfig {
                account_sid: String::new(),
                auth_token: String::new().into(),
                from_address: String::new(),
                timeout_secs: 15,
            },
            llm: LlmConfig {
                enabled: false,
                api_key: None,
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                max_tokens: 200,
                timeout_secs: 20,
            },
            pricing: crate::pricing::PricingConfig::default(),
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("preventivo.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(twilio) = patch.twilio {
            if let Some(account_sid) = twilio.account_sid {
                self.twilio.account_sid = account_sid;
            }
            if let Some(auth_token_value) = twilio.auth_token {
                self.twilio.auth_token = secret_value(auth_token_value);
            }
            if let Some(from_address) = twilio.from_address {
                self.twilio.from_address = from_address;
            }
            if let Some(timeout_secs) = twilio.timeout_secs {
                self.twilio.timeout_secs = timeout_secs;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(enabled) = llm.enabled {
                self.llm.enabled = enabled;
            }
            if let Some(api_key_value) = llm.api_key {
                self.llm.api_key = Some(secret_value(api_key_value));
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(max_tokens) = llm.max_tokens {
                self.llm.max_tokens = max_tokens;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(pricing) = patch.pricing {
            if let Some(hourly_rate) = pricing.hourly_rate {
                self.pricing.hourly_rate = hourly_rate;
            }
            if let Some(profit_margin) = pricing.profit_margin {
                self.pricing.profit_margin = profit_margin;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("PREVENTIVO_TWILIO_ACCOUNT_SID") {
            self.twilio.account_sid = value;
        }
        if let Some(value) = read_env("PREVENTIVO_TWILIO_AUTH_TOKEN") {
            self.twilio.auth_token = secret_value(value);
        }
        if let Some(value) = read_env("PREVENTIVO_TWILIO_FROM_ADDRESS") {
            self.twilio.from_address = value;
        }
        if let Some(value) = read_env("PREVENTIVO_TWILIO_TIMEOUT_SECS") {
            self.twilio.timeout_secs = parse_u64("PREVENTIVO_TWILIO_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("PREVENTIVO_LLM_ENABLED") {
            self.llm.enabled = parse_bool("PREVENTIVO_LLM_ENABLED", &value)?;
        }
        if let Some(value) = read_env("PREVENTIVO_LLM_API_KEY") {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("PREVENTIVO_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("PREVENTIVO_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("PREVENTIVO_LLM_MAX_TOKENS") {
            self.llm.max_tokens = parse_u32("PREVENTIVO_LLM_MAX_TOKENS", &value)?;
        }
        if let Some(value) = read_env("PREVENTIVO_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("PREVENTIVO_LLM_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("PREVENTIVO_PRICING_HOURLY_RATE") {
            self.pricing.hourly_rate = parse_decimal("PREVENTIVO_PRICING_HOURLY_RATE", &value)?;
        }
        if let Some(value) = read_env("PREVENTIVO_PRICING_PROFIT_MARGIN") {
            self.pricing.profit_margin = parse_decimal("PREVENTIVO_PRICING_PROFIT_MARGIN", &value)?;
        }

        if let Some(value) = read_env("PREVENTIVO_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("PREVENTIVO_SERVER_PORT") {
            self.server.port = parse_u16("PREVENTIVO_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("PREVENTIVO_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("PREVENTIVO_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        let log_level =
            read_env("PREVENTIVO_LOGGING_LEVEL").or_else(|| read_env("PREVENTIVO_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("PREVENTIVO_LOGGING_FORMAT").or_else(|| read_env("PREVENTIVO_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(account_sid) = overrides.twilio_account_sid {
            self.twilio.account_sid = account_sid;
        }
        if let Some(auth_token) = overrides.twilio_auth_token {
            self.twilio.auth_token = secret_value(auth_token);
        }
        if let Some(from_address) = overrides.twilio_from_address {
            self.twilio.from_address = from_address;
        }
        if let Some(enabled) = overrides.llm_enabled {
            self.llm.enabled = enabled;
        }
        if let Some(api_key) = overrides.llm_api_key {
            self.llm.api_key = Some(secret_value(api_key));
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_twilio(&self.twilio)?;
        validate_llm(&self.llm)?;
        validate_pricing(&self.pricing)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("preventivo.toml"), PathBuf::from("config/preventivo.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_twilio(twilio: &TwilioConfig) -> Result<(), ConfigError> {
    let account_sid = twilio.account_sid.trim();
    if account_sid.is_empty() {
        return Err(ConfigError::Validation(
            "twilio.account_sid is required. Get it from https://console.twilio.com > Account Info"
                .to_string(),
        ));
    }
    if !account_sid.starts_with("AC") {
        return Err(ConfigError::Validation(
            "twilio.account_sid must start with `AC`".to_string(),
        ));
    }

    if twilio.auth_token.expose_secret().is_empty() {
        return Err(ConfigError::Validation(
            "twilio.auth_token is required. Get it from https://console.twilio.com > Account Info"
                .to_string(),
        ));
    }

    if !twilio.from_address.starts_with("whatsapp:") {
        return Err(ConfigError::Validation(
            "twilio.from_address must be a `whatsapp:<E.164>` address, e.g. `whatsapp:+14155238886`"
                .to_string(),
        ));
    }

    if twilio.timeout_secs == 0 || twilio.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "twilio.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    if !llm.enabled {
        return Ok(());
    }

    let missing =
        llm.api_key.as_ref().map(|value| value.expose_secret().trim().is_empty()).unwrap_or(true);
    if missing {
        return Err(ConfigError::Validation(
            "llm.api_key is required when llm.enabled is true".to_string(),
        ));
    }

    if llm.base_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "llm.base_url is required when llm.enabled is true".to_string(),
        ));
    }

    if llm.max_tokens == 0 || llm.max_tokens > 4096 {
        return Err(ConfigError::Validation(
            "llm.max_tokens must be in range 1..=4096".to_string(),
        ));
    }

    if llm.timeout_secs == 0 || llm.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "llm.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_pricing(pricing: &crate::pricing::PricingConfig) -> Result<(), ConfigError> {
    if pricing.hourly_rate <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "pricing.hourly_rate must be greater than zero".to_string(),
        ));
    }

    if pricing.profit_margin <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "pricing.profit_margin must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(value).map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    twilio: Option<TwilioPatch>,
    llm: Option<LlmPatch>,
    pricing: Option<PricingPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioPatch {
    account_sid: Option<String>,
    auth_token: Option<String>,
    from_address: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    enabled: Option<bool>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    hourly_rate: Option<Decimal>,
    profit_margin: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    fn valid_twilio_overrides() -> ConfigOverrides {
        ConfigOverrides {
            twilio_account_sid: Some("ACtest".to_string()),
            twilio_auth_token: Some("token".to_string()),
            twilio_from_address: Some("whatsapp:+14155238886".to_string()),
            ..ConfigOverrides::default()
        }
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_TWILIO_AUTH_TOKEN", "token-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("preventivo.toml");
            fs::write(
                &path,
                r#"
[twilio]
account_sid = "ACfromfile"
auth_token = "${TEST_TWILIO_AUTH_TOKEN}"
from_address = "whatsapp:+14155238886"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.twilio.auth_token.expose_secret() == "token-from-env",
                "auth token should be loaded from environment",
            )?;
            ensure(
                config.twilio.account_sid == "ACfromfile",
                "account sid should be loaded from file",
            )?;
            Ok(())
        })();

        clear_vars(&["TEST_TWILIO_AUTH_TOKEN"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("PREVENTIVO_TWILIO_ACCOUNT_SID", "ACfromenv");
        env::set_var("PREVENTIVO_TWILIO_AUTH_TOKEN", "token-from-env");
        env::set_var("PREVENTIVO_TWILIO_FROM_ADDRESS", "whatsapp:+15550000000");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("preventivo.toml");
            fs::write(
                &path,
                r#"
[twilio]
account_sid = "ACfromfile"
auth_token = "token-from-file"
from_address = "whatsapp:+14155238886"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.twilio.account_sid == "ACfromenv", "env account sid should win")?;
            ensure(
                config.twilio.auth_token.expose_secret() == "token-from-env",
                "env auth token should win over file and defaults",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            Ok(())
        })();

        clear_vars(&[
            "PREVENTIVO_TWILIO_ACCOUNT_SID",
            "PREVENTIVO_TWILIO_AUTH_TOKEN",
            "PREVENTIVO_TWILIO_FROM_ADDRESS",
        ]);
        result
    }

    #[test]
    fn validation_fails_fast_without_twilio_credentials() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let error = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => return Err("expected validation failure but config load succeeded".to_string()),
            Err(error) => error,
        };
        let has_message = matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("twilio.account_sid")
        );
        ensure(has_message, "validation failure should mention twilio.account_sid")
    }

    #[test]
    fn validation_rejects_non_whatsapp_from_address() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let error = match AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                twilio_from_address: Some("+14155238886".to_string()),
                ..valid_twilio_overrides()
            },
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected validation failure but config load succeeded".to_string()),
            Err(error) => error,
        };
        let has_message = matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("twilio.from_address")
        );
        ensure(has_message, "validation failure should mention twilio.from_address")
    }

    #[test]
    fn llm_api_key_required_when_enabled() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let error = match AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                llm_enabled: Some(true),
                ..valid_twilio_overrides()
            },
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected validation failure but config load succeeded".to_string()),
            Err(error) => error,
        };
        let has_message = matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("llm.api_key")
        );
        ensure(has_message, "validation failure should mention llm.api_key")
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("PREVENTIVO_TWILIO_ACCOUNT_SID", "ACtest");
        env::set_var("PREVENTIVO_TWILIO_AUTH_TOKEN", "token");
        env::set_var("PREVENTIVO_TWILIO_FROM_ADDRESS", "whatsapp:+14155238886");
        env::set_var("PREVENTIVO_LOG_LEVEL", "warn");
        env::set_var("PREVENTIVO_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&[
            "PREVENTIVO_TWILIO_ACCOUNT_SID",
            "PREVENTIVO_TWILIO_AUTH_TOKEN",
            "PREVENTIVO_TWILIO_FROM_ADDRESS",
            "PREVENTIVO_LOG_LEVEL",
            "PREVENTIVO_LOG_FORMAT",
        ]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                twilio_auth_token: Some("super-secret-token".to_string()),
                ..valid_twilio_overrides()
            },
            ..LoadOptions::default()
        })
        .map_err(|err| format!("config load failed: {err}"))?;
        let debug = format!("{config:?}");

        ensure(!debug.contains("super-secret-token"), "debug output should not contain auth token")
    }
}
