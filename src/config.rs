use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Delayed match scan and confidence range.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_scan_delay_ms")]
    pub scan_delay_ms: u64,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,
    #[serde(default = "default_max_confidence")]
    pub max_confidence: u8,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            scan_delay_ms: default_scan_delay_ms(),
            min_confidence: default_min_confidence(),
            max_confidence: default_max_confidence(),
        }
    }
}

fn default_scan_delay_ms() -> u64 { 2000 }
fn default_min_confidence() -> u8 { 80 }
fn default_max_confidence() -> u8 { 100 }

/// Simulated typing delay and presence toggling.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_presence_interval_ms")]
    pub presence_interval_ms: u64,
    #[serde(default = "default_online_probability")]
    pub online_probability: f64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            presence_interval_ms: default_presence_interval_ms(),
            online_probability: default_online_probability(),
        }
    }
}

fn default_reply_delay_ms() -> u64 { 2000 }
fn default_presence_interval_ms() -> u64 { 10_000 }
fn default_online_probability() -> f64 { 0.9 }

/// Demo sign-in gates. There is no credential store; these are the fixed
/// values the verifier compares against.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            email_domain: default_email_domain(),
            otp_length: default_otp_length(),
        }
    }
}

fn default_admin_email() -> String { "lostfound@lostfound.com".to_string() }
fn default_admin_password() -> String { "admin@lostfound".to_string() }
fn default_email_domain() -> String { "@nirmauni.ac.in".to_string() }
fn default_otp_length() -> usize { 6 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with REUNITE)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., REUNITE__CHAT__REPLY_DELAY_MS -> chat.reply_delay_ms
            .add_source(
                Environment::with_prefix("REUNITE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("REUNITE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
