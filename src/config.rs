//! Environment-driven configuration.
//!
//! All knobs come from the environment: the NIM bearer credential, the
//! listen port, and overridable base URLs for the two external APIs
//! (tests point these at local stubs).

/// Application-level constants
pub const APP_NAME: &str = "DrugSafe";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// OpenAI-compatible NVIDIA NIM endpoint.
pub const DEFAULT_NIM_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";

/// Public openFDA API root (no key required at low request rates).
pub const DEFAULT_OPENFDA_BASE_URL: &str = "https://api.fda.gov";

/// Nemotron model served through NIM.
pub const NEMOTRON_MODEL: &str = "nvidia/llama-3.3-nemotron-super-49b-v1";

const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// NIM bearer credential. Empty means "not configured" — the check
    /// endpoint reports this instead of attempting a request.
    pub api_key: String,
    pub nim_base_url: String,
    pub openfda_base_url: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `NVIDIA_API_KEY` — bearer credential for NIM (default empty).
    /// `NVIDIA_BASE_URL` / `OPENFDA_BASE_URL` — endpoint overrides.
    /// `PORT` — listen port (default 5000).
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            api_key: std::env::var("NVIDIA_API_KEY").unwrap_or_default(),
            nim_base_url: std::env::var("NVIDIA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NIM_BASE_URL.to_string()),
            openfda_base_url: std::env::var("OPENFDA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENFDA_BASE_URL.to_string()),
            model: NEMOTRON_MODEL.to_string(),
            port,
        }
    }

    /// Whether the NIM credential is present.
    pub fn api_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            nim_base_url: DEFAULT_NIM_BASE_URL.to_string(),
            openfda_base_url: DEFAULT_OPENFDA_BASE_URL.to_string(),
            model: NEMOTRON_MODEL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "drugsafe=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_public_endpoints() {
        let config = Config::default();
        assert_eq!(config.nim_base_url, "https://integrate.api.nvidia.com/v1");
        assert_eq!(config.openfda_base_url, "https://api.fda.gov");
        assert_eq!(config.port, 5000);
        assert!(!config.api_configured());
    }

    #[test]
    fn configured_when_key_present() {
        let config = Config {
            api_key: "nvapi-test".into(),
            ..Config::default()
        };
        assert!(config.api_configured());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn model_is_nemotron() {
        assert!(NEMOTRON_MODEL.contains("nemotron"));
    }
}
