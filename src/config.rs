use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Default fixture served when `USE_LINKUP_MOCK=true`.
const DEFAULT_MOCK_PATH: &str = "testcases/mock_search_response.json";

/// Process-wide configuration, read from the environment once at startup
/// and passed by value into the components that need it. Immutable after
/// startup; provider clients are constructed from it rather than reaching
/// for global singletons.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the Linkup search provider.
    pub linkup_api_key: String,
    /// API key for the Gemini completion provider.
    pub gemini_api_key: String,
    /// When true, the search step reads a local fixture instead of
    /// calling the search provider.
    pub mock_mode: bool,
    /// Path to the fixture file served in mock mode.
    pub mock_path: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from the environment. Call `dotenvy::dotenv()`
    /// first so a local `.env` file is honored.
    ///
    /// Provider keys are only required when mock mode is off: the mock
    /// path must work on a machine with no credentials at all for the
    /// search step, though Gemini is still attempted for artifacts.
    pub fn from_env() -> Result<Self, AppError> {
        let mock_mode = std::env::var("USE_LINKUP_MOCK")
            .map(|v| v == "true")
            .unwrap_or(false);

        let linkup_api_key = std::env::var("LINKUP_API_KEY").unwrap_or_default();
        if !mock_mode && linkup_api_key.is_empty() {
            return Err(AppError::InvalidInput(
                "LINKUP_API_KEY is required unless USE_LINKUP_MOCK=true".into(),
            ));
        }

        let gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        if !mock_mode && gemini_api_key.is_empty() {
            return Err(AppError::InvalidInput(
                "GEMINI_API_KEY is required unless USE_LINKUP_MOCK=true".into(),
            ));
        }

        let mock_path = std::env::var("LINKUP_MOCK_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MOCK_PATH));

        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::InvalidInput(format!("PORT is not a valid port: {raw}")))?,
            Err(_) => 5000,
        };

        Ok(Self {
            linkup_api_key,
            gemini_api_key,
            mock_mode,
            mock_path,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this binary that touches process env, so no races
    // with parallel test threads.
    #[test]
    fn mock_mode_needs_no_provider_keys() {
        std::env::set_var("USE_LINKUP_MOCK", "true");
        std::env::remove_var("LINKUP_API_KEY");
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("LINKUP_MOCK_PATH");
        std::env::remove_var("PORT");

        let cfg = Config::from_env().unwrap();
        assert!(cfg.mock_mode);
        assert_eq!(cfg.mock_path, PathBuf::from(DEFAULT_MOCK_PATH));
        assert_eq!(cfg.bind_addr.port(), 5000);
    }

    #[test]
    fn config_is_cloneable_for_injection() {
        let cfg = Config {
            linkup_api_key: "lk".into(),
            gemini_api_key: "gm".into(),
            mock_mode: true,
            mock_path: PathBuf::from(DEFAULT_MOCK_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
        };
        let copy = cfg.clone();
        assert_eq!(copy.bind_addr.port(), 5000);
        assert!(copy.mock_mode);
    }
}
