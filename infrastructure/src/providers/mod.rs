//! HTTP adapters for the generation and search ports.

pub mod openrouter;
pub mod serpapi;
pub mod unavailable;

pub use openrouter::OpenRouterProvider;
pub use serpapi::SerpApiSearch;
pub use unavailable::UnavailableProvider;

use agenda_application::ProviderError;

/// Map a transport-level reqwest failure to a provider error.
pub(crate) fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::ConnectionError(e.to_string())
    }
}

/// Read an API key from the environment.
pub(crate) fn api_key_from_env(var: &str, section: &str) -> Result<String, ProviderError> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ProviderError::Misconfigured(format!(
            "API key not found in environment variable '{}'. \
             Set it or configure a different api_key_env in [{}].",
            var, section
        ))),
    }
}
