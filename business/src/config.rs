use log::info;
use serde::Deserialize;
use std::env::vars;

/// Public REST API backing the console.
pub const DEFAULT_API_BASE_URL: &str = "https://volun-api-eight.vercel.app";

/// Identity Toolkit host used for credential sign-in.
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    pub identity_base_url: String,
    /// Web API key of the identity project. Sign-in is refused while this is unset.
    pub identity_api_key: Option<String>,
}

impl BusinessConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: trim_base(api_base_url.into()),
            ..Self::default()
        }
    }

    /// Points both the REST API and the identity provider at the same host.
    ///
    /// Used by tests that serve every endpoint from one mock server.
    pub fn single_host(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = trim_base(base_url.into());
        Self {
            api_base_url: base_url.clone(),
            identity_base_url: base_url,
            identity_api_key: Some(api_key.into()),
        }
    }

    /// Reads `VOLUN_*` variables from the process environment.
    pub fn from_env() -> Result<Self, serde_env::Error> {
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let RawConfig {
            volun_api_base_url,
            volun_identity_base_url,
            volun_identity_api_key,
        } = raw;

        let api_base_url = match volun_api_base_url {
            Some(url) => {
                info!("Using provided VOLUN_API_BASE_URL: {url}");
                url
            }
            None => DEFAULT_API_BASE_URL.to_owned(),
        };

        let identity_base_url =
            volun_identity_base_url.unwrap_or_else(|| DEFAULT_IDENTITY_BASE_URL.to_owned());

        Self {
            api_base_url: trim_base(api_base_url),
            identity_base_url: trim_base(identity_base_url),
            identity_api_key: volun_identity_api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Joins `path` onto the REST API base.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    pub fn identity_api_key(&self) -> Option<&str> {
        self.identity_api_key.as_deref()
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_owned(),
            identity_api_key: None,
        }
    }
}

// Every field is optional; defaults are applied in `from_raw`.
#[derive(Deserialize)]
struct RawConfig {
    volun_api_base_url: Option<String>,
    volun_identity_base_url: Option<String>,
    volun_identity_api_key: Option<String>,
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}
