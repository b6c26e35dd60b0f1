//! Backend configuration from environment variables.

use crate::ApiError;

/// Supabase project location and public (anon) key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// Native builds load `.env` first; WASM builds have no process environment,
    /// so the values are baked in at compile time.
    pub fn from_env() -> Result<Self, ApiError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();

            let url = std::env::var("SUPABASE_URL")
                .map_err(|_| ApiError::Config("SUPABASE_URL not set".to_string()))?;
            let anon_key = std::env::var("SUPABASE_ANON_KEY")
                .map_err(|_| ApiError::Config("SUPABASE_ANON_KEY not set".to_string()))?;
            Self::validated(url, anon_key)
        }

        #[cfg(target_arch = "wasm32")]
        {
            let url = option_env!("SUPABASE_URL")
                .ok_or_else(|| ApiError::Config("SUPABASE_URL not set".to_string()))?;
            let anon_key = option_env!("SUPABASE_ANON_KEY")
                .ok_or_else(|| ApiError::Config("SUPABASE_ANON_KEY not set".to_string()))?;
            Self::validated(url.to_string(), anon_key.to_string())
        }
    }

    fn validated(url: String, anon_key: String) -> Result<Self, ApiError> {
        let url = url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ApiError::Config(format!("Invalid SUPABASE_URL: {url}")));
        }
        if anon_key.trim().is_empty() {
            return Err(ApiError::Config("SUPABASE_ANON_KEY is empty".to_string()));
        }
        Ok(Self::new(url, anon_key.trim()))
    }

    /// `{url}/auth/v1/{path}`
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }

    /// `{url}/rest/v1/{collection}`
    pub fn rest_endpoint(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.url, collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let config = BackendConfig::new("https://abc.supabase.co/", "anon");
        assert_eq!(
            config.auth_endpoint("token?grant_type=password"),
            "https://abc.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(
            config.rest_endpoint("interest_topics"),
            "https://abc.supabase.co/rest/v1/interest_topics"
        );
    }

    #[test]
    fn test_validated_rejects_bad_values() {
        assert!(BackendConfig::validated("abc.supabase.co".into(), "anon".into()).is_err());
        assert!(BackendConfig::validated("https://abc.supabase.co".into(), "  ".into()).is_err());
        let ok = BackendConfig::validated(" https://abc.supabase.co ".into(), "anon".into()).unwrap();
        assert_eq!(ok.url, "https://abc.supabase.co");
    }
}
