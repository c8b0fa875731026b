//! Credential gate.
//!
//! The host environment owns key selection. The gate only asks it whether a
//! key is selected, asks it to open its picker, and reads the current key.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use animlogo_genai::ApiKey;

use crate::error::{CredentialError, StudioError, StudioResult};

/// Environment variables consulted by [`EnvCredentialProvider`], in order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Host-side credential selection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Whether a key is currently selected.
    async fn has_credential(&self) -> Result<bool, CredentialError>;

    /// Open the host picker. Resolves once the user is done.
    async fn select_credential(&self) -> Result<(), CredentialError>;

    /// The currently selected key.
    fn api_key(&self) -> Option<ApiKey>;
}

/// Reads the key from the process environment.
///
/// Selecting re-reads `.env`, so a key written there after startup is
/// picked up.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn has_credential(&self) -> Result<bool, CredentialError> {
        Ok(self.api_key().is_some())
    }

    async fn select_credential(&self) -> Result<(), CredentialError> {
        match dotenvy::dotenv_override() {
            Ok(path) => debug!("Reloaded environment from {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file to reload"),
            Err(e) => return Err(CredentialError::Host(e.to_string())),
        }

        if self.api_key().is_some() {
            Ok(())
        } else {
            Err(CredentialError::NotSelected)
        }
    }

    fn api_key(&self) -> Option<ApiKey> {
        API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(ApiKey::new)
    }
}

/// Gate in front of every endpoint call.
#[derive(Clone)]
pub struct CredentialGate {
    provider: Arc<dyn CredentialProvider>,
}

impl CredentialGate {
    pub fn new(provider: Arc<dyn CredentialProvider>) -> Self {
        Self { provider }
    }

    /// Whether a key is selected. Provider failures count as "no".
    pub async fn has_credential(&self) -> bool {
        match self.provider.has_credential().await {
            Ok(selected) => selected,
            Err(e) => {
                warn!("Credential check failed: {}", e);
                false
            }
        }
    }

    /// Ask the host to select a key.
    pub async fn request_credential(&self) -> StudioResult<()> {
        self.provider.select_credential().await?;
        Ok(())
    }

    /// Key for the next endpoint call.
    pub fn api_key(&self) -> StudioResult<ApiKey> {
        self.provider.api_key().ok_or(StudioError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    async fn test_gate_treats_provider_error_as_missing() {
        let mut provider = MockCredentialProvider::new();
        provider
            .expect_has_credential()
            .times(1)
            .returning(|| Err(CredentialError::Host("bridge unavailable".into())));

        let gate = CredentialGate::new(Arc::new(provider));
        assert!(!gate.has_credential().await);
    }

    #[tokio::test]
    async fn test_gate_propagates_selection_failure() {
        let mut provider = MockCredentialProvider::new();
        provider
            .expect_select_credential()
            .times(1)
            .returning(|| Err(CredentialError::NotSelected));

        let gate = CredentialGate::new(Arc::new(provider));
        let err = gate.request_credential().await.unwrap_err();
        assert!(matches!(err, StudioError::Credential(CredentialError::NotSelected)));
    }

    #[test]
    fn test_gate_missing_key() {
        let mut provider = MockCredentialProvider::new();
        provider.expect_api_key().returning(|| None);

        let gate = CredentialGate::new(Arc::new(provider));
        assert!(matches!(gate.api_key(), Err(StudioError::MissingCredential)));
    }

    #[tokio::test]
    #[serial]
    async fn test_env_provider_falls_back_to_api_key() {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::set_var("API_KEY", "fallback-key");

        let provider = EnvCredentialProvider::new();
        let selected = tokio_test::assert_ok!(provider.has_credential().await);
        let key = provider.api_key();
        std::env::remove_var("API_KEY");

        assert!(selected);
        assert_eq!(key.unwrap().expose(), "fallback-key");
    }

    #[tokio::test]
    #[serial]
    async fn test_env_provider_ignores_blank_key() {
        std::env::set_var("GEMINI_API_KEY", "   ");
        std::env::remove_var("API_KEY");

        let provider = EnvCredentialProvider::new();
        let selected = provider.has_credential().await.unwrap();
        std::env::remove_var("GEMINI_API_KEY");

        assert!(!selected);
    }
}
