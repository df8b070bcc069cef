use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::Serialize;
use thiserror::Error;

use crate::core::config::SecuritySettings;
use crate::core::security;
use crate::db::types::UserRole;

/// An already-authenticated caller, as handed to the engine by the surrounding platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CallerIdentity {
    pub(crate) id: String,
    pub(crate) display_name: String,
    pub(crate) role: UserRole,
}

impl CallerIdentity {
    pub(crate) fn is_grader(&self) -> bool {
        self.role.is_grader()
    }
}

#[derive(Debug, Error)]
pub(crate) enum IdentityError {
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Resolves the caller for an incoming request. `Ok(None)` means no credentials were presented.
#[async_trait]
pub(crate) trait IdentityProvider: Send + Sync {
    async fn caller_identity(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<CallerIdentity>, IdentityError>;
}

/// Trusts HS256 bearer tokens minted by the platform's auth service.
pub(crate) struct JwtIdentityProvider {
    security: SecuritySettings,
}

impl JwtIdentityProvider {
    pub(crate) fn new(security: SecuritySettings) -> Self {
        Self { security }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn caller_identity(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<CallerIdentity>, IdentityError> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Ok(None);
        };

        let raw = value.to_str().map_err(|_| IdentityError::MalformedHeader)?;
        let token = raw.strip_prefix("Bearer ").ok_or(IdentityError::MalformedHeader)?;

        let claims = security::verify_token(token.trim(), &self.security)
            .map_err(|_| IdentityError::InvalidCredentials)?;

        if claims.sub.trim().is_empty() {
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(Some(CallerIdentity { id: claims.sub, display_name: claims.name, role: claims.role }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::mint_token;
    use axum::http::HeaderValue;

    fn provider() -> (JwtIdentityProvider, SecuritySettings) {
        let security = SecuritySettings {
            secret_key: "identity-secret".to_string(),
            algorithm: "HS256".to_string(),
        };
        (JwtIdentityProvider::new(security.clone()), security)
    }

    #[tokio::test]
    async fn missing_header_means_anonymous() {
        let (provider, _) = provider();
        let resolved = provider.caller_identity(&HeaderMap::new()).await.expect("resolve");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn bearer_token_resolves_identity() {
        let (provider, security) = provider();
        let token =
            mint_token("u-7", "Ana", UserRole::Admin, &security, time::Duration::minutes(5));
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let caller = provider.caller_identity(&headers).await.expect("resolve").expect("caller");
        assert_eq!(caller.id, "u-7");
        assert_eq!(caller.display_name, "Ana");
        assert!(caller.is_grader());
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_malformed() {
        let (provider, _) = provider();
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        assert!(matches!(
            provider.caller_identity(&headers).await,
            Err(IdentityError::MalformedHeader)
        ));
    }
}
