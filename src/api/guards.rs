use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api::errors::ApiError;
use crate::core::identity::CallerIdentity;
use crate::core::state::AppState;
use crate::services::EngineError;

/// The authenticated caller, resolved through the configured identity provider.
pub(crate) struct CurrentCaller(pub(crate) CallerIdentity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.identity().caller_identity(&parts.headers).await {
            Ok(Some(caller)) => Ok(CurrentCaller(caller)),
            Ok(None) => Err(EngineError::NotAuthenticated.into()),
            Err(err) => {
                tracing::debug!(error = %err, "Rejected caller credentials");
                Err(EngineError::NotAuthenticated.into())
            }
        }
    }
}
