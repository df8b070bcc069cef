use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::SecuritySettings;
use crate::db::types::UserRole;

#[derive(Debug, Error)]
pub(crate) enum SecurityError {
    #[error("jwt decoding failed")]
    JwtDecoding,
    #[error("unsupported jwt algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Token claims issued by the platform's identity service. `name` and `role` travel with the
/// token so the engine never has to look a caller up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) name: String,
    pub(crate) role: UserRole,
    pub(crate) exp: i64,
}

pub(crate) fn verify_token(token: &str, security: &SecuritySettings) -> Result<Claims, SecurityError> {
    let algorithm = algorithm_from_settings(security)?;
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = true;
    validation.required_spec_claims.insert("exp".to_string());
    validation.required_spec_claims.insert("sub".to_string());

    decode::<Claims>(token, &DecodingKey::from_secret(security.secret_key.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| SecurityError::JwtDecoding)
}

fn algorithm_from_settings(security: &SecuritySettings) -> Result<Algorithm, SecurityError> {
    match security.algorithm.as_str() {
        "HS256" => Ok(Algorithm::HS256),
        other => Err(SecurityError::UnsupportedAlgorithm(other.to_string())),
    }
}
