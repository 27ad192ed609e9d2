//! JWT service for identity token issuance and verification

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, crypto, decode, decode_header, encode,
};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::domain::auth::{errors::AuthError, value_objects::TokenClaims, value_objects::UserId};

/// HS256 identity token service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    /// Token TTL in minutes
    ttl_minutes: u64,
    issuer: Arc<String>,
}

impl JwtService {
    pub fn new(secret: &str, ttl_minutes: u64, issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            ttl_minutes,
            issuer: Arc::new(issuer.into()),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_minutes, config.issuer.clone())
    }

    /// Token lifetime in seconds, as reported to clients
    pub fn expires_in_seconds(&self) -> u64 {
        self.ttl_minutes * 60
    }

    /// Issue a token for a user, valid from now
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if minted at `issued_at`
    pub fn issue_at(&self, user_id: UserId, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let expires_at = issued_at + Duration::minutes(self.ttl_minutes as i64);
        let claims = TokenClaims::new(
            user_id,
            issued_at.timestamp(),
            expires_at.timestamp(),
            self.issuer.as_str(),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT token: {}", e);
            AuthError::Signing {
                reason: e.to_string(),
            }
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation
    }

    /// Verify a token and resolve the user it was issued for
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let validation = self.validation();

        match decode::<serde_json::Value>(token, &self.decoding_key, &validation) {
            Ok(data) => subject_user_id(&data.claims),
            // jsonwebtoken parses `sub` as a string before exp/iss are checked, so a
            // structured subject surfaces as a JSON error on an otherwise signed token.
            Err(e) if matches!(e.kind(), ErrorKind::Json(_)) => {
                self.verify_raw_claims(token, &validation)
            }
            Err(e) => {
                tracing::debug!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
                    _ => Err(AuthError::InvalidToken),
                }
            }
        }
    }

    /// Signature, issuer and expiry checks over the raw claim set
    fn verify_raw_claims(&self, token: &str, validation: &Validation) -> Result<UserId, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        if header.alg != Algorithm::HS256 {
            return Err(AuthError::InvalidToken);
        }

        let (message, signature) = token.rsplit_once('.').ok_or(AuthError::InvalidToken)?;
        let signed = crypto::verify(
            signature,
            message.as_bytes(),
            &self.decoding_key,
            Algorithm::HS256,
        )
        .map_err(|_| AuthError::InvalidToken)?;
        if !signed {
            return Err(AuthError::InvalidToken);
        }

        let claims: serde_json::Value = message
            .split_once('.')
            .and_then(|(_, payload)| URL_SAFE_NO_PAD.decode(payload).ok())
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(AuthError::InvalidToken)?;

        if claims.get("iss").and_then(|iss| iss.as_str()) != Some(self.issuer.as_str()) {
            return Err(AuthError::InvalidToken);
        }
        let expires_at = claims
            .get("exp")
            .and_then(|exp| exp.as_i64())
            .ok_or(AuthError::InvalidToken)?;
        if expires_at < Utc::now().timestamp() - validation.leeway as i64 {
            return Err(AuthError::TokenExpired);
        }

        subject_user_id(&claims)
    }
}

/// Extract the user id from the `sub` claim
///
/// Accepts a string or integer subject holding a positive id.
fn subject_user_id(claims: &serde_json::Value) -> Result<UserId, AuthError> {
    let raw = match claims.get("sub") {
        None | Some(serde_json::Value::Null) => {
            return Err(AuthError::malformed_claims("missing subject"));
        }
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AuthError::malformed_claims("subject is not an integer id"))?,
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| AuthError::malformed_claims("subject is not an integer id"))?,
        Some(_) => return Err(AuthError::malformed_claims("subject is not a scalar")),
    };

    let user_id = UserId::new(raw);
    if !user_id.is_valid() {
        return Err(AuthError::malformed_claims("subject is not a positive id"));
    }
    Ok(user_id)
}
