//! Bearer-token gateway: turns an inbound request into a caller identity.
//!
//! Tokens are HS256 JWTs carrying a `user_id` claim. They are accepted from
//! the `token` query parameter or an `Authorization: Bearer` header.

use crate::{errors::AppError, models::account::AccountId};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Lifetime of tokens minted by [`TokenGateway::create_token`].
const TOKEN_LIFETIME_HOURS: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub authorized: bool,
    pub user_id: AccountId,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no token in request")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token not authorized")]
    NotAuthorized,
    #[error("could not sign token: {0}")]
    Signing(String),
}

/// Verifies (and, for tooling and tests, issues) caller tokens.
#[derive(Clone)]
pub struct TokenGateway {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenGateway {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a token identifying `user_id`. Used by the test suites.
    pub fn create_token(&self, user_id: AccountId) -> Result<String, AuthError> {
        let claims = Claims {
            authorized: true,
            user_id,
            exp: (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify the request's token and return the caller's account id.
    pub fn extract_caller_id(&self, parts: &Parts) -> Result<AccountId, AuthError> {
        let token = extract_token(parts).ok_or(AuthError::MissingToken)?;
        let claims = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?
        .claims;

        if !claims.authorized {
            return Err(AuthError::NotAuthorized);
        }
        Ok(claims.user_id)
    }
}

/// `?token=` wins over the `Authorization` header.
fn extract_token(parts: &Parts) -> Option<&str> {
    let from_query = parts.uri.query().and_then(|query| {
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("token="))
            .filter(|token| !token.is_empty())
    });
    if from_query.is_some() {
        return from_query;
    }

    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut fields = value.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

/// Identity of the authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub AccountId);

impl<S> FromRequestParts<S> for Caller
where
    TokenGateway: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        TokenGateway::from_ref(state)
            .extract_caller_id(parts)
            .map(Caller)
            .map_err(|err| {
                debug!(%err, "rejecting unauthenticated request");
                AppError::new(StatusCode::UNAUTHORIZED, "Unauthorized")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_yields_caller() {
        let gateway = TokenGateway::new("secret");
        let token = gateway.create_token(7).unwrap();

        let parts = parts("/veterinaries", Some(&format!("Bearer {token}")));
        assert_eq!(gateway.extract_caller_id(&parts).unwrap(), 7);
    }

    #[test]
    fn query_token_yields_caller() {
        let gateway = TokenGateway::new("secret");
        let token = gateway.create_token(9).unwrap();

        let parts = parts(&format!("/veterinaries/1?x=1&token={token}"), None);
        assert_eq!(gateway.extract_caller_id(&parts).unwrap(), 9);
    }

    #[test]
    fn missing_token_is_rejected() {
        let gateway = TokenGateway::new("secret");
        let err = gateway
            .extract_caller_id(&parts("/veterinaries", None))
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));

        let err = gateway
            .extract_caller_id(&parts("/veterinaries", Some("Basic abc")))
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let token = TokenGateway::new("other").create_token(7).unwrap();
        let gateway = TokenGateway::new("secret");

        let err = gateway
            .extract_caller_id(&parts("/", Some(&format!("Bearer {token}"))))
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }
}
