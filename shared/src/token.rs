//! Access-token claim decoding.
//!
//! The access token is a compact JWT whose payload segment carries the
//! session identity (id, email, role). Only the claims are read here;
//! signature verification stays on the backend.

use crate::Role;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims carried by the access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimsError {
    /// Not a three-segment compact JWT.
    NotAJwt,
    /// Payload segment is not valid base64url.
    Encoding,
    /// Payload decoded but the claim set is missing or malformed.
    Claims,
}

impl fmt::Display for ClaimsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimsError::NotAJwt => write!(f, "token is not a compact JWT"),
            ClaimsError::Encoding => write!(f, "token payload is not base64url"),
            ClaimsError::Claims => write!(f, "token payload carries no valid claims"),
        }
    }
}

impl std::error::Error for ClaimsError {}

impl AccessClaims {
    /// Decode the claim set from a compact JWT without verifying it.
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next()) {
            (Some(header), Some(payload)) if !header.is_empty() && !payload.is_empty() => payload,
            _ => return Err(ClaimsError::NotAJwt),
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| ClaimsError::Encoding)?;
        serde_json::from_slice(&bytes).map_err(|_| ClaimsError::Claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forge(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn decodes_identity_claims() {
        let token = forge(json!({
            "id": "u42",
            "email": "reader@example.com",
            "role": "ADMIN",
            "iat": 1700000000,
            "exp": 1700000900
        }));
        let claims = AccessClaims::decode(&token).unwrap();
        assert_eq!(claims.id, "u42");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, Some(1700000900));
    }

    #[test]
    fn rejects_non_jwt_strings() {
        assert_eq!(AccessClaims::decode(""), Err(ClaimsError::NotAJwt));
        assert_eq!(AccessClaims::decode("justonechunk"), Err(ClaimsError::NotAJwt));
    }

    #[test]
    fn rejects_garbage_payload() {
        assert_eq!(
            AccessClaims::decode("aGVhZGVy.%%%%.sig"),
            Err(ClaimsError::Encoding)
        );
    }

    #[test]
    fn rejects_payload_without_claims() {
        let token = forge(json!({ "sub": "someone-else" }));
        assert_eq!(AccessClaims::decode(&token), Err(ClaimsError::Claims));
    }
}
