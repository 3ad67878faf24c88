//! Requester extraction middleware
//!
//! Authentication lives in an external service; requests arrive with a
//! JWT it issued. This middleware only verifies the token and exposes
//! the requester's identity and capability flags to handlers. Requests
//! without a (valid) token proceed as an anonymous requester instead of
//! being rejected; individual operations decide what the flags permit.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::AppState;

/// The current requester, as asserted by the auth collaborator
///
/// `registered` gates create/update, `admin` gates delete and hidden
/// content. The core never authenticates, it only branches on these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    pub id: Option<i32>,
    pub registered: bool,
    pub admin: bool,
}

impl Requester {
    /// Requester with no token: no identity, no capabilities
    pub fn anonymous() -> Self {
        Self {
            id: None,
            registered: false,
            admin: false,
        }
    }
}

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Requester>()
            .cloned()
            .unwrap_or_else(Requester::anonymous))
    }
}

/// Claims carried by requester tokens
#[derive(Debug, Serialize, Deserialize)]
struct RequesterClaims {
    sub: String,
    registered: bool,
    admin: bool,
    exp: usize,
}

/// Requester extraction middleware (never rejects)
pub async fn requester_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        match decode_requester(token, &state.config().jwt.secret) {
            Ok(requester) => {
                debug!(
                    requester_id = ?requester.id,
                    registered = requester.registered,
                    admin = requester.admin,
                    "Requester extracted from token"
                );
                request.extensions_mut().insert(requester);
            }
            Err(e) => {
                debug!(error = ?e, "Requester token rejected, continuing as anonymous");
            }
        }
    }

    next.run(request).await
}

fn decode_requester(token: &str, secret: &str) -> Result<Requester, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<RequesterClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(Requester {
        id: data.claims.sub.parse().ok(),
        registered: data.claims.registered,
        admin: data.claims.admin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token(sub: &str, registered: bool, admin: bool, secret: &str) -> String {
        let claims = RequesterClaims {
            sub: sub.to_string(),
            registered,
            admin,
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_token() {
        let t = token("42", true, false, "secret");
        let requester = decode_requester(&t, "secret").unwrap();
        assert_eq!(requester.id, Some(42));
        assert!(requester.registered);
        assert!(!requester.admin);
    }

    #[test]
    fn test_decode_wrong_secret_fails() {
        let t = token("42", true, true, "secret");
        assert!(decode_requester(&t, "other").is_err());
    }

    #[test]
    fn test_anonymous_has_no_capabilities() {
        let anon = Requester::anonymous();
        assert_eq!(anon.id, None);
        assert!(!anon.registered);
        assert!(!anon.admin);
    }
}
