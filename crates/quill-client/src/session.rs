use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::error::ClientError;
use crate::storage::KeyValueStore;

/// Storage key holding the admin bearer token.
pub const TOKEN_KEY: &str = "token";

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// Reads the `exp` claim of a JWT without checking its signature. The
/// backend still verifies every request; this only tells the UI whether the
/// token is worth sending.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, ClientError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::from(["exp".to_string()]);

    let tokenData = decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| ClientError::InvalidToken(e.to_string()))?;

    DateTime::<Utc>::from_timestamp(tokenData.claims.exp, 0)
        .ok_or_else(|| ClientError::InvalidToken("exp out of range".into()))
}

/// Gate in front of the stored bearer token.
pub struct SessionGuard<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionGuard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored token if it is still valid at `now`. An expired or
    /// unreadable token is evicted from storage.
    pub fn current_token(&mut self, now: DateTime<Utc>) -> Option<String> {
        let token = self.store.get(TOKEN_KEY)?;

        match decode_expiry(&token) {
            Ok(expiresAt) if expiresAt > now => Some(token),
            Ok(expiresAt) => {
                debug!("evicting session token expired at {expiresAt}");
                self.store.remove(TOKEN_KEY);
                None
            }
            Err(e) => {
                debug!("evicting unreadable session token: {e}");
                self.store.remove(TOKEN_KEY);
                None
            }
        }
    }

    pub fn is_authenticated(&mut self, now: DateTime<Utc>) -> bool {
        self.current_token(now).is_some()
    }

    /// Stores a freshly issued token. Returns its expiry.
    pub fn login(&mut self, token: &str) -> Result<DateTime<Utc>, ClientError> {
        let expiresAt = decode_expiry(token)?;
        self.store.set(TOKEN_KEY, token);
        Ok(expiresAt)
    }

    pub fn logout(&mut self) {
        self.store.remove(TOKEN_KEY);
    }

    /// `Authorization` header value for admin calls.
    pub fn bearer(&mut self, now: DateTime<Utc>) -> Result<String, ClientError> {
        self.current_token(now)
            .map(|token| format!("Bearer {token}"))
            .ok_or(ClientError::MissingSession)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    use super::*;
    use crate::storage::MemoryStore;

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    fn token_expiring_at(exp: DateTime<Utc>) -> String {
        let claims = Claims {
            sub: "admin".into(),
            exp: exp.timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"backend-secret")).unwrap()
    }

    fn guard_with(token: &str) -> SessionGuard<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(TOKEN_KEY, token);
        SessionGuard::new(store)
    }

    #[test]
    fn valid_token_is_kept() {
        let now = Utc::now();
        let token = token_expiring_at(now + Duration::hours(1));
        let mut guard = guard_with(&token);

        assert_eq!(guard.current_token(now), Some(token.clone()));
        assert!(guard.is_authenticated(now));
        assert_eq!(guard.store().get(TOKEN_KEY), Some(token));
    }

    #[test]
    fn expired_token_is_purged() {
        let now = Utc::now();
        let mut guard = guard_with(&token_expiring_at(now - Duration::minutes(5)));

        assert!(!guard.is_authenticated(now));
        assert!(guard.store().get(TOKEN_KEY).is_none());
    }

    #[test]
    fn malformed_token_is_purged() {
        let mut guard = guard_with("not.a.jwt");

        assert!(!guard.is_authenticated(Utc::now()));
        assert!(guard.store().is_empty());
    }

    #[test]
    fn token_without_exp_is_rejected() {
        #[derive(Serialize)]
        struct NoExp {
            sub: String,
        }
        let token = encode(
            &Header::default(),
            &NoExp { sub: "admin".into() },
            &EncodingKey::from_secret(b"k"),
        )
        .unwrap();

        assert!(matches!(decode_expiry(&token), Err(ClientError::InvalidToken(_))));
    }

    #[test]
    fn signature_is_not_checked_locally() {
        let now = Utc::now();
        let claims = Claims {
            sub: "someone".into(),
            exp: (now + Duration::hours(2)).timestamp(),
        };
        let forged = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"guess")).unwrap();

        assert!(guard_with(&forged).is_authenticated(now));
    }

    #[test]
    fn login_and_logout_round_trip() {
        let now = Utc::now();
        let token = token_expiring_at(now + Duration::days(1));
        let mut guard = SessionGuard::new(MemoryStore::new());

        assert!(guard.login(&token).is_ok());
        assert_eq!(guard.bearer(now).unwrap(), format!("Bearer {token}"));

        guard.logout();
        assert!(matches!(guard.bearer(now), Err(ClientError::MissingSession)));
    }

    #[test]
    fn login_rejects_garbage_without_touching_store() {
        let mut guard = SessionGuard::new(MemoryStore::new());

        assert!(guard.login("garbage").is_err());
        assert!(guard.store().is_empty());
    }
}
