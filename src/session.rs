//! Client-side holder of the signed-in user and their bearer token.
//!
//! Authentication state is read off the token itself (its `exp` claim), so
//! there is no separate "logged in" flag to fall out of sync.

use jsonwebtoken::{decode, DecodingKey, Validation};
use time::OffsetDateTime;

use crate::auth::{dto::PublicUser, Claims};

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    user: Option<PublicUser>,
    token: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from a previously saved token, e.g. after a restart.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            user: None,
            token: Some(token.into()),
        }
    }

    pub fn set_session(&mut self, user: PublicUser, token: impl Into<String>) {
        self.user = Some(user);
        self.token = Some(token.into());
    }

    pub fn user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
    }

    /// Expiry of the held token. The signature is not checked; only the server can do that.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        let token = self.token.as_deref()?;
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
        OffsetDateTime::from_unix_timestamp(data.claims.exp as i64).ok()
    }

    pub fn is_authenticated_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at().is_some_and(|exp| exp > now)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(OffsetDateTime::now_utc())
    }

    /// Value for the `Authorization` header of outgoing requests.
    pub fn authorization_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;
    use uuid::Uuid;

    use super::*;
    use crate::{
        auth::{jwt::JwtKeys, repo_types::Role},
        config::JwtConfig,
    };

    fn keys() -> JwtKeys {
        JwtKeys::from(&JwtConfig {
            secret: "client-cannot-see-this".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 60 * 24,
            reset_ttl_minutes: 60,
        })
    }

    fn user() -> PublicUser {
        PublicUser {
            id: Uuid::new_v4(),
            name: "Jo Lee".into(),
            email: "jo@x.com".into(),
            role: Role::User,
        }
    }

    #[test]
    fn empty_store_is_not_authenticated() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());
        assert!(store.authorization_header().is_none());
    }

    #[test]
    fn fresh_token_authenticates_until_expiry() {
        let u = user();
        let token = keys().sign_session(u.id).unwrap();
        let mut store = SessionStore::new();
        store.set_session(u.clone(), token.clone());

        let now = OffsetDateTime::now_utc();
        assert!(store.is_authenticated_at(now));
        assert!(!store.is_authenticated_at(now + Duration::hours(25)));
        assert_eq!(store.user(), Some(&u));
        assert_eq!(store.authorization_header(), Some(format!("Bearer {token}")));
    }

    #[test]
    fn logout_clears_everything() {
        let u = user();
        let token = keys().sign_session(u.id).unwrap();
        let mut store = SessionStore::new();
        store.set_session(u, token);
        store.logout();
        assert!(store.user().is_none());
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn garbage_token_is_not_authenticated() {
        let store = SessionStore::with_token("definitely-not-a-jwt");
        assert!(store.expires_at().is_none());
        assert!(!store.is_authenticated());
    }
}
