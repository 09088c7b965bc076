use std::{fmt, sync::Arc};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{TryRngCore, rngs::OsRng};

use super::{AuthCrypto, AuthError};

pub const MOCK_LOGIN_TOKEN: &str = "mock-jwt-token-123456";
const MOCK_TOKEN_PREFIX: &str = "mock-jwt-token-";
const SIGNED_TOKEN_BYTES: usize = 32;

/// Mints bearer tokens for successful logins and registrations.
pub trait TokenIssuer: Send + Sync + fmt::Debug {
    fn login_token(&self, username: &str) -> Result<String, AuthError>;

    fn register_token(&self, username: &str) -> Result<String, AuthError>;

    /// Whether `token` could have been minted by this issuer. The session
    /// table still decides whether it is current.
    fn is_well_formed(&self, token: &str) -> bool;

    /// Whether every minted token is unique to one login. Sessions are only
    /// recorded for issuers that return `true`.
    fn identifies_user(&self) -> bool;
}

/// Placeholder tokens: a fixed login token, and the registration time in
/// epoch milliseconds for new accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockTokenIssuer;

impl TokenIssuer for MockTokenIssuer {
    fn login_token(&self, _username: &str) -> Result<String, AuthError> {
        Ok(MOCK_LOGIN_TOKEN.to_string())
    }

    fn register_token(&self, _username: &str) -> Result<String, AuthError> {
        Ok(format!("{MOCK_TOKEN_PREFIX}{}", Utc::now().timestamp_millis()))
    }

    fn is_well_formed(&self, token: &str) -> bool {
        token.starts_with(MOCK_TOKEN_PREFIX)
    }

    fn identifies_user(&self) -> bool {
        false
    }
}

/// `<base64url(32 random bytes)>.<hex HMAC-SHA-256>` tokens.
#[derive(Debug, Clone)]
pub struct SignedTokenIssuer {
    crypto: Arc<AuthCrypto>,
}

impl SignedTokenIssuer {
    pub fn new(crypto: Arc<AuthCrypto>) -> Self {
        Self { crypto }
    }

    fn mint(&self) -> Result<String, AuthError> {
        let mut bytes = [0u8; SIGNED_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        let nonce = URL_SAFE_NO_PAD.encode(bytes);
        let signature = self.crypto.sign(&nonce);
        Ok(format!("{nonce}.{signature}"))
    }
}

impl TokenIssuer for SignedTokenIssuer {
    fn login_token(&self, _username: &str) -> Result<String, AuthError> {
        self.mint()
    }

    fn register_token(&self, _username: &str) -> Result<String, AuthError> {
        self.mint()
    }

    fn is_well_formed(&self, token: &str) -> bool {
        token
            .split_once('.')
            .is_some_and(|(nonce, signature)| {
                self.crypto.verify_signature(nonce, signature)
            })
    }

    fn identifies_user(&self) -> bool {
        true
    }
}
