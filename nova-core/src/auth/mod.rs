//! In-memory account store, password hashing and bearer tokens.

pub mod crypto;
pub mod repository;
pub mod service;
pub mod tokens;

pub use crypto::{AuthCrypto, AuthCryptoError};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{AuthService, AuthSuccess};
pub use tokens::{
    MOCK_LOGIN_TOKEN, MockTokenIssuer, SignedTokenIssuer, TokenIssuer,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    UsernameTaken,
    #[error("Invalid token")]
    InvalidToken,
    #[error(transparent)]
    Crypto(#[from] AuthCryptoError),
    #[error("internal auth error: {0}")]
    Internal(String),
}
