use std::{any::type_name_of_val, collections::HashMap, fmt, sync::Arc};

use nova_config::{AuthConfig, SeedUserConfig, TokenMode};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{
    AuthCrypto, AuthError, InMemoryUserRepository, MockTokenIssuer,
    SignedTokenIssuer, TokenIssuer, UserRepository,
};
use crate::models::{PublicUser, User};

/// Token plus the public profile returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSuccess {
    pub token: String,
    pub user: PublicUser,
}

/// Live sessions, at most one per user.
#[derive(Debug, Default)]
struct SessionTable {
    by_token: HashMap<String, String>,
    by_user: HashMap<String, String>,
}

impl SessionTable {
    /// Record `token` for `username`, ending any earlier session of theirs.
    fn open(&mut self, token: String, username: String) -> Option<String> {
        let replaced = self
            .by_user
            .insert(username.clone(), token.clone())
            .filter(|previous| *previous != token);
        if let Some(previous) = &replaced {
            self.by_token.remove(previous);
        }
        self.by_token.insert(token, username);
        replaced
    }

    fn user(&self, token: &str) -> Option<&String> {
        self.by_token.get(token)
    }

    fn close(&mut self, token: &str) -> Option<String> {
        let username = self.by_token.remove(token)?;
        self.by_user.remove(&username);
        Some(username)
    }

    fn len(&self) -> usize {
        self.by_token.len()
    }
}

/// Credential checks, registration and the token-to-user session table.
///
/// Sessions are only kept when the token issuer mints per-login tokens;
/// shared mock tokens never resolve to a user.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    crypto: Arc<AuthCrypto>,
    issuer: Arc<dyn TokenIssuer>,
    sessions: Mutex<SessionTable>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("users", &type_name_of_val(self.users.as_ref()))
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        crypto: Arc<AuthCrypto>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            crypto,
            issuer,
            sessions: Mutex::new(SessionTable::default()),
        }
    }

    /// In-memory service wired from configuration, with the seed account
    /// already stored.
    pub async fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let crypto = Arc::new(AuthCrypto::new(
            &config.password_pepper,
            &config.token_key,
        )?);
        Self::with_crypto(config, crypto).await
    }

    /// Like [`Self::from_config`] but with a caller-built [`AuthCrypto`].
    pub async fn with_crypto(
        config: &AuthConfig,
        crypto: Arc<AuthCrypto>,
    ) -> Result<Self, AuthError> {
        let issuer: Arc<dyn TokenIssuer> = match config.token_mode {
            TokenMode::Mock => Arc::new(MockTokenIssuer),
            TokenMode::Signed => {
                Arc::new(SignedTokenIssuer::new(Arc::clone(&crypto)))
            }
        };

        let service =
            Self::new(Arc::new(InMemoryUserRepository::new()), crypto, issuer);
        if let Some(seed) = &config.seed_user {
            service.seed(seed).await?;
        }
        Ok(service)
    }

    pub async fn seed(&self, seed: &SeedUserConfig) -> Result<(), AuthError> {
        let password_hash = self.hash_password(&seed.password).await?;
        match self
            .users
            .insert(User {
                username: seed.username.clone(),
                password_hash,
                email: seed.email.clone(),
            })
            .await
        {
            Ok(()) => {
                info!(username = %seed.username, "seed user created");
                Ok(())
            }
            Err(AuthError::UsernameTaken) => {
                debug!(username = %seed.username, "seed user already present");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthSuccess, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!(username, "login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verify_password(password, &user.password_hash).await? {
            debug!(username, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issuer.login_token(&user.username)?;
        self.open_session(&token, &user.username).await;
        info!(username, "user logged in");

        Ok(AuthSuccess {
            token,
            user: user.public(),
        })
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<AuthSuccess, AuthError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = self.hash_password(password).await?;
        let user = User {
            username: username.to_string(),
            password_hash,
            email: email.to_string(),
        };
        let public = user.public();
        // The repository re-checks under its lock; the lookup above only
        // skips hashing for the common duplicate case.
        self.users.insert(user).await?;

        let token = self.issuer.register_token(username)?;
        self.open_session(&token, username).await;
        info!(username, "user registered");

        Ok(AuthSuccess {
            token,
            user: public,
        })
    }

    /// Resolve a bearer token to the account that holds it.
    pub async fn current_user(
        &self,
        token: &str,
    ) -> Result<PublicUser, AuthError> {
        if !self.issuer.identifies_user() || !self.issuer.is_well_formed(token)
        {
            return Err(AuthError::InvalidToken);
        }

        let username = self
            .sessions
            .lock()
            .await
            .user(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)?;

        self.users
            .find_by_username(&username)
            .await?
            .map(|user| user.public())
            .ok_or(AuthError::InvalidToken)
    }

    /// Drop a session. Returns whether the token was known.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.lock().await.close(token);
        if let Some(username) = &removed {
            info!(username = %username, "user logged out");
        }
        removed.is_some()
    }

    pub async fn user_count(&self) -> Result<usize, AuthError> {
        self.users.count().await
    }

    async fn open_session(&self, token: &str, username: &str) {
        if !self.issuer.identifies_user() {
            return;
        }

        let mut sessions = self.sessions.lock().await;
        if sessions
            .open(token.to_string(), username.to_string())
            .is_some()
        {
            debug!(username, "previous session replaced");
        }
        debug!(sessions = sessions.len(), "session opened");
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let crypto = Arc::clone(&self.crypto);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || crypto.hash_password(&password))
            .await
            .map_err(|err| AuthError::Internal(err.to_string()))?
            .map_err(AuthError::from)
    }

    async fn verify_password(
        &self,
        password: &str,
        hash: &str,
    ) -> Result<bool, AuthError> {
        let crypto = Arc::clone(&self.crypto);
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || {
            crypto.verify_password(&password, &hash)
        })
        .await
        .map_err(|err| AuthError::Internal(err.to_string()))?
        .map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MOCK_LOGIN_TOKEN, crypto::minimal_params};
    use nova_config::constants::{DEFAULT_PASSWORD_PEPPER, DEFAULT_TOKEN_KEY};

    fn auth_config(mode: TokenMode) -> AuthConfig {
        AuthConfig {
            password_pepper: DEFAULT_PASSWORD_PEPPER.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            token_mode: mode,
            seed_user: Some(SeedUserConfig {
                username: "user".into(),
                password: "password".into(),
                email: "user@nova.com".into(),
            }),
        }
    }

    async fn service(mode: TokenMode) -> AuthService {
        let crypto = Arc::new(
            AuthCrypto::with_params("pepper", "token-key", minimal_params())
                .unwrap(),
        );
        AuthService::with_crypto(&auth_config(mode), crypto)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn seeded_user_can_log_in_with_mock_token() {
        let service = service(TokenMode::Mock).await;
        let success = service.login("user", "password").await.unwrap();

        assert_eq!(success.token, MOCK_LOGIN_TOKEN);
        assert_eq!(
            success.user,
            PublicUser {
                username: "user".into(),
                email: "user@nova.com".into()
            }
        );
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_rejected() {
        let service = service(TokenMode::Mock).await;
        assert!(matches!(
            service.login("user", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("ghost", "password").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("USER", "password").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn registration_adds_one_user_who_can_log_in() {
        let service = service(TokenMode::Mock).await;
        assert_eq!(service.user_count().await.unwrap(), 1);

        let success = service
            .register("neo", "red-pill", "neo@nova.com")
            .await
            .unwrap();
        assert!(success.token.starts_with("mock-jwt-token-"));
        assert_eq!(service.user_count().await.unwrap(), 2);

        let login = service.login("neo", "red-pill").await.unwrap();
        assert_eq!(login.user.email, "neo@nova.com");
    }

    #[tokio::test]
    async fn duplicate_registration_keeps_original_account() {
        let service = service(TokenMode::Mock).await;
        assert!(matches!(
            service.register("user", "other", "other@nova.com").await,
            Err(AuthError::UsernameTaken)
        ));
        assert_eq!(service.user_count().await.unwrap(), 1);
        assert!(service.login("user", "password").await.is_ok());
    }

    #[tokio::test]
    async fn sessions_resolve_until_logout() {
        let service = service(TokenMode::Signed).await;
        let success = service.login("user", "password").await.unwrap();
        assert_ne!(success.token, MOCK_LOGIN_TOKEN);

        let me = service.current_user(&success.token).await.unwrap();
        assert_eq!(me.username, "user");

        assert!(service.logout(&success.token).await);
        assert!(matches!(
            service.current_user(&success.token).await,
            Err(AuthError::InvalidToken)
        ));
        assert!(!service.logout(&success.token).await);
    }

    #[tokio::test]
    async fn mock_tokens_never_resolve_to_a_user() {
        let service = service(TokenMode::Mock).await;
        let seeded = service.login("user", "password").await.unwrap();
        service
            .register("neo", "red-pill", "neo@nova.com")
            .await
            .unwrap();
        let other = service.login("neo", "red-pill").await.unwrap();
        assert_eq!(seeded.token, other.token);

        assert!(matches!(
            service.current_user(&seeded.token).await,
            Err(AuthError::InvalidToken)
        ));
        assert_eq!(service.sessions.lock().await.len(), 0);
        assert!(!service.logout(&seeded.token).await);
    }

    #[tokio::test]
    async fn repeated_logins_keep_one_session_per_user() {
        let service = service(TokenMode::Signed).await;
        service
            .register("neo", "red-pill", "neo@nova.com")
            .await
            .unwrap();

        let mut last = String::new();
        for _ in 0..5 {
            last = service.login("user", "password").await.unwrap().token;
        }
        let first_neo = service.login("neo", "red-pill").await.unwrap().token;
        let neo = service.login("neo", "red-pill").await.unwrap().token;

        assert_eq!(service.sessions.lock().await.len(), 2);
        assert_eq!(service.current_user(&last).await.unwrap().username, "user");
        assert_eq!(service.current_user(&neo).await.unwrap().username, "neo");
        assert!(matches!(
            service.current_user(&first_neo).await,
            Err(AuthError::InvalidToken)
        ));

        assert!(service.logout(&last).await);
        assert_eq!(service.sessions.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn forged_signed_tokens_are_rejected() {
        let service = service(TokenMode::Signed).await;
        assert!(matches!(
            service.current_user("abc.def").await,
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            service.current_user(MOCK_LOGIN_TOKEN).await,
            Err(AuthError::InvalidToken)
        ));
    }
}
