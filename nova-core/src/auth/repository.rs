use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::AuthError;
use crate::models::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AuthError>;

    /// Store a new user. Fails with [`AuthError::UsernameTaken`] without
    /// touching the store when the username already exists.
    async fn insert(&self, user: User) -> Result<(), AuthError>;

    async fn count(&self) -> Result<usize, AuthError>;
}

/// Process-local user store. The check and the insert happen under one lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().await.get(username).cloned())
    }

    async fn insert(&self, user: User) -> Result<(), AuthError> {
        let mut users = self.users.lock().await;
        if users.contains_key(&user.username) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }

    async fn count(&self) -> Result<usize, AuthError> {
        Ok(self.users.lock().await.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn user(name: &str) -> User {
        User {
            username: name.to_string(),
            password_hash: "hash".to_string(),
            email: format!("{name}@nova.test"),
        }
    }

    #[tokio::test]
    async fn duplicate_insert_leaves_store_unchanged() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("ana")).await.unwrap();

        let mut dup = user("ana");
        dup.email = "other@nova.test".into();
        assert!(matches!(
            repo.insert(dup).await,
            Err(AuthError::UsernameTaken)
        ));

        assert_eq!(repo.count().await.unwrap(), 1);
        let stored = repo.find_by_username("ana").await.unwrap().unwrap();
        assert_eq!(stored.email, "ana@nova.test");
    }

    #[tokio::test]
    async fn concurrent_registrations_admit_exactly_one() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move { repo.insert(user("race")).await }));
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
