use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use finport_core::{Email, NewUser, Password, User, UserStore, UserStoreError};

use super::password_hash::{compute_password_hash, verify_password_hash};

/// HashMap-backed user store, used in tests and when no database is
/// configured. Hashing and verification happen outside the map lock.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password.into_secret())
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash,
            created_at: Utc::now(),
        };

        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password.into_secret())
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let mut users = self.users.write().await;
        let user = users.get_mut(email).ok_or(UserStoreError::UserNotFound)?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let user = {
            let users = self.users.read().await;
            users.get(email).cloned().ok_or(UserStoreError::UserNotFound)?
        };

        verify_password_hash(user.password_hash.clone(), password.as_ref().clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }
}
