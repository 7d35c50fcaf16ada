use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use finport_core::{Email, NewUser, Password, User, UserStore, UserStoreError};

use super::password_hash::{compute_password_hash, verify_password_hash};

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &PgRow, email: Email) -> Result<User, UserStoreError> {
    let unexpected = |e: sqlx::Error| UserStoreError::UnexpectedError(e.to_string());
    Ok(User {
        id: row.try_get::<Uuid, _>("id").map_err(unexpected)?,
        name: row.try_get::<String, _>("name").map_err(unexpected)?,
        email,
        password_hash: Secret::from(
            row.try_get::<String, _>("password_hash").map_err(unexpected)?,
        ),
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(unexpected)?,
    })
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Finding user by email", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.map(|row| row_to_user(&row, email.clone())).transpose()
    }

    #[tracing::instrument(name = "Creating user", skip_all)]
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

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.email.as_ref().expose_secret())
        .bind(user.password_hash.expose_secret())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // A concurrent duplicate signup loses the race on the email
            // uniqueness constraint.
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                UserStoreError::UserAlreadyExists
            }
            _ => UserStoreError::UnexpectedError(e.to_string()),
        })?;

        Ok(user)
    }

    #[tracing::instrument(name = "Updating password", skip_all)]
    async fn update_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password.into_secret())
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
            .bind(password_hash.expose_secret())
            .bind(email.as_ref().expose_secret())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Authenticating user", skip_all)]
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(UserStoreError::UserNotFound)?;

        verify_password_hash(user.password_hash.clone(), password.as_ref().clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }
}
