//! User accounts and bearer sessions
//!
//! This is the identity collaborator: it turns credentials into session
//! tokens and tokens back into a trusted [`User`]. The closet core never
//! calls into it.

use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info};

use super::models::{User, UserId, UserStats};
use super::sqlite::SqliteStore;
use crate::api::auth::{generate_session_token, hash_password, verify_password};
use crate::{Error, Result};

impl SqliteStore {
    /// Register a new user
    ///
    /// Username and email must both be unused.
    pub async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<User> {
        if self.credentials_taken(username, email, None).await? {
            return Err(Error::Validation("Username or email already exists".to_string()));
        }

        let hash = hash_blocking(password).await?;

        // A concurrent registration can still win the race to the UNIQUE index
        let id = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
            .bind(username)
            .bind(email)
            .bind(&hash)
            .execute(self.pool())
            .await
            .map_err(credentials_conflict)?
            .last_insert_rowid();

        info!("Registered user {} ({})", id, username);
        self.get_user(id).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<User> {
        let (id, username, email, created_at): (UserId, String, String, NaiveDateTime) =
            sqlx::query_as("SELECT id, username, email, created_at FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool())
                .await?
                .ok_or_else(|| Error::NotFound(format!("user {}", id)))?;

        Ok(User {
            id,
            username,
            email,
            created_at,
        })
    }

    /// Check a username/password pair
    ///
    /// Unknown usernames and wrong passwords are indistinguishable.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<User> {
        let row: Option<(UserId, String)> =
            sqlx::query_as("SELECT id, password_hash FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(self.pool())
                .await?;

        if let Some((id, hash)) = row {
            if verify_blocking(password, hash).await? {
                return self.get_user(id).await;
            }
        }
        Err(Error::Unauthorized("Invalid credentials".to_string()))
    }

    /// Update username and/or email; `None` leaves a field unchanged
    pub async fn update_profile(
        &self,
        id: UserId,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<User> {
        if username.is_none() && email.is_none() {
            return Err(Error::Validation("No fields to update".to_string()));
        }

        if self
            .credentials_taken(username.unwrap_or(""), email.unwrap_or(""), Some(id))
            .await?
        {
            return Err(Error::Validation("Username or email already exists".to_string()));
        }

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE(?, username),
                email = COALESCE(?, email),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(credentials_conflict)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("user {}", id)));
        }

        self.get_user(id).await
    }

    /// Replace the password after checking the current one
    pub async fn change_password(&self, id: UserId, current: &str, new: &str) -> Result<()> {
        let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {}", id)))?;

        if !verify_blocking(current, hash).await? {
            return Err(Error::Unauthorized("Current password is incorrect".to_string()));
        }

        sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(hash_blocking(new).await?)
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Delete the account along with its sessions, items and outfits
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("user {}", id)));
        }

        info!("Deleted user {}", id);
        Ok(())
    }

    pub async fn user_stats(&self, id: UserId) -> Result<UserStats> {
        Ok(UserStats {
            clothing_count: self.count_items(id).await?,
            outfit_count: self.count_outfits(id).await?,
        })
    }

    /// Issue a bearer token valid for `ttl_seconds`
    ///
    /// Sessions that have already expired, for any user, are purged first.
    pub async fn create_session(&self, user_id: UserId, ttl_seconds: i64) -> Result<String> {
        let now = Utc::now().timestamp();

        let purged = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool())
            .await?
            .rows_affected();
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }

        let token = generate_session_token();
        let expires_at = now.saturating_add(ttl_seconds);

        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
            .bind(&token)
            .bind(user_id)
            .bind(expires_at)
            .execute(self.pool())
            .await?;

        Ok(token)
    }

    /// Resolve a bearer token to its user
    ///
    /// Expired sessions are purged on the way.
    pub async fn resolve_session(&self, token: &str) -> Result<User> {
        let row: Option<(UserId, i64)> =
            sqlx::query_as("SELECT user_id, expires_at FROM sessions WHERE token = ?")
                .bind(token)
                .fetch_optional(self.pool())
                .await?;

        let (user_id, expires_at) =
            row.ok_or_else(|| Error::Unauthorized("Invalid token".to_string()))?;

        if expires_at <= Utc::now().timestamp() {
            self.delete_session(token).await?;
            debug!("Session for user {} expired", user_id);
            return Err(Error::Unauthorized("Token expired".to_string()));
        }

        // The account may have been deleted since the token was issued
        self.get_user(user_id).await.map_err(|e| match e {
            Error::NotFound(_) => Error::Unauthorized("User no longer exists".to_string()),
            other => other,
        })
    }

    pub async fn delete_session(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn credentials_taken(
        &self,
        username: &str,
        email: &str,
        except: Option<UserId>,
    ) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE (username = ? OR email = ?) AND id != ?)",
        )
        .bind(username)
        .bind(email)
        .bind(except.unwrap_or(-1))
        .fetch_one(self.pool())
        .await?;

        Ok(taken)
    }
}

/// Map a UNIQUE violation on `users` to the same error the pre-check gives
fn credentials_conflict(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Validation("Username or email already exists".to_string())
        }
        other => Error::Database(other),
    }
}

async fn hash_blocking(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))?
}

async fn verify_blocking(password: &str, hash: String) -> Result<bool> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| Error::Internal(format!("Password check task failed: {}", e)))
}
