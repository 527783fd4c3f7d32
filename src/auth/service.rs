use super::password::{generate_salt, hash_password, verify_password};
use super::validate;
use crate::error::AuthError;
use crate::model::{NewUser, User};
use crate::repo::{StoreError, UserStore};
use crate::session::SessionStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Sign-up / sign-in flows over the user store and session state.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    session: Arc<dyn SessionStore>,
    min_password_length: usize,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        session: Arc<dyn SessionStore>,
        min_password_length: usize,
    ) -> Self {
        Self {
            users,
            session,
            min_password_length,
        }
    }

    /// Creates the account and returns its id. Does not sign the user in.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, AuthError> {
        validate::validate_name(name).map_err(AuthError::Validation)?;
        validate::validate_email(email).map_err(AuthError::Validation)?;
        validate::validate_password(password, self.min_password_length)
            .map_err(AuthError::Validation)?;

        let email = validate::normalize_email(email);

        if self.users.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let salt = generate_salt();
        let password_hash = hash_password(password, &salt);

        let user = NewUser {
            name: name.trim().to_string(),
            email: email.clone(),
            password_hash,
            password_salt: salt,
            created_at: Utc::now(),
        };

        // The unique index is the backstop if two sign-ups race past the
        // existence check.
        let user_id = match self.users.insert(&user).await {
            Ok(id) => id,
            Err(StoreError::Duplicate) => return Err(AuthError::EmailTaken),
            Err(e) => return Err(e.into()),
        };

        info!(user_id, "account created");
        Ok(user_id)
    }

    /// Verifies credentials and persists the session. Unknown email and bad
    /// password are indistinguishable to the caller.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Please enter email and password".to_string(),
            ));
        }

        let email = validate::normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            info!("sign-in rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash, &user.password_salt) {
            warn!(user_id = user.id, "sign-in rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.session.save(user.id, &user.email)?;
        info!(user_id = user.id, "signed in");
        Ok(user)
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        Ok(())
    }
}
