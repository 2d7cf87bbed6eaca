use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::auth::{
    dto::{LoginRequest, SignUpRequest},
    password::{HashError, PasswordHasher},
    repo::{NewUser, StoreError, UserStore},
};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("passwords do not match")]
    PasswordMismatch,
    /// Existing email, whether seen by the lookup or by a unique-key race on insert.
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("user does not exist")]
    UserNotFound,
    #[error("invalid password")]
    InvalidCredentials,
    #[error("failed to look up user")]
    LookupFailed(#[source] StoreError),
    #[error("failed to create user")]
    CreateFailed(#[source] StoreError),
    #[error("failed to hash password")]
    HashingError(#[source] HashError),
}

/// Sign-up and login rules over a [`UserStore`] and a [`PasswordHasher`].
///
/// Holds no per-request state; clone the `Arc` handles freely.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn sign_up(&self, req: SignUpRequest) -> Result<(), AuthError> {
        let SignUpRequest {
            name,
            email,
            password,
            confirm_password,
        } = req;

        if password != confirm_password {
            warn!("password confirmation mismatch");
            return Err(AuthError::PasswordMismatch);
        }

        match self.store.find_by_email(&email).await {
            Ok(Some(_)) => {
                warn!("email already registered");
                return Err(AuthError::UserAlreadyExists);
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "find_by_email failed");
                return Err(AuthError::LookupFailed(e));
            }
        }

        let password_hash = self.hasher.hash(&password).map_err(|e| {
            error!(error = %e, "hash_password failed");
            AuthError::HashingError(e)
        })?;

        let user = self
            .store
            .create_user(NewUser {
                name,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateKey { .. } => {
                    warn!("email registered concurrently");
                    AuthError::UserAlreadyExists
                }
                other => {
                    error!(error = %other, "create user failed");
                    AuthError::CreateFailed(other)
                }
            })?;

        info!(user_id = user.id, "user registered");
        Ok(())
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn log_in(&self, req: LoginRequest) -> Result<(), AuthError> {
        let user = match self.store.find_by_email(&req.email).await {
            Ok(Some(u)) => u,
            Ok(None) => {
                warn!("login unknown email");
                return Err(AuthError::UserNotFound);
            }
            Err(e) => {
                error!(error = %e, "find_by_email failed");
                return Err(AuthError::LookupFailed(e));
            }
        };

        if !self.hasher.verify(&req.password, &user.password_hash) {
            warn!(user_id = user.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = user.id, "user logged in");
        Ok(())
    }
}
