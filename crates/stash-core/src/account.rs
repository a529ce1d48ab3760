use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Credentials, NewUser};
use crate::password::{PasswordDigest, PasswordHasher};
use crate::token::TokenService;
use crate::traits::UserStore;

/// Registration and login on top of a [`UserStore`].
///
/// PBKDF2 is CPU-bound, so hashing and verification run on the blocking pool.
#[derive(Debug, Clone)]
pub struct AccountService<U>
where
    U: UserStore,
{
    store: U,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl<U> AccountService<U>
where
    U: UserStore,
{
    pub fn new(store: U, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Create an account. Returns the new user id.
    pub async fn register(&self, credentials: &Credentials) -> Result<Uuid, AppError> {
        credentials.validate()?;

        let hasher = self.hasher;
        let password = credentials.password.clone();
        let digest: PasswordDigest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Generic(format!("Password hashing task failed: {e}")))?;

        let id = self
            .store
            .create_user(&NewUser {
                username: credentials.login.clone(),
                password_hash: digest.hash,
                salt: digest.salt,
                iterations: digest.iterations,
            })
            .await?;

        tracing::info!(user_id = %id, login = %credentials.login, "Registered user");
        Ok(id)
    }

    /// Verify credentials and issue an access token for the matching user.
    ///
    /// Unknown logins still pay for one PBKDF2 run, so response time does not
    /// reveal which usernames exist.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AppError> {
        let Some(user) = self.store.find_by_username(&credentials.login).await? else {
            verify_off_thread(
                credentials.password.clone(),
                DUMMY_HASH.into(),
                DUMMY_SALT.into(),
                self.hasher.iterations(),
            )
            .await?;
            tracing::warn!(login = %credentials.login, "Failed login: unknown user");
            return Err(invalid_credentials());
        };

        let valid = verify_off_thread(
            credentials.password.clone(),
            user.password_hash,
            user.salt,
            user.iterations,
        )
        .await?;

        if !valid {
            tracing::warn!(login = %credentials.login, "Failed login: wrong password");
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = %user.id, "Issued access token");
        Ok(token)
    }
}

// Well-formed stand-in digest checked against when the login is unknown.
const DUMMY_SALT: &str = "00000000000000000000000000000000";
const DUMMY_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

async fn verify_off_thread(
    password: String,
    hash: String,
    salt: String,
    iterations: u32,
) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || PasswordHasher::verify(&password, &hash, &salt, iterations))
        .await
        .map_err(|e| AppError::Generic(format!("Password verification task failed: {e}")))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("invalid login or password".into())
}
