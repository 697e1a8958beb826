use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::{info, warn};

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, PasswordChangeRequest, RegisterRequest, User};
use crate::infrastructure::jwt::TokenService;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    tokens: Arc<TokenService>,
}

impl<R: UserRepository> AuthService<R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        if self.repo.get_by_username(&req.username).await?.is_some() {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }

        let password_hash = self.hash_password(&req.password)?;
        let user = self
            .repo
            .save(User::unsaved(req.username, password_hash)?)
            .await?;

        let token = self.issue_token(&user)?;
        Ok(AuthResult { user, token })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user = match self.repo.get_by_username(&req.username).await? {
            Some(user) => user,
            None => {
                // keep the response time close to the "wrong password" path
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &user.password_hash)?;

        let token = self.issue_token(&user)?;
        Ok(AuthResult { user, token })
    }

    pub(crate) async fn change_password(
        &self,
        user_id: i64,
        req: PasswordChangeRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        let user = self.me(user_id).await?;

        self.verify_password(&req.old_password, &user.password_hash)?;
        let password_hash = self.hash_password(&req.new_password)?;
        self.repo.save(user.with_password_hash(password_hash)).await?;

        info!(user_id, "password changed");
        Ok(())
    }

    pub(crate) async fn me(&self, user_id: i64) -> Result<User, DomainError> {
        self.repo
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))
    }

    /// Verifies `token` and re-reads the identity it names. A valid token for
    /// a user that no longer exists is rejected.
    pub(crate) async fn authenticate_token(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.tokens.verify(token).map_err(|err| {
            warn!(error = %err, "bearer token rejected");
            DomainError::Unauthorized
        })?;

        self.repo
            .get_by_id(claims.user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    /// Creates a user at startup. Existing usernames are left untouched.
    pub(crate) async fn seed_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        if self.repo.get_by_username(username.trim()).await?.is_some() {
            return Ok(None);
        }
        let password_hash = self.hash_password(password)?;
        let user = self
            .repo
            .save(User::unsaved(username, password_hash)?)
            .await?;
        Ok(Some(user))
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.tokens
            .issue(user.id)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}
