use crate::auth::{create_token, hash_password, verify_password};
use crate::error::{AppError, Result};
use crate::user::user_models::{Role, User};
use crate::user::user_repository::UserRepository;

#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl AuthService {
    pub fn new(user_repository: UserRepository, jwt_secret: String, jwt_expiration_hours: i64) -> Self {
        Self {
            user_repository,
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    /// New accounts always start as interns; roles are granted through
    /// the admin endpoints afterwards.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String)> {
        let password_hash = hash_password(password)?;

        let user = self
            .user_repository
            .create(username, email, &password_hash, Role::Intern)
            .await?;

        let token = create_token(&user, &self.jwt_secret, self.jwt_expiration_hours)?;

        tracing::info!("Registered user {} ({})", user.username, user.id);

        Ok((user, token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !verify_password(password, password_hash)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        if !user.active {
            return Err(AppError::Authentication(
                "Account is deactivated".to_string(),
            ));
        }

        let token = create_token(&user, &self.jwt_secret, self.jwt_expiration_hours)?;

        Ok((user, token))
    }
}
