//! Authentication service - login, token verification and account seeding.
//!
//! Password hashing lives in the domain `Password` value object. Accounts
//! are created from the CLI only; there is no public registration.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::Config;
use crate::domain::{Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Verified against when the username is unknown, so a miss costs the same
/// Argon2 work as a wrong password.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$RjiTbCpW1kf8iJfad8+CZg$W80C+sMLw5TlUNz/YrUJzA4sCizSEyaqG3FD0ZpNads";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    /// Kept as text; the middleware rejects roles it does not know
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Returned by `POST /login`
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed HS256 token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "admin")]
    pub role: UserRole,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token
    async fn login(&self, username: String, password: String) -> AppResult<LoginResponse>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Create an account with a hashed password
    async fn create_user(&self, username: String, password: String, role: UserRole) -> AppResult<User>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<LoginResponse> {
        let user = self.uow.users().find_by_username(&username).await?;

        let stored = Password::from_hash(
            user.as_ref().map_or(DUMMY_HASH, |u| u.password_hash.as_str()),
        );
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => {
                let token = generate_token(&user, &self.config)?;
                tracing::info!(user_id = user.id, role = %user.role, "User logged in");
                Ok(LoginResponse {
                    token,
                    role: user.role,
                })
            }
            _ => {
                tracing::debug!(%username, "Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn create_user(&self, username: String, password: String, role: UserRole) -> AppResult<User> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if self.uow.users().find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self.uow.users().create(username, password_hash, role).await?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockUserRepository;
    use crate::infra::{
        CatalogRepository, EmployeeRepository, PlanningRepository, TransactionContext,
        UserRepository,
    };
    use mockall::predicate::eq;
    use sea_orm::DatabaseConnection;

    /// Unit of work serving a mocked user repository; no database behind it
    struct TestUnitOfWork {
        user_repo: Arc<MockUserRepository>,
        db: DatabaseConnection,
    }

    impl TestUnitOfWork {
        fn new(user_repo: MockUserRepository) -> Self {
            Self {
                user_repo: Arc::new(user_repo),
                db: DatabaseConnection::Disconnected,
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }

        fn plannings(&self) -> PlanningRepository<'_, DatabaseConnection> {
            PlanningRepository::new(&self.db)
        }

        fn employees(&self) -> EmployeeRepository<'_, DatabaseConnection> {
            EmployeeRepository::new(&self.db)
        }

        fn catalog(&self) -> CatalogRepository<'_, DatabaseConnection> {
            CatalogRepository::new(&self.db)
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    fn test_config() -> Config {
        Config::builder("sqlite::memory:", "test-secret-that-is-long-enough-for-hs256").unwrap()
    }

    fn stored_user(password: &str, role: UserRole) -> User {
        User {
            id: 7,
            username: "planner".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(Arc::new(TestUnitOfWork::new(repo)), test_config())
    }

    // =========================================================================
    // Login
    // =========================================================================

    #[tokio::test]
    async fn test_login_returns_token_and_role() {
        let user = stored_user("correct-horse", UserRole::Admin);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .with(eq("planner"))
            .returning(move |_| Ok(Some(user.clone())));

        let auth = service(repo);
        let response = auth
            .login("planner".to_string(), "correct-horse".to_string())
            .await
            .unwrap();

        assert_eq!(response.role, UserRole::Admin);
        let claims = auth.verify_token(&response.token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "planner");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = stored_user("correct-horse", UserRole::User);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repo)
            .login("planner".to_string(), "battery-staple".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let result = service(repo)
            .login("ghost".to_string(), "whatever-pass".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_dummy_hash_is_well_formed() {
        assert!(argon2::PasswordHash::new(DUMMY_HASH).is_ok());
        assert!(!Password::from_hash(DUMMY_HASH).verify("anything"));
    }

    #[tokio::test]
    async fn test_verify_token_rejects_garbage() {
        let auth = service(MockUserRepository::new());
        assert!(matches!(auth.verify_token("not-a-jwt"), Err(AppError::Jwt(_))));
    }

    // =========================================================================
    // Account creation
    // =========================================================================

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|username, hash, role| {
                username == "planner" && hash.starts_with("$argon2") && *role == UserRole::ReadOnly
            })
            .returning(|username, password_hash, role| {
                Ok(User {
                    id: 1,
                    username,
                    password_hash,
                    role,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let user = service(repo)
            .create_user(" planner ".to_string(), "long-enough".to_string(), UserRole::ReadOnly)
            .await
            .unwrap();

        assert_eq!(user.username, "planner");
        assert!(Password::from_hash(user.password_hash).verify("long-enough"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate() {
        let user = stored_user("correct-horse", UserRole::User);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_create().never();

        let result = service(repo)
            .create_user("planner".to_string(), "long-enough".to_string(), UserRole::User)
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_user_short_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create().never();

        let result = service(repo)
            .create_user("planner".to_string(), "short".to_string(), UserRole::User)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
