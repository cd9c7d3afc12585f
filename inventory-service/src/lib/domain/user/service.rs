use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user registration.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        tracing::info!(username = %command.username, "Registering user");

        // Username is checked before email so a taken username wins the report.
        if self.repository.exists_by_username(&command.username).await? {
            tracing::warn!(username = %command.username, "Username already exists");
            return Err(UserError::UsernameAlreadyExists(
                command.username.as_str().to_string(),
            ));
        }

        if self.repository.exists_by_email(&command.email).await? {
            tracing::warn!(username = %command.username, "Email already exists");
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.expose())
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError> {
        self.repository.exists_by_username(username).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError>;
            async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;
        }
    }

    fn command(username: &str, email: &str) -> CreateUserCommand {
        CreateUserCommand {
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password: Password::new("secret1".to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.email.as_str() == "a@x.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository));

        let user = service
            .create_user(command("alice", "a@x.com"))
            .await
            .expect("registration should succeed");

        assert_eq!(user.username.as_str(), "alice");
        assert_eq!(user.email.as_str(), "a@x.com");
        // Password is hashed with real Argon2, never stored as given
        assert_ne!(user.password_hash, "secret1");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username_even_with_new_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_exists_by_email().times(0);
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service.create_user(command("alice", "other@x.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_even_with_new_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service.create_user(command("bob", "a@x.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_create_user_race_reported_by_store() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists_by_username()
            .returning(|_| Ok(false));
        repository.expect_exists_by_email().returning(|_| Ok(false));
        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let result = service.create_user(command("alice", "a@x.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_exists_by_username_delegates_to_store() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists_by_username()
            .times(2)
            .returning(|u| Ok(u.as_str() == "admin"));

        let service = UserService::new(Arc::new(repository));

        let admin = Username::new("admin".to_string()).unwrap();
        let alice = Username::new("alice".to_string()).unwrap();
        assert!(service.exists_by_username(&admin).await.unwrap());
        assert!(!service.exists_by_username(&alice).await.unwrap());
    }
}
