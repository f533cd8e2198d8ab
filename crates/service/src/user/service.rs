use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use super::domain::{CreateUserRequest, User};
use super::repository::UserRepository;
use crate::errors::ServiceError;
use crate::identity::{IdentityProvider, NewIdentity};

#[async_trait]
pub trait UserService: Send + Sync {
    /// Mint an identity with the provider, then persist the local record under
    /// the issued uid. If persistence fails the identity is deleted again.
    async fn create_user(&self, req: CreateUserRequest) -> Result<User, ServiceError>;
    async fn get_users(&self) -> Result<Vec<User>, ServiceError>;
    async fn get_user(&self, id: &str) -> Result<User, ServiceError>;
}

/// User service wired to a repository and an identity provider.
///
/// ```
/// use std::sync::Arc;
/// use service::identity::provider::mock::MockIdentityProvider;
/// use service::user::repository::mock::MockUserRepository;
/// use service::user::{CreateUserRequest, DefaultUserService, UserService};
///
/// tokio_test::block_on(async {
///     let svc = DefaultUserService::new(
///         Arc::new(MockUserRepository::new()),
///         Arc::new(MockIdentityProvider::new()),
///     );
///     let user = svc
///         .create_user(CreateUserRequest {
///             name: "John Doe".into(),
///             email: "john@example.com".into(),
///             password: "secret123".into(),
///             role: "user".into(),
///         })
///         .await
///         .unwrap();
///     assert_eq!(user.id, "uid-1");
///     assert_eq!(svc.get_users().await.unwrap().len(), 1);
/// });
/// ```
pub struct DefaultUserService<R: UserRepository> {
    repo: Arc<R>,
    identity: Arc<dyn IdentityProvider>,
}

impl<R: UserRepository> DefaultUserService<R> {
    pub fn new(repo: Arc<R>, identity: Arc<dyn IdentityProvider>) -> Self { Self { repo, identity } }
}

#[async_trait]
impl<R: UserRepository> UserService for DefaultUserService<R> {
    #[instrument(skip(self, req), fields(email = %req.email))]
    async fn create_user(&self, req: CreateUserRequest) -> Result<User, ServiceError> {
        let uid = self
            .identity
            .create_identity(NewIdentity {
                email: req.email.clone(),
                password: req.password,
                display_name: req.name.clone(),
                email_verified: false,
                disabled: false,
            })
            .await?;

        let user = User { id: uid, name: req.name, email: req.email, role: req.role };
        if let Err(err) = self.repo.register(&user).await {
            if let Err(cleanup) = self.identity.delete_identity(&user.id).await {
                error!(uid = %user.id, error = %cleanup, "failed to roll back identity after register failure");
            }
            return Err(err);
        }

        info!(uid = %user.id, "user_created");
        Ok(user)
    }

    async fn get_users(&self) -> Result<Vec<User>, ServiceError> {
        self.repo.get_all().await
    }

    async fn get_user(&self, id: &str) -> Result<User, ServiceError> {
        self.repo.find_by_id(id).await
    }
}
