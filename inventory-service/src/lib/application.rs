use std::sync::Arc;

use auth::Authenticator;
use axum::Router;

use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::service::AuthService;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::product::service::ProductService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;
use crate::inbound::http::router::create_router;

/// The three domain services wired over one pair of repositories.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserServicePort>,
    pub auth: Arc<dyn AuthServicePort>,
    pub products: Arc<dyn ProductServicePort>,
}

impl Services {
    pub fn new<UR, PR>(
        user_repository: Arc<UR>,
        product_repository: Arc<PR>,
        authenticator: Arc<Authenticator>,
    ) -> Self
    where
        UR: UserRepository,
        PR: ProductRepository,
    {
        Self {
            users: Arc::new(UserService::new(Arc::clone(&user_repository))),
            auth: Arc::new(AuthService::new(user_repository, authenticator)),
            products: Arc::new(ProductService::new(product_repository)),
        }
    }

    pub fn router(&self) -> Router {
        create_router(
            Arc::clone(&self.users),
            Arc::clone(&self.auth),
            Arc::clone(&self.products),
        )
    }
}
