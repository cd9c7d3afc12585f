//! Process-local adapters with the same semantics as the PostgreSQL ones.
//!
//! Used by the HTTP integration tests and by `database.backend = "memory"`.
//! Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Page;
use crate::domain::product::models::PageRequest;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDraft;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Username, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        Ok(self.users.read().await.values().any(|u| &u.email == email))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned products matching `filter`, in page order.
    async fn owned_sorted(&self, owner: UserId, filter: impl Fn(&Product) -> bool) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.owner_id == owner && filter(*p))
            .cloned()
            .collect();
        products.sort_by(|a, b| (a.created_at, a.id.0).cmp(&(b.created_at, b.id.0)));
        products
    }

    fn paginate(products: Vec<Product>, request: PageRequest) -> Page<Product> {
        let total = products.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = products
            .into_iter()
            .skip(offset)
            .take(request.size() as usize)
            .collect();
        Page::new(content, request, total)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_owned(
        &self,
        id: ProductId,
        owner: UserId,
    ) -> Result<Option<Product>, ProductError> {
        Ok(self
            .products
            .read()
            .await
            .get(&id)
            .filter(|p| p.owner_id == owner)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let products = self.owned_sorted(owner, |_| true).await;
        Ok(Self::paginate(products, request))
    }

    async fn search_by_owner(
        &self,
        owner: UserId,
        term: &str,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let term = term.to_lowercase();
        let products = self
            .owned_sorted(owner, |p| {
                p.name.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
            })
            .await;
        Ok(Self::paginate(products, request))
    }

    async fn low_stock_by_owner(
        &self,
        owner: UserId,
        threshold: i32,
    ) -> Result<Vec<Product>, ProductError> {
        Ok(self.owned_sorted(owner, |p| p.quantity <= threshold).await)
    }

    async fn update_owned(
        &self,
        id: ProductId,
        owner: UserId,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Product>, ProductError> {
        // The write guard spans the ownership check and the mutation.
        let mut products = self.products.write().await;

        Ok(products
            .get_mut(&id)
            .filter(|p| p.owner_id == owner)
            .map(|p| {
                p.apply(draft, now);
                p.clone()
            }))
    }

    async fn delete_owned(&self, id: ProductId, owner: UserId) -> Result<bool, ProductError> {
        let mut products = self.products.write().await;

        match products.get(&id) {
            Some(p) if p.owner_id == owner => {
                products.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
