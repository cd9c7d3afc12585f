use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::models::ResolvedIdentity;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Page;
use crate::domain::product::models::PageRequest;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDraft;
use crate::domain::product::models::ProductId;
use crate::domain::user::models::UserId;

/// Product use cases. Every operation is scoped to `owner`; a product owned by
/// anyone else behaves exactly like one that does not exist.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    async fn create_product(
        &self,
        draft: ProductDraft,
        owner: &ResolvedIdentity,
    ) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Absent or not owned by `owner`
    async fn get_product(
        &self,
        id: ProductId,
        owner: &ResolvedIdentity,
    ) -> Result<Product, ProductError>;

    async fn list_products(
        &self,
        owner: &ResolvedIdentity,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError>;

    /// Case-insensitive substring match on name or description.
    async fn search_products(
        &self,
        owner: &ResolvedIdentity,
        term: &str,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError>;

    /// Every owned product with `quantity <= threshold`, unpaginated.
    async fn low_stock_products(
        &self,
        owner: &ResolvedIdentity,
        threshold: i32,
    ) -> Result<Vec<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - Absent or not owned by `owner`
    async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
        owner: &ResolvedIdentity,
    ) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Absent or not owned by `owner`
    async fn delete_product(&self, id: ProductId, owner: &ResolvedIdentity)
        -> Result<(), ProductError>;
}

/// Persistence for products. The owner predicate is part of every query and,
/// for mutations, is evaluated in the same transaction as the write.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    /// `None` when absent or owned by someone else.
    async fn find_owned(
        &self,
        id: ProductId,
        owner: UserId,
    ) -> Result<Option<Product>, ProductError>;

    async fn list_by_owner(
        &self,
        owner: UserId,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError>;

    async fn search_by_owner(
        &self,
        owner: UserId,
        term: &str,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError>;

    async fn low_stock_by_owner(
        &self,
        owner: UserId,
        threshold: i32,
    ) -> Result<Vec<Product>, ProductError>;

    /// Overwrite the mutable fields of an owned product.
    ///
    /// # Returns
    /// Updated product, or `None` when absent or owned by someone else
    async fn update_owned(
        &self,
        id: ProductId,
        owner: UserId,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Product>, ProductError>;

    /// # Returns
    /// `false` when nothing owned by `owner` was deleted
    async fn delete_owned(&self, id: ProductId, owner: UserId) -> Result<bool, ProductError>;
}
