use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::auth::models::ResolvedIdentity;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Page;
use crate::domain::product::models::PageRequest;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDraft;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Domain service implementation for owner-scoped product operations.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(
        &self,
        draft: ProductDraft,
        owner: &ResolvedIdentity,
    ) -> Result<Product, ProductError> {
        let product = Product::new(draft, owner.user_id, owner.username.clone(), Utc::now());
        let created = self.repository.create(product).await?;

        tracing::info!(product_id = %created.id, owner = %owner.username, "Product created");
        Ok(created)
    }

    async fn get_product(
        &self,
        id: ProductId,
        owner: &ResolvedIdentity,
    ) -> Result<Product, ProductError> {
        self.repository
            .find_owned(id, owner.user_id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    async fn list_products(
        &self,
        owner: &ResolvedIdentity,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        self.repository.list_by_owner(owner.user_id, request).await
    }

    async fn search_products(
        &self,
        owner: &ResolvedIdentity,
        term: &str,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        self.repository
            .search_by_owner(owner.user_id, term, request)
            .await
    }

    async fn low_stock_products(
        &self,
        owner: &ResolvedIdentity,
        threshold: i32,
    ) -> Result<Vec<Product>, ProductError> {
        self.repository
            .low_stock_by_owner(owner.user_id, threshold)
            .await
    }

    async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
        owner: &ResolvedIdentity,
    ) -> Result<Product, ProductError> {
        let updated = self
            .repository
            .update_owned(id, owner.user_id, draft, Utc::now())
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    product_id = %id,
                    owner = %owner.username,
                    "Update of unowned or missing product"
                );
                ProductError::NotFound(id.to_string())
            })?;

        tracing::info!(product_id = %id, owner = %owner.username, "Product updated");
        Ok(updated)
    }

    async fn delete_product(
        &self,
        id: ProductId,
        owner: &ResolvedIdentity,
    ) -> Result<(), ProductError> {
        if !self.repository.delete_owned(id, owner.user_id).await? {
            tracing::warn!(
                product_id = %id,
                owner = %owner.username,
                "Delete of unowned or missing product"
            );
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %id, owner = %owner.username, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use mockall::mock;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    mock! {
        pub TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn create(&self, product: Product) -> Result<Product, ProductError>;
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
            async fn update_owned(
                &self,
                id: ProductId,
                owner: UserId,
                draft: ProductDraft,
                now: DateTime<Utc>,
            ) -> Result<Option<Product>, ProductError>;
            async fn delete_owned(
                &self,
                id: ProductId,
                owner: UserId,
            ) -> Result<bool, ProductError>;
        }
    }

    fn identity(name: &str) -> ResolvedIdentity {
        ResolvedIdentity {
            user_id: UserId::new(),
            username: Username::new(name.to_string()).unwrap(),
        }
    }

    fn widget() -> ProductDraft {
        ProductDraft {
            name: "Widget".to_string(),
            description: "d".to_string(),
            price: Decimal::new(999, 2),
            quantity: 3,
        }
    }

    #[tokio::test]
    async fn test_create_product_stamps_owner_and_timestamps() {
        let mut repository = MockTestProductRepository::new();
        let alice = identity("alice");
        let alice_id = alice.user_id;

        repository
            .expect_create()
            .withf(move |p| {
                p.owner_id == alice_id
                    && p.owner_username.as_str() == "alice"
                    && p.created_at == p.updated_at
            })
            .times(1)
            .returning(Ok);

        let service = ProductService::new(Arc::new(repository));
        let product = service.create_product(widget(), &alice).await.unwrap();

        assert_eq!(product.quantity, 3);
        assert_eq!(product.price, Decimal::new(999, 2));
    }

    #[tokio::test]
    async fn test_get_product_scoped_to_owner() {
        let mut repository = MockTestProductRepository::new();
        let alice = identity("alice");
        let bob = identity("bob");
        let product = Product::new(widget(), alice.user_id, alice.username.clone(), Utc::now());
        let product_id = product.id;
        let alice_id = alice.user_id;

        repository
            .expect_find_owned()
            .returning(move |id, owner| {
                Ok((id == product.id && owner == alice_id).then(|| product.clone()))
            });

        let service = ProductService::new(Arc::new(repository));

        assert!(service.get_product(product_id, &alice).await.is_ok());

        let foreign = service.get_product(product_id, &bob).await.unwrap_err();
        let missing = service
            .get_product(ProductId::new(), &alice)
            .await
            .unwrap_err();

        // Someone else's product is indistinguishable from a missing one
        assert!(matches!(foreign, ProductError::NotFound(_)));
        assert!(matches!(missing, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_not_found() {
        let mut repository = MockTestProductRepository::new();
        let bob = identity("bob");
        let id = ProductId::new();

        repository
            .expect_update_owned()
            .with(eq(id), eq(bob.user_id), eq(widget()), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _, _| Ok(None));

        let service = ProductService::new(Arc::new(repository));

        let err = service.update_product(id, widget(), &bob).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_returns_updated_product() {
        let mut repository = MockTestProductRepository::new();
        let alice = identity("alice");
        let mut existing =
            Product::new(widget(), alice.user_id, alice.username.clone(), Utc::now());
        let id = existing.id;

        repository
            .expect_update_owned()
            .times(1)
            .returning(move |_, _, draft, now| {
                existing.apply(draft, now);
                Ok(Some(existing.clone()))
            });

        let service = ProductService::new(Arc::new(repository));

        let mut draft = widget();
        draft.quantity = 42;
        let updated = service.update_product(id, draft, &alice).await.unwrap();
        assert_eq!(updated.quantity, 42);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_not_found() {
        let mut repository = MockTestProductRepository::new();
        let bob = identity("bob");

        repository
            .expect_delete_owned()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = ProductService::new(Arc::new(repository));

        let err = service
            .delete_product(ProductId::new(), &bob)
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut repository = MockTestProductRepository::new();
        let alice = identity("alice");

        repository
            .expect_delete_owned()
            .times(1)
            .returning(|_, _| Ok(true));

        let service = ProductService::new(Arc::new(repository));
        assert!(service.delete_product(ProductId::new(), &alice).await.is_ok());
    }

    #[tokio::test]
    async fn test_queries_pass_owner_through() {
        let mut repository = MockTestProductRepository::new();
        let alice = identity("alice");
        let alice_id = alice.user_id;

        repository
            .expect_list_by_owner()
            .with(eq(alice_id), eq(PageRequest::default()))
            .times(1)
            .returning(|_, request| Ok(Page::new(Vec::new(), request, 0)));
        repository
            .expect_search_by_owner()
            .withf(move |owner, term, _| *owner == alice_id && term.to_string() == "wid")
            .times(1)
            .returning(|_, _, request| Ok(Page::new(Vec::new(), request, 0)));
        repository
            .expect_low_stock_by_owner()
            .with(eq(alice_id), eq(5))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let service = ProductService::new(Arc::new(repository));

        let page = service
            .list_products(&alice, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_elements, 0);
        assert!(service
            .search_products(&alice, "wid", PageRequest::default())
            .await
            .unwrap()
            .content
            .is_empty());
        assert!(service.low_stock_products(&alice, 5).await.unwrap().is_empty());
    }
}
