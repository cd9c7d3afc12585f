use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Page;
use crate::domain::product::models::PageRequest;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDraft;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

const PRODUCT_COLUMNS: &str = r#"
    p.id, p.name, p.description, p.price, p.quantity, p.user_id,
    u.username, p.created_at, p.updated_at
"#;

const SEARCH_PREDICATE: &str = r#"
    (strpos(lower(p.name), lower($2)) > 0 OR strpos(lower(p.description), lower($2)) > 0)
"#;

const LOCK_OWNED_ROW: &str = "SELECT id FROM products WHERE id = $1 AND user_id = $2 FOR UPDATE";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product, ProductError> {
        let username: String = row.get("username");
        Ok(Product {
            id: ProductId(row.get("id")),
            name: row.get("name"),
            description: row.get("description"),
            price: row.get("price"),
            quantity: row.get("quantity"),
            owner_id: UserId(row.get("user_id")),
            owner_username: Username::new(username).map_err(|e| {
                ProductError::DatabaseError(format!("Corrupt owner username: {}", e))
            })?,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn limit_offset(request: PageRequest) -> (i64, i64) {
        (
            i64::from(request.size()),
            i64::try_from(request.offset()).unwrap_or(i64::MAX),
        )
    }
}

fn database_error(e: sqlx::Error) -> ProductError {
    ProductError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, name, description, price, quantity, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.owner_id.0)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(product)
    }

    async fn find_owned(
        &self,
        id: ProductId,
        owner: UserId,
    ) -> Result<Option<Product>, ProductError> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p JOIN users u ON u.id = p.user_id \
             WHERE p.id = $1 AND p.user_id = $2"
        );

        let row = sqlx::query(&query)
            .bind(id.0)
            .bind(owner.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(Self::row_to_product).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let (limit, offset) = Self::limit_offset(request);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE user_id = $1")
            .bind(owner.0)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p JOIN users u ON u.id = p.user_id \
             WHERE p.user_id = $1 \
             ORDER BY p.created_at ASC, p.id ASC LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query(&query)
            .bind(owner.0)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        let content = rows
            .into_iter()
            .map(Self::row_to_product)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, total.max(0) as u64))
    }

    async fn search_by_owner(
        &self,
        owner: UserId,
        term: &str,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let (limit, offset) = Self::limit_offset(request);

        let count_query = format!(
            "SELECT COUNT(*) FROM products p WHERE p.user_id = $1 AND {SEARCH_PREDICATE}"
        );
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(owner.0)
            .bind(term)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p JOIN users u ON u.id = p.user_id \
             WHERE p.user_id = $1 AND {SEARCH_PREDICATE} \
             ORDER BY p.created_at ASC, p.id ASC LIMIT $3 OFFSET $4"
        );

        let rows = sqlx::query(&query)
            .bind(owner.0)
            .bind(term)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        let content = rows
            .into_iter()
            .map(Self::row_to_product)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, total.max(0) as u64))
    }

    async fn low_stock_by_owner(
        &self,
        owner: UserId,
        threshold: i32,
    ) -> Result<Vec<Product>, ProductError> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p JOIN users u ON u.id = p.user_id \
             WHERE p.user_id = $1 AND p.quantity <= $2 \
             ORDER BY p.created_at ASC, p.id ASC"
        );

        let rows = sqlx::query(&query)
            .bind(owner.0)
            .bind(threshold)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn update_owned(
        &self,
        id: ProductId,
        owner: UserId,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Product>, ProductError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let locked = sqlx::query(LOCK_OWNED_ROW)
            .bind(id.0)
            .bind(owner.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error)?;

        if locked.is_none() {
            tx.rollback().await.map_err(database_error)?;
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            UPDATE products p
            SET name = $3, description = $4, price = $5, quantity = $6, updated_at = $7
            FROM users u
            WHERE p.id = $1 AND p.user_id = $2 AND u.id = p.user_id
            RETURNING p.id, p.name, p.description, p.price, p.quantity, p.user_id,
                      u.username, p.created_at, p.updated_at
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        row.map(Self::row_to_product).transpose()
    }

    async fn delete_owned(&self, id: ProductId, owner: UserId) -> Result<bool, ProductError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let locked = sqlx::query(LOCK_OWNED_ROW)
            .bind(id.0)
            .bind(owner.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error)?;

        if locked.is_none() {
            tx.rollback().await.map_err(database_error)?;
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(owner.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
