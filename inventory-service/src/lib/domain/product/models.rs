use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::product::errors::ProductIdError;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::validation::required_text;
use crate::domain::validation::ValidationErrors;

/// Product aggregate entity, always owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub owner_id: UserId,
    pub owner_username: Username,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a fresh product for `owner` from validated input.
    pub fn new(
        draft: ProductDraft,
        owner_id: UserId,
        owner_username: Username,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProductId::new(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            quantity: draft.quantity,
            owner_id,
            owner_username,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields and bump `updated_at`.
    pub fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.quantity = draft.quantity;
        self.updated_at = now;
    }
}

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated create/update input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl ProductDraft {
    const MAX_PRICE_SCALE: u32 = 2;

    fn min_price() -> Decimal {
        Decimal::new(1, 2)
    }

    /// Exclusive upper bound of a `NUMERIC(10,2)` column.
    fn price_limit() -> Decimal {
        Decimal::new(100_000_000, 0)
    }

    /// Validate raw input, reporting every bad field at once.
    ///
    /// # Errors
    /// Field errors for `name`, `description`, `price` and `quantity`
    pub fn parse(
        name: Option<String>,
        description: Option<String>,
        price: Option<Decimal>,
        quantity: Option<i64>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", name);
        let description = required_text(&mut errors, "description", description);
        let price = errors.check("price", Self::parse_price(price));
        let quantity = errors.check("quantity", Self::parse_quantity(quantity));

        match (name, description, price, quantity) {
            (Some(name), Some(description), Some(price), Some(quantity)) => Ok(Self {
                name,
                description,
                price,
                quantity,
            }),
            _ => Err(errors),
        }
    }

    fn parse_price(price: Option<Decimal>) -> Result<Decimal, String> {
        let price = price.ok_or("price is required")?.normalize();
        if price < Self::min_price() {
            return Err("price must be at least 0.01".to_string());
        }
        if price >= Self::price_limit() {
            return Err("price must be less than 100000000".to_string());
        }
        if price.scale() > Self::MAX_PRICE_SCALE {
            return Err("price must have at most 2 decimal places".to_string());
        }
        Ok(price)
    }

    fn parse_quantity(quantity: Option<i64>) -> Result<i32, String> {
        let quantity = quantity.ok_or("quantity is required")?;
        if quantity < 0 {
            return Err("quantity must be at least 0".to_string());
        }
        i32::try_from(quantity).map_err(|_| format!("quantity must be at most {}", i32::MAX))
    }
}

/// Zero-based page request with a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 100;

    /// Missing values take defaults; out-of-range values are clamped.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32;
        let size = size
            .unwrap_or(i64::from(Self::DEFAULT_SIZE))
            .clamp(1, i64::from(Self::MAX_SIZE)) as u32;
        Self { page, size }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the totals needed to walk the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.size())),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
