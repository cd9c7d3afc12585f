use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::product::models::Page;
use crate::domain::product::models::PageRequest;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDraft;
use crate::domain::product::models::ProductId;
use crate::domain::validation::ValidationErrors;
use crate::inbound::http::handlers::ApiError;

/// HTTP request body for creating or replacing a product (raw JSON).
///
/// Every field is optional here so that missing fields surface as field
/// errors rather than as a body rejection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRequestBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<serde_json::Number>,
    #[serde(default)]
    quantity: Option<i64>,
}

impl ProductRequestBody {
    pub fn try_into_draft(self) -> Result<ProductDraft, ValidationErrors> {
        match self.price.as_ref().map(number_to_decimal).transpose() {
            Ok(price) => ProductDraft::parse(self.name, self.description, price, self.quantity),
            Err(message) => {
                // Keep reporting the other fields alongside the unreadable price.
                let placeholder = Some(Decimal::ONE);
                let mut errors =
                    ProductDraft::parse(self.name, self.description, placeholder, self.quantity)
                        .err()
                        .unwrap_or_default();
                errors.add("price", message);
                Err(errors)
            }
        }
    }
}

/// Decimal value of a JSON number exactly as written, e.g. `9.99` stays `9.99`.
fn number_to_decimal(number: &serde_json::Number) -> Result<Decimal, String> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| "price is out of range".to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductData {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            username: product.owner_username.as_str().to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T: Serialize + PartialEq> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<Product>> for PageData<ProductData> {
    fn from(page: Page<Product>) -> Self {
        let page = page.map(ProductData::from);
        Self {
            content: page.content,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }
}

/// `?page=&size=` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    page: Option<i64>,
    size: Option<i64>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        PageRequest::new(params.page, params.size)
    }
}

pub fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::from_string(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid product ID: {}", e)))
}
