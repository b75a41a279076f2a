//! Product Models

use gazalla::Category;
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub image_url: String,
    pub stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Product> for gazalla::Product {
    fn from(product: &Product) -> Self {
        Self {
            id: product.uuid.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category,
            image_url: product.image_url.clone(),
            stock: product.stock,
        }
    }
}
