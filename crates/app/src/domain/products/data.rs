//! Products Data

use gazalla::Category;
use rust_decimal::Decimal;

use crate::domain::products::{errors::ProductsServiceError, models::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub image_url: String,
    pub stock: u32,
}

/// Product Update Data
///
/// `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<Category>,
    pub image_url: Option<String>,
    pub stock: Option<u32>,
}

/// The storefront's starter catalog, used to seed empty stores.
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Leather Wallet".to_string(),
            description: "Genuine leather wallet with multiple card slots".to_string(),
            price: Decimal::new(4999, 2),
            category: Category::Men,
            image_url: "/images/wallet.jpg".to_string(),
            stock: 25,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Sunglasses".to_string(),
            description: "Stylish sunglasses with UV protection".to_string(),
            price: Decimal::new(8999, 2),
            category: Category::Women,
            image_url: "/images/sunglasses.jpg".to_string(),
            stock: 15,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Leather Belt".to_string(),
            description: "Premium leather belt with silver buckle".to_string(),
            price: Decimal::new(3999, 2),
            category: Category::Men,
            image_url: "/images/belt.jpg".to_string(),
            stock: 30,
        },
    ]
}

impl NewProduct {
    /// Checks the constraints the store enforces on every product.
    ///
    /// # Errors
    ///
    /// - [`ProductsServiceError::MissingRequiredData`]: the name is blank.
    /// - [`ProductsServiceError::InvalidData`]: the price is negative.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if self.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        if self.price < Decimal::ZERO {
            return Err(ProductsServiceError::InvalidData);
        }

        Ok(())
    }
}

impl ProductUpdate {
    /// Checks the fields being changed.
    ///
    /// # Errors
    ///
    /// Same rules as [`NewProduct::validate`].
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        if self.price.is_some_and(|price| price < Decimal::ZERO) {
            return Err(ProductsServiceError::InvalidData);
        }

        Ok(())
    }
}
