//! In-memory products store

use std::sync::Arc;

use async_trait::async_trait;
use gazalla::Category;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::products::{
    ProductsService,
    data::{NewProduct, ProductUpdate, sample_products},
    errors::ProductsServiceError,
    models::{Product, ProductUuid},
};

/// Products held in process memory. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductsService {
    products: Arc<RwLock<Vec<Product>>>,
}

impl MemoryProductsService {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the starter catalog.
    #[must_use]
    pub fn seeded() -> Self {
        let now = Timestamp::now();

        let products = sample_products()
            .into_iter()
            .map(|product| materialize(product, now))
            .collect();

        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

fn materialize(product: NewProduct, now: Timestamp) -> Product {
    Product {
        uuid: product.uuid,
        name: product.name,
        description: product.description,
        price: product.price,
        category: product.category,
        image_url: product.image_url,
        stock: product.stock,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl ProductsService for MemoryProductsService {
    async fn list_products(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let products = self.products.read().await;

        Ok(products
            .iter()
            .filter(|product| category.is_none_or(|category| product.category == category))
            .cloned()
            .collect())
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let products = self.products.read().await;

        products
            .iter()
            .find(|candidate| candidate.uuid == product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        product.validate()?;

        let mut products = self.products.write().await;

        if products.iter().any(|existing| existing.uuid == product.uuid) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let created = materialize(product, Timestamp::now());

        products.push(created.clone());

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        update.validate()?;

        let mut products = self.products.write().await;

        let existing = products
            .iter_mut()
            .find(|candidate| candidate.uuid == product)
            .ok_or(ProductsServiceError::NotFound)?;

        if let Some(name) = update.name {
            existing.name = name;
        }

        if let Some(description) = update.description {
            existing.description = description;
        }

        if let Some(price) = update.price {
            existing.price = price;
        }

        if let Some(category) = update.category {
            existing.category = category;
        }

        if let Some(image_url) = update.image_url {
            existing.image_url = image_url;
        }

        if let Some(stock) = update.stock {
            existing.stock = stock;
        }

        existing.updated_at = Timestamp::now();

        Ok(existing.clone())
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut products = self.products.write().await;
        let before = products.len();

        products.retain(|candidate| candidate.uuid != product);

        if products.len() == before {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }

    async fn replace_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        for product in &products {
            product.validate()?;
        }

        let now = Timestamp::now();
        let created: Vec<Product> = products
            .into_iter()
            .map(|product| materialize(product, now))
            .collect();

        *self.products.write().await = created.clone();

        Ok(created)
    }
}
