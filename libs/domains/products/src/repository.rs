use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductOption};

/// Persistence for products.
///
/// Mutations return the number of affected rows; the service treats zero as a
/// failed save.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn exists(&self, id: Uuid) -> ProductResult<bool>;

    /// All products, or exact-name matches when the filter carries a name
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    async fn create(&self, product: Product) -> ProductResult<u64>;

    /// Replace every column of the row with `product.id`
    async fn update(&self, product: Product) -> ProductResult<u64>;

    /// Delete the product and all of its options atomically
    async fn delete_with_options(&self, id: Uuid) -> ProductResult<u64>;
}

/// Persistence for product options
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductOptionRepository: Send + Sync {
    async fn exists(&self, id: Uuid) -> ProductResult<bool>;

    async fn list_for_product(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>>;

    /// The option, only if it belongs to `product_id`
    async fn get_for_product(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> ProductResult<Option<ProductOption>>;

    async fn create(&self, option: ProductOption) -> ProductResult<u64>;

    async fn update(&self, option: ProductOption) -> ProductResult<u64>;

    async fn delete(&self, product_id: Uuid, option_id: Uuid) -> ProductResult<u64>;
}

#[derive(Debug, Default)]
struct Catalog {
    products: HashMap<Uuid, Product>,
    options: HashMap<Uuid, ProductOption>,
}

/// In-memory store implementing both repositories (for development/testing).
///
/// Clones share the same data, so one instance can back both sides of a
/// [`ProductService`](crate::ProductService). Key and foreign-key violations
/// are reported like store faults.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_by_name<T>(items: &mut [T], key: impl Fn(&T) -> (&str, Uuid)) {
    items.sort_by(|a, b| key(a).cmp(&key(b)));
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.inner.read().await.products.contains_key(&id))
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let catalog = self.inner.read().await;

        let mut result: Vec<Product> = catalog
            .products
            .values()
            .filter(|p| filter.name().is_none_or(|name| p.name == name))
            .cloned()
            .collect();

        sort_by_name(&mut result, |p| (p.name.as_str(), p.id));
        Ok(result)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn create(&self, product: Product) -> ProductResult<u64> {
        let mut catalog = self.inner.write().await;

        if catalog.products.contains_key(&product.id) {
            return Err(ProductError::Unhandled(format!(
                "duplicate key value violates unique constraint \"products_pkey\": {}",
                product.id
            )));
        }

        tracing::info!(product_id = %product.id, "Created product");
        catalog.products.insert(product.id, product);
        Ok(1)
    }

    async fn update(&self, product: Product) -> ProductResult<u64> {
        let mut catalog = self.inner.write().await;

        match catalog.products.get_mut(&product.id) {
            Some(existing) => {
                tracing::info!(product_id = %product.id, "Updated product");
                *existing = product;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_with_options(&self, id: Uuid) -> ProductResult<u64> {
        let mut catalog = self.inner.write().await;

        if catalog.products.remove(&id).is_none() {
            return Ok(0);
        }

        let before = catalog.options.len();
        catalog.options.retain(|_, o| o.product_id != id);
        let removed_options = (before - catalog.options.len()) as u64;

        tracing::info!(product_id = %id, removed_options, "Deleted product");
        Ok(1 + removed_options)
    }
}

#[async_trait]
impl ProductOptionRepository for InMemoryCatalog {
    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.inner.read().await.options.contains_key(&id))
    }

    async fn list_for_product(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        let catalog = self.inner.read().await;

        let mut result: Vec<ProductOption> = catalog
            .options
            .values()
            .filter(|o| o.product_id == product_id)
            .cloned()
            .collect();

        sort_by_name(&mut result, |o| (o.name.as_str(), o.id));
        Ok(result)
    }

    async fn get_for_product(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> ProductResult<Option<ProductOption>> {
        let catalog = self.inner.read().await;
        Ok(catalog
            .options
            .get(&option_id)
            .filter(|o| o.product_id == product_id)
            .cloned())
    }

    async fn create(&self, option: ProductOption) -> ProductResult<u64> {
        let mut catalog = self.inner.write().await;

        if !catalog.products.contains_key(&option.product_id) {
            return Err(ProductError::Unhandled(format!(
                "insert on table \"product_options\" violates foreign key constraint: product {} does not exist",
                option.product_id
            )));
        }
        if catalog.options.contains_key(&option.id) {
            return Err(ProductError::Unhandled(format!(
                "duplicate key value violates unique constraint \"product_options_pkey\": {}",
                option.id
            )));
        }

        tracing::info!(
            option_id = %option.id,
            product_id = %option.product_id,
            "Created product option"
        );
        catalog.options.insert(option.id, option);
        Ok(1)
    }

    async fn update(&self, option: ProductOption) -> ProductResult<u64> {
        let mut catalog = self.inner.write().await;

        match catalog.options.get_mut(&option.id) {
            Some(existing) if existing.product_id == option.product_id => {
                tracing::info!(option_id = %option.id, "Updated product option");
                *existing = option;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete(&self, product_id: Uuid, option_id: Uuid) -> ProductResult<u64> {
        let mut catalog = self.inner.write().await;

        let belongs = catalog
            .options
            .get(&option_id)
            .is_some_and(|o| o.product_id == product_id);

        if belongs {
            catalog.options.remove(&option_id);
            tracing::info!(option_id = %option_id, %product_id, "Deleted product option");
            Ok(1)
        } else {
            Ok(0)
        }
    }
}
