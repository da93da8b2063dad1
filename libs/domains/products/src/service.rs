//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductInput, ProductOption, ProductOptionInput};
use crate::repository::{ProductOptionRepository, ProductRepository};

/// Product and product option operations.
///
/// Every mutation validates and checks existence before touching the store,
/// then treats a zero affected-row count as a failed save.
pub struct ProductService<P: ProductRepository, O: ProductOptionRepository> {
    products: Arc<P>,
    options: Arc<O>,
}

impl<P: ProductRepository, O: ProductOptionRepository> ProductService<P, O> {
    pub fn new(products: P, options: O) -> Self {
        Self {
            products: Arc::new(products),
            options: Arc::new(options),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.products.list(filter).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::ProductNotFound(id))
    }

    /// Create a product; a missing id is generated
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        if let Some(id) = input.id {
            if self.products.exists(id).await? {
                return Err(ProductError::DuplicateId(id));
            }
        }

        input.validate()?;

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let product = input.into_product(id);

        let rows = self.products.create(product.clone()).await?;
        ensure_saved(rows, || format!("Failed to save product {}", id))?;

        Ok(product)
    }

    /// Replace every field of product `id`
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: ProductInput) -> ProductResult<Product> {
        input.validate()?;

        if let Some(body_id) = input.id.filter(|body_id| *body_id != id) {
            return Err(ProductError::IdMismatch(format!(
                "Body id {} does not match path id {}",
                body_id, id
            )));
        }

        if !self.products.exists(id).await? {
            return Err(ProductError::ProductNotFound(id));
        }

        let product = input.into_product(id);
        let rows = self.products.update(product.clone()).await?;
        ensure_saved(rows, || format!("Failed to update product {}", id))?;

        Ok(product)
    }

    /// Delete product `id` together with its options
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let product = self.get_product(id).await?;

        let rows = self.products.delete_with_options(product.id).await?;
        ensure_saved(rows, || format!("Failed to delete product {}", id))
    }

    #[instrument(skip(self))]
    pub async fn list_options(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        if !self.products.exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }

        self.options.list_for_product(product_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> ProductResult<ProductOption> {
        self.options
            .get_for_product(product_id, option_id)
            .await?
            .ok_or(ProductError::OptionNotFound {
                product_id,
                option_id,
            })
    }

    /// Create an option under `product_id`; a missing option id is generated
    #[instrument(skip(self, input), fields(option_name = %input.name))]
    pub async fn create_option(
        &self,
        product_id: Uuid,
        input: ProductOptionInput,
    ) -> ProductResult<ProductOption> {
        check_product_id(&input, product_id)?;
        input.validate()?;

        if !self.products.exists(product_id).await? {
            return Err(ProductError::ProductNotFound(product_id));
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let option = input.into_option(id, product_id);

        let rows = self.options.create(option.clone()).await?;
        ensure_saved(rows, || format!("Failed to save option {}", id))?;

        Ok(option)
    }

    /// Replace every field of an option; it cannot move to another product
    #[instrument(skip(self, input))]
    pub async fn update_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
        input: ProductOptionInput,
    ) -> ProductResult<ProductOption> {
        if let Some(body_id) = input.id.filter(|body_id| *body_id != option_id) {
            return Err(ProductError::IdMismatch(format!(
                "Body id {} does not match path option id {}",
                body_id, option_id
            )));
        }
        check_product_id(&input, product_id)?;
        input.validate()?;

        self.get_option(product_id, option_id).await?;

        let option = input.into_option(option_id, product_id);
        let rows = self.options.update(option.clone()).await?;
        ensure_saved(rows, || format!("Failed to update option {}", option_id))?;

        Ok(option)
    }

    #[instrument(skip(self))]
    pub async fn delete_option(&self, product_id: Uuid, option_id: Uuid) -> ProductResult<()> {
        let not_found = || ProductError::OptionNotFound {
            product_id,
            option_id,
        };

        if !self.options.exists(option_id).await? {
            return Err(not_found());
        }

        // The option must also belong to this product
        self.options
            .get_for_product(product_id, option_id)
            .await?
            .ok_or_else(not_found)?;

        let rows = self.options.delete(product_id, option_id).await?;
        ensure_saved(rows, || format!("Failed to delete option {}", option_id))
    }
}

fn check_product_id(input: &ProductOptionInput, product_id: Uuid) -> ProductResult<()> {
    match input.product_id {
        Some(body_id) if body_id != product_id => Err(ProductError::IdMismatch(format!(
            "Body productId {} does not match path product id {}",
            body_id, product_id
        ))),
        _ => Ok(()),
    }
}

fn ensure_saved(rows: u64, message: impl FnOnce() -> String) -> ProductResult<()> {
    if rows == 0 {
        return Err(ProductError::SaveFailed(message()));
    }
    Ok(())
}
