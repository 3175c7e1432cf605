//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, NewProductOption},
        errors::ProductsServiceError,
        records::{OptionUuid, ProductOptionRecord, ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_option(
        &self,
        option: OptionUuid,
    ) -> Result<ProductOptionRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let option = self.repository.get_option(&mut tx, option).await?;

        tx.commit().await?;

        Ok(option)
    }

    async fn create_option(
        &self,
        option: NewProductOption,
    ) -> Result<ProductOptionRecord, ProductsServiceError> {
        if option.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_option(&mut tx, &option).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single live product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product with the given details.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single product option.
    async fn get_option(
        &self,
        option: OptionUuid,
    ) -> Result<ProductOptionRecord, ProductsServiceError>;

    /// Creates a new size, temperature or variant option.
    async fn create_option(
        &self,
        option: NewProductOption,
    ) -> Result<ProductOptionRecord, ProductsServiceError>;
}
