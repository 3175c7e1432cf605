//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid},
            repository::PgCartItemsRepository,
        },
        products::{
            records::{OptionKind, OptionUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    async fn ensure_product_available(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewCartItem,
    ) -> Result<(), CartsServiceError> {
        match self
            .products_repository
            .get_product(tx, item.product_uuid)
            .await
        {
            Ok(product) if product.is_active => Ok(()),
            Ok(_) | Err(sqlx::Error::RowNotFound) => Err(CartsServiceError::ProductUnavailable),
            Err(error) => Err(error.into()),
        }
    }

    async fn ensure_option_fits(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        option: Option<OptionUuid>,
        slot: OptionKind,
    ) -> Result<(), CartsServiceError> {
        let Some(option) = option else {
            return Ok(());
        };

        match self.products_repository.get_option(tx, option).await {
            Ok(record) if record.is_active && record.kind == slot => Ok(()),
            Ok(_) | Err(sqlx::Error::RowNotFound) => Err(CartsServiceError::InvalidOption(slot)),
            Err(error) => Err(error.into()),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn list_items(&self, user: UserUuid) -> Result<Vec<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.items_repository.list_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        self.ensure_product_available(&mut tx, &item).await?;
        self.ensure_option_fits(&mut tx, item.size_uuid, OptionKind::Size)
            .await?;
        self.ensure_option_fits(&mut tx, item.temperature_uuid, OptionKind::Temperature)
            .await?;
        self.ensure_option_fits(&mut tx, item.variant_uuid, OptionKind::Variant)
            .await?;

        let line = self
            .items_repository
            .upsert_item(&mut tx, user, &item)
            .await?;

        let stored = self.items_repository.get_item(&mut tx, user, line).await?;

        tx.commit().await?;

        Ok(stored)
    }

    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.items_repository.delete_item(&mut tx, user, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self.items_repository.clear_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// List the lines in a user's cart, priced from the current catalog.
    async fn list_items(&self, user: UserUuid) -> Result<Vec<CartItemRecord>, CartsServiceError>;

    /// Add a line to the user's cart, merging with an identical selection.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove a single line from the user's cart.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid)
    -> Result<(), CartsServiceError>;

    /// Remove every line from the user's cart, returning how many were removed.
    async fn clear(&self, user: UserUuid) -> Result<u64, CartsServiceError>;
}
