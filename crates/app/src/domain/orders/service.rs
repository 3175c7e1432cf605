//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::OrderFilter,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
            status::OrderStatus,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(
        &self,
        user: UserUuid,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, user, &filter).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.repository.get_order(&mut tx, user, order).await?;
        let items = self.repository.get_items(&mut tx, order).await?;

        tx.commit().await?;

        record.items.extend(items);

        Ok(record)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_status(&mut tx, order).await?;

        if !current.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current,
                to: status,
            });
        }

        let mut record = self.repository.update_status(&mut tx, order, status).await?;
        let items = self.repository.get_items(&mut tx, order).await?;

        tx.commit().await?;

        info!(
            order = %record.order_number,
            from = %current,
            to = %status,
            "order status updated"
        );

        record.items.extend(items);

        Ok(record)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// List a user's orders matching `filter`, newest first. Items are not loaded.
    async fn list_orders(
        &self,
        user: UserUuid,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve one of the user's orders with its items.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order to a new status if the lifecycle allows it.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Delete an order and its items.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}
