//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{amount_to_i64, quantity_to_i32, try_get_amount, try_get_quantity},
    domain::{
        orders::{
            data::{NewOrder, NewOrderItem, OrderFilter},
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            status::OrderStatus,
        },
        users::records::UserUuid,
    },
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("sql/insert_order_item.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const LOCK_ORDER_STATUS_SQL: &str = include_str!("sql/lock_order_status.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(INSERT_ORDER_SQL)
            .bind(order.uuid)
            .bind(&order.order_number)
            .bind(order.user_uuid)
            .bind(&order.email)
            .bind(&order.full_name)
            .bind(&order.delivery_address)
            .bind(order.delivery_method.as_str())
            .bind(order.payment_method_id)
            .bind(amount_to_i64(order.subtotal)?)
            .bind(amount_to_i64(order.delivery_fee)?)
            .bind(amount_to_i64(order.tax_amount)?)
            .bind(amount_to_i64(order.total)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &NewOrderItem,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(INSERT_ORDER_ITEM_SQL)
            .bind(item.uuid)
            .bind(order)
            .bind(item.product_uuid)
            .bind(&item.product_name)
            .bind(quantity_to_i32(item.quantity)?)
            .bind(item.size_uuid)
            .bind(item.temperature_uuid)
            .bind(item.variant_uuid)
            .bind(amount_to_i64(item.unit_price)?)
            .bind(amount_to_i64(item.line_total)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        filter: &OrderFilter,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let (start, end) = filter
            .created_range()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user)
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(start.map(SqlxTimestamp::from))
            .bind(end.map(SqlxTimestamp::from))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock the order row and return its current status.
    pub(crate) async fn lock_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderStatus, sqlx::Error> {
        let status: String = query_scalar(LOCK_ORDER_STATUS_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await?;

        status.parse().map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> sqlx::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(col)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_number: row.try_get("order_number")?,
            user_uuid: row.try_get("user_uuid")?,
            status: try_get_parsed(row, "status")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            delivery_address: row.try_get("delivery_address")?,
            delivery_method: try_get_parsed(row, "delivery_method")?,
            payment_method_id: row.try_get("payment_method_id")?,
            subtotal: try_get_amount(row, "subtotal")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            tax_amount: try_get_amount(row, "tax_amount")?,
            total: try_get_amount(row, "total")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_uuid: row.try_get("order_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_name: row.try_get("product_name")?,
            quantity: try_get_quantity(row, "quantity")?,
            size_uuid: row.try_get("size_uuid")?,
            temperature_uuid: row.try_get("temperature_uuid")?,
            variant_uuid: row.try_get("variant_uuid")?,
            unit_price: try_get_amount(row, "unit_price")?,
            line_total: try_get_amount(row, "line_total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
