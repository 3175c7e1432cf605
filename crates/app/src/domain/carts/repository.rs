//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{quantity_to_i32, try_get_amount, try_get_quantity},
    domain::{
        carts::{
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid},
        },
        users::records::UserUuid,
    },
};

const UPSERT_CART_ITEM_SQL: &str = include_str!("sql/upsert_cart_item.sql");
const LIST_CART_ITEMS_SQL: &str = include_str!("sql/list_cart_items.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("sql/delete_cart_items.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("sql/clear_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the selection, or add to the quantity of the matching line.
    ///
    /// Returns the UUID of the line that now holds the selection.
    pub(crate) async fn upsert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: &NewCartItem,
    ) -> Result<CartItemUuid, sqlx::Error> {
        query_scalar::<Postgres, CartItemUuid>(UPSERT_CART_ITEM_SQL)
            .bind(item.uuid)
            .bind(user)
            .bind(item.product_uuid)
            .bind(quantity_to_i32(item.quantity)?)
            .bind(item.size_uuid)
            .bind(item.temperature_uuid)
            .bind(item.variant_uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LIST_CART_ITEMS_SQL)
            .bind(user)
            .bind(None::<CartItemUuid>)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LIST_CART_ITEMS_SQL)
            .bind(user)
            .bind(Some(item))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item)
            .bind(user)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete exactly the given lines. Lines added since they were read stay.
    pub(crate) async fn delete_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        items: &[CartItemUuid],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = items.iter().map(|item| item.into_uuid()).collect();

        let rows_affected = query(DELETE_CART_ITEMS_SQL)
            .bind(user)
            .bind(uuids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(user)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity = try_get_quantity(row, "quantity")?;
        let unit_price = try_get_amount(row, "unit_price")?;

        let line_total =
            unit_price
                .checked_mul(u64::from(quantity))
                .ok_or_else(|| sqlx::Error::ColumnDecode {
                    index: "unit_price".to_string(),
                    source: "line total overflows".into(),
                })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_name: row.try_get("product_name")?,
            quantity,
            size_uuid: row.try_get("size_uuid")?,
            temperature_uuid: row.try_get("temperature_uuid")?,
            variant_uuid: row.try_get("variant_uuid")?,
            unit_price,
            line_total,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
