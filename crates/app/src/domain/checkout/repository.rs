//! Checkout Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{amount_to_i64, try_get_amount, try_get_quantity},
    domain::{
        checkout::pricing::LockedLine, products::records::ProductUuid, users::records::UserUuid,
    },
};

const LOCK_CART_LINES_SQL: &str = include_str!("sql/lock_cart_lines.sql");
const NEXT_ORDER_SEQUENCE_SQL: &str = include_str!("sql/next_order_sequence.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCheckoutRepository;

impl PgCheckoutRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read and lock the user's cart lines together with their products.
    ///
    /// Rows are locked in product order so concurrent checkouts touching the
    /// same products queue instead of deadlocking.
    pub(crate) async fn lock_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<LockedLine>, sqlx::Error> {
        query_as::<Postgres, LockedLine>(LOCK_CART_LINES_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn next_order_sequence(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(NEXT_ORDER_SEQUENCE_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    /// Take `quantity` units from a product, only if that many remain.
    ///
    /// Returns `false` when the guard rejected the update.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product)
            .bind(amount_to_i64(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for LockedLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            cart_item_uuid: row.try_get("cart_item_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_name: row.try_get("product_name")?,
            product_available: row.try_get("product_available")?,
            options_available: row.try_get("options_available")?,
            base_price: try_get_amount(row, "base_price")?,
            stock: try_get_amount(row, "stock")?,
            quantity: try_get_quantity(row, "quantity")?,
            size_uuid: row.try_get("size_uuid")?,
            temperature_uuid: row.try_get("temperature_uuid")?,
            variant_uuid: row.try_get("variant_uuid")?,
            size_adjustment: try_get_amount(row, "size_adjustment")?,
            temperature_adjustment: try_get_amount(row, "temperature_adjustment")?,
            variant_adjustment: try_get_amount(row, "variant_adjustment")?,
        })
    }
}
