//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{amount_to_i64, try_get_amount},
    domain::products::{
        data::{NewProduct, NewProductOption},
        records::{OptionUuid, ProductOptionRecord, ProductRecord, ProductUuid},
    },
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_OPTION_SQL: &str = include_str!("sql/get_option.sql");
const CREATE_OPTION_SQL: &str = include_str!("sql/create_option.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid)
            .bind(&product.name)
            .bind(amount_to_i64(product.price)?)
            .bind(amount_to_i64(product.stock)?)
            .bind(product.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_option(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        option: OptionUuid,
    ) -> Result<ProductOptionRecord, sqlx::Error> {
        query_as::<Postgres, ProductOptionRecord>(GET_OPTION_SQL)
            .bind(option)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_option(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        option: &NewProductOption,
    ) -> Result<ProductOptionRecord, sqlx::Error> {
        query_as::<Postgres, ProductOptionRecord>(CREATE_OPTION_SQL)
            .bind(option.uuid)
            .bind(option.kind.as_str())
            .bind(&option.name)
            .bind(amount_to_i64(option.price_adjustment)?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_amount(row, "stock")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductOptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            kind: kind.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            })?,
            name: row.try_get("name")?,
            price_adjustment: try_get_amount(row, "price_adjustment")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
