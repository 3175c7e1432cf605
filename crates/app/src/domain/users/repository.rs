//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::users::{
    data::NewUser,
    records::{ProfileRecord, UserRecord, UserRole, UserUuid},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const CREATE_USER_PROFILE_SQL: &str = include_str!("sql/create_user_profile.sql");
const GET_USER_PROFILE_SQL: &str = include_str!("sql/get_user_profile.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        let created = query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid)
            .bind(&user.email)
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await?;

        query(CREATE_USER_PROFILE_SQL)
            .bind(user.uuid)
            .bind(user.full_name.as_deref())
            .bind(user.address.as_deref())
            .bind(user.phone.as_deref())
            .execute(&mut **tx)
            .await?;

        Ok(created)
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_USER_PROFILE_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }
}

pub(crate) fn try_get_role(row: &PgRow, column: &str) -> sqlx::Result<UserRole> {
    let role: String = row.try_get(column)?;

    role.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            email: row.try_get("email")?,
            role: try_get_role(row, "role")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: row.try_get("user_uuid")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
        })
    }
}
