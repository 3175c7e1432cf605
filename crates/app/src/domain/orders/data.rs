//! Order Data

use jiff::{Timestamp, civil::Date, tz::TimeZone};

use crate::domain::{
    checkout::delivery::DeliveryMethod,
    orders::{
        records::{OrderItemUuid, OrderUuid},
        status::OrderStatus,
    },
    products::records::{OptionUuid, ProductUuid},
    users::records::UserUuid,
};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: UserUuid,
    pub email: String,
    pub full_name: String,
    pub delivery_address: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method_id: i64,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub tax_amount: u64,
    pub total: u64,
}

/// New Order Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub size_uuid: Option<OptionUuid>,
    pub temperature_uuid: Option<OptionUuid>,
    pub variant_uuid: Option<OptionUuid>,
    pub unit_price: u64,
    pub line_total: u64,
}

/// Order History Filter
///
/// Dates are UTC calendar days and both ends are inclusive. An empty filter
/// matches every order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl OrderFilter {
    /// Narrow the date range to the calendar month containing `day`.
    #[must_use]
    pub fn within_month(self, day: Date) -> Self {
        let first = day.first_of_month();
        let last = day.last_of_month();

        Self {
            from: Some(self.from.map_or(first, |from| from.max(first))),
            to: Some(self.to.map_or(last, |to| to.min(last))),
            ..self
        }
    }

    /// `created_at` bounds as a half-open `[start, end)` range.
    pub(crate) fn created_range(
        &self,
    ) -> Result<(Option<Timestamp>, Option<Timestamp>), jiff::Error> {
        let start = self
            .from
            .map(|from| from.to_zoned(TimeZone::UTC).map(|zoned| zoned.timestamp()))
            .transpose()?;

        let end = self
            .to
            .map(|to| {
                to.tomorrow()
                    .and_then(|next| next.to_zoned(TimeZone::UTC))
                    .map(|zoned| zoned.timestamp())
            })
            .transpose()?;

        Ok((start, end))
    }
}
