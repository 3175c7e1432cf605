//! Order History Handler

use std::{str::FromStr, sync::Arc};

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::*};

use roastery_app::domain::orders::{OrderStatus, data::OrderFilter};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// `YYYY-MM`, held as the first day of that month.
#[derive(Debug, Clone, Copy)]
struct YearMonth(Date);

impl FromStr for YearMonth {
    type Err = jiff::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        format!("{value}-01").parse().map(Self)
    }
}

/// Order History Handler
///
/// Lists the caller's orders, newest first. Items are omitted. `start_date`
/// and `end_date` are inclusive `YYYY-MM-DD` UTC days; `month` (`YYYY-MM`)
/// further narrows the range.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order history"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    start_date: QueryParam<String, false>,
    end_date: QueryParam<String, false>,
    month: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let mut filter = OrderFilter {
        status: status.parse_or_400::<OrderStatus>("status")?,
        from: start_date.parse_or_400::<Date>("start_date")?,
        to: end_date.parse_or_400::<Date>("end_date")?,
    };

    if let Some(YearMonth(first)) = month.parse_or_400::<YearMonth>("month")? {
        filter = filter.within_month(first);
    }

    let orders = state
        .app
        .orders
        .list_orders(principal.user_uuid, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
