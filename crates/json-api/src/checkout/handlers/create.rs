//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::FormBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use roastery_app::domain::checkout::{SUCCESS_OUTCOME, data::CheckoutRequest};

use crate::{
    checkout::errors::into_status_error,
    extensions::*,
    observability::record_checkout_outcome,
    orders::get::OrderResponse,
    state::State,
};

/// Checkout Form
///
/// Every field is optional. Blank contact fields fall back to the caller's
/// profile.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutForm {
    pub email: Option<String>,

    pub full_name: Option<String>,

    pub address: Option<String>,

    /// `dine_in` (default), `door_delivery` or `pick_up`
    pub delivery_method: Option<String>,

    /// Integer payment method id; defaults to 1
    pub payment_method_id: Option<String>,
}

impl CheckoutForm {
    fn into_request(self) -> Result<CheckoutRequest, StatusError> {
        let payment_method_id = self
            .payment_method_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::parse::<i64>)
            .transpose()
            .or_400("invalid payment_method_id")?;

        Ok(CheckoutRequest {
            email: self.email,
            full_name: self.full_name,
            address: self.address,
            delivery_method: self.delivery_method,
            payment_method_id,
        })
    }
}

/// Checkout Handler
///
/// Converts the caller's cart into a pending order.
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, insufficient stock or invalid details"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    form: FormBody<CheckoutForm>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let request = form.into_inner().into_request()?;

    let order = match state.app.checkout.checkout(principal.user_uuid, request).await {
        Ok(order) => order,
        Err(error) => {
            record_checkout_outcome(error.outcome());

            return Err(into_status_error(error));
        }
    };

    record_checkout_outcome(SUCCESS_OUTCOME);

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use roastery_app::domain::{
        checkout::{CheckoutError, MockCheckoutService, StockShortfall, ValidationError},
        orders::records::OrderUuid,
        products::records::ProductUuid,
    };

    use crate::{
        observability::checkout_outcome_count,
        test_helpers::{TEST_USER_UUID, checkout_service, make_order},
    };

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(
            checkout,
            Router::with_path("transactions/checkout").post(handler),
        )
    }

    #[tokio::test]
    async fn test_checkout_returns_201_with_order() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid);

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .withf(|user, request| {
                *user == TEST_USER_UUID
                    && *request
                        == CheckoutRequest {
                            email: None,
                            full_name: Some("Ada Lovelace".to_string()),
                            address: Some("12 Analytical Row".to_string()),
                            delivery_method: Some("door_delivery".to_string()),
                            payment_method_id: Some(2),
                        }
            })
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::post("http://example.com/transactions/checkout")
            .form(&[
                ("full_name", "Ada Lovelace"),
                ("address", "12 Analytical Row"),
                ("delivery_method", "door_delivery"),
                ("payment_method_id", "2"),
            ])
            .send(&make_service(checkout))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.order_number, "ORD-20261016-000001");
        assert_eq!(body.status, "pending");
        assert_eq!(body.subtotal, 40_000);
        assert_eq!(body.delivery_fee, 10_000);
        assert_eq!(body.total, 50_000);
        assert_eq!(body.email, "ada@example.com");
        assert_eq!(body.delivery_method, "door_delivery");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_without_fields_forwards_empty_request() -> TestResult {
        let order = make_order(OrderUuid::new());
        let before = checkout_outcome_count(SUCCESS_OUTCOME);

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .withf(|_, request| *request == CheckoutRequest::default())
            .return_once(move |_, _| Ok(order));

        let res = TestClient::post("http://example.com/transactions/checkout")
            .form(&[("payment_method_id", " ")])
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(
            checkout_outcome_count(SUCCESS_OUTCOME) > before,
            "expected a success outcome to be counted"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_non_numeric_payment_method_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_checkout().never();

        let res = TestClient::post("http://example.com/transactions/checkout")
            .form(&[("payment_method_id", "card")])
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(CheckoutError::EmptyCart));

        let res = TestClient::post("http://example.com/transactions/checkout")
            .form(&[("delivery_method", "dine_in")])
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_insufficient_stock_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_checkout().once().return_once(|_, _| {
            Err(CheckoutError::InsufficientStock(vec![StockShortfall {
                product_uuid: ProductUuid::new(),
                product_name: "Latte".to_string(),
                requested: 2,
                available: 1,
            }]))
        });

        let res = TestClient::post("http://example.com/transactions/checkout")
            .form(&[("delivery_method", "pick_up")])
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_invalid_delivery_method_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .withf(|_, request| request.delivery_method.as_deref() == Some("drone"))
            .return_once(|_, _| {
                Err(CheckoutError::Validation(
                    ValidationError::InvalidDeliveryMethod("drone".to_string()),
                ))
            });

        let res = TestClient::post("http://example.com/transactions/checkout")
            .form(&[("delivery_method", "drone")])
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_persistence_failure_returns_500() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(CheckoutError::Persistence(sqlx::Error::PoolTimedOut)));

        let res = TestClient::post("http://example.com/transactions/checkout")
            .form(&[("delivery_method", "dine_in")])
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
