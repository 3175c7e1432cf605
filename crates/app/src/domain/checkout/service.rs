//! Checkout service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{records::CartItemUuid, repository::PgCartItemsRepository},
        checkout::{
            contact::resolve_contact,
            data::{CheckoutRequest, CheckoutSettings},
            delivery::DeliveryMethod,
            errors::{CheckoutError, SUCCESS_OUTCOME, StockShortfall, ValidationError},
            order_number::format_order_number,
            pricing::{PricedLine, compute_totals, price_line},
            repository::PgCheckoutRepository,
            stock::{ProductDemand, aggregate_demand, find_shortfalls},
        },
        orders::{
            data::{NewOrder, NewOrderItem},
            records::{OrderItemUuid, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        users::{
            records::{ProfileRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    settings: CheckoutSettings,
    checkout_repository: PgCheckoutRepository,
    cart_items_repository: PgCartItemsRepository,
    orders_repository: PgOrdersRepository,
    users_repository: PgUsersRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, settings: CheckoutSettings) -> Self {
        Self {
            db,
            settings,
            checkout_repository: PgCheckoutRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }

    async fn load_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<ProfileRecord>, CheckoutError> {
        match self.users_repository.get_profile(tx, user).await {
            Ok(profile) => Ok(Some(profile)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn take_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        demand: &[ProductDemand],
    ) -> Result<(), CheckoutError> {
        for product in demand {
            let taken = self
                .checkout_repository
                .decrement_stock(tx, product.product_uuid, product.requested)
                .await?;

            if !taken {
                return Err(CheckoutError::InsufficientStock(vec![StockShortfall {
                    product_uuid: product.product_uuid,
                    product_name: product.product_name.clone(),
                    requested: product.requested,
                    available: product.available,
                }]));
            }
        }

        Ok(())
    }

    async fn place_order(
        &self,
        user: UserUuid,
        request: &CheckoutRequest,
    ) -> Result<OrderRecord, CheckoutError> {
        let mut tx = self.db.begin_bounded(self.settings.lock_timeout).await?;

        let lines = self
            .checkout_repository
            .lock_cart_lines(&mut tx, user)
            .await?;

        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if let Some(line) = lines.iter().find(|line| !line.product_available) {
            return Err(ValidationError::ProductUnavailable(line.product_name.clone()).into());
        }

        if let Some(line) = lines.iter().find(|line| !line.options_available) {
            return Err(ValidationError::OptionUnavailable(line.product_name.clone()).into());
        }

        let demand = aggregate_demand(&lines);
        let shortfalls = find_shortfalls(&demand);

        if !shortfalls.is_empty() {
            return Err(CheckoutError::InsufficientStock(shortfalls));
        }

        let profile = self.load_profile(&mut tx, user).await?;
        let contact = resolve_contact(request, profile.as_ref())?;

        let delivery_method = DeliveryMethod::parse_input(request.delivery_method.as_deref())?;

        let priced = lines
            .iter()
            .map(price_line)
            .collect::<Result<Vec<PricedLine>, _>>()?;

        let totals = compute_totals(
            &priced,
            delivery_method.fee(&self.settings),
            self.settings.tax_rate_bps,
        )?;

        let sequence = self.checkout_repository.next_order_sequence(&mut tx).await?;

        let new_order = NewOrder {
            uuid: OrderUuid::new(),
            order_number: format_order_number(Timestamp::now(), sequence),
            user_uuid: user,
            email: contact.email,
            full_name: contact.full_name,
            delivery_address: contact.address,
            delivery_method,
            payment_method_id: request.payment_method_id(),
            subtotal: totals.subtotal,
            delivery_fee: totals.delivery_fee,
            tax_amount: totals.tax_amount,
            total: totals.total,
        };

        let mut order = self
            .orders_repository
            .insert_order(&mut tx, &new_order)
            .await?;

        for priced_line in &priced {
            let item = NewOrderItem {
                uuid: OrderItemUuid::new(),
                product_uuid: priced_line.line.product_uuid,
                product_name: priced_line.line.product_name.clone(),
                quantity: priced_line.line.quantity,
                size_uuid: priced_line.line.size_uuid,
                temperature_uuid: priced_line.line.temperature_uuid,
                variant_uuid: priced_line.line.variant_uuid,
                unit_price: priced_line.unit_price,
                line_total: priced_line.line_total,
            };

            let stored = self
                .orders_repository
                .insert_item(&mut tx, order.uuid, &item)
                .await?;

            order.items.push(stored);
        }

        self.take_stock(&mut tx, &demand).await?;

        let ordered: Vec<CartItemUuid> = lines.iter().map(|line| line.cart_item_uuid).collect();

        self.cart_items_repository
            .delete_items(&mut tx, user, &ordered)
            .await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, request),
        fields(
            user_uuid = %user,
            order_number = tracing::field::Empty,
            outcome = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(
        &self,
        user: UserUuid,
        request: CheckoutRequest,
    ) -> Result<OrderRecord, CheckoutError> {
        let span = Span::current();

        match self.place_order(user, &request).await {
            Ok(order) => {
                span.record("order_number", tracing::field::display(&order.order_number));
                span.record("outcome", SUCCESS_OUTCOME);

                info!(
                    order_number = %order.order_number,
                    subtotal = order.subtotal,
                    delivery_fee = order.delivery_fee,
                    tax_amount = order.tax_amount,
                    total = order.total,
                    items = order.items.len(),
                    "checkout completed"
                );

                Ok(order)
            }
            Err(error) => {
                span.record("outcome", error.outcome());

                if !matches!(error, CheckoutError::Persistence(_)) {
                    warn!(outcome = error.outcome(), reason = %error, "checkout rejected");
                }

                Err(error)
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Convert the user's cart into a pending order.
    ///
    /// Either the order, its items, the stock decrements and the cart
    /// deletion all persist, or none of them do.
    async fn checkout(
        &self,
        user: UserUuid,
        request: CheckoutRequest,
    ) -> Result<OrderRecord, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::CartsService,
            orders::OrderStatus,
            products::records::OptionKind,
        },
        test::{
            TestContext,
            helpers::{
                cart_line, create_customer, create_option, create_product, door_delivery,
                product_stock,
            },
        },
    };

    use super::*;

    async fn order_count(ctx: &TestContext) -> Result<i64, sqlx::Error> {
        query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(ctx.db.pool())
            .await
    }

    #[tokio::test]
    async fn checkout_door_delivery_creates_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "buyer@example.com").await?;
        let product = create_product(&ctx, "House Blend", 20_000, 5).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 2)).await?;

        let order = ctx.checkout.checkout(user, door_delivery()).await?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.delivery_method, DeliveryMethod::DoorDelivery);
        assert_eq!(order.subtotal, 40_000);
        assert_eq!(order.delivery_fee, 10_000);
        assert_eq!(order.tax_amount, 0);
        assert_eq!(order.total, 50_000);
        assert_eq!(order.payment_method_id, 1);
        assert!(order.order_number.starts_with("ORD-"));

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_name, "House Blend");
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].unit_price, 20_000);
        assert_eq!(order.items[0].line_total, 40_000);

        assert_eq!(product_stock(&ctx, product.uuid).await?, 3);
        assert!(ctx.carts.list_items(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_dine_in_and_pick_up_carry_no_fee() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "nofee@example.com").await?;
        let product = create_product(&ctx, "Drip", 10_000, 10).await?;

        for method in [None, Some("pick_up")] {
            ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;

            let request = CheckoutRequest {
                delivery_method: method.map(str::to_string),
                ..CheckoutRequest::default()
            };

            let order = ctx.checkout.checkout(user, request).await?;

            assert_eq!(order.delivery_fee, 0);
            assert_eq!(order.total, order.subtotal);
        }

        Ok(())
    }

    #[tokio::test]
    async fn checkout_empty_cart_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "empty@example.com").await?;

        let result = ctx.checkout.checkout(user, door_delivery()).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_insufficient_stock_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "short@example.com").await?;
        let plenty = create_product(&ctx, "Filter", 9_000, 10).await?;
        let scarce = create_product(&ctx, "Geisha", 90_000, 1).await?;

        ctx.carts.add_item(user, cart_line(plenty.uuid, 1)).await?;
        ctx.carts.add_item(user, cart_line(scarce.uuid, 2)).await?;

        let result = ctx.checkout.checkout(user, door_delivery()).await;

        let Err(CheckoutError::InsufficientStock(shortfalls)) = result else {
            panic!("expected InsufficientStock, got {result:?}");
        };

        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls[0].product_name, "Geisha");
        assert_eq!(shortfalls[0].requested, 2);
        assert_eq!(shortfalls[0].available, 1);

        assert_eq!(order_count(&ctx).await?, 0);
        assert_eq!(product_stock(&ctx, plenty.uuid).await?, 10);
        assert_eq!(product_stock(&ctx, scarce.uuid).await?, 1);
        assert_eq!(ctx.carts.list_items(user).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_aggregates_lines_of_the_same_product() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "aggregate@example.com").await?;
        let product = create_product(&ctx, "Flat White", 20_000, 3).await?;
        let large = create_option(&ctx, OptionKind::Size, "Large", 5_000).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 2)).await?;

        let mut sized = cart_line(product.uuid, 2);
        sized.size_uuid = Some(large.uuid);

        ctx.carts.add_item(user, sized).await?;

        let result = ctx.checkout.checkout(user, door_delivery()).await;

        let Err(CheckoutError::InsufficientStock(shortfalls)) = result else {
            panic!("expected InsufficientStock, got {result:?}");
        };

        assert_eq!(shortfalls[0].requested, 4);
        assert_eq!(shortfalls[0].available, 3);
        assert_eq!(product_stock(&ctx, product.uuid).await?, 3);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_orders_every_line_of_a_mixed_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "mixed@example.com").await?;
        let latte = create_product(&ctx, "Latte", 20_000, 10).await?;
        let scone = create_product(&ctx, "Scone", 10_000, 5).await?;
        let large = create_option(&ctx, OptionKind::Size, "Large", 5_000).await?;

        ctx.carts.add_item(user, cart_line(latte.uuid, 1)).await?;

        let mut sized = cart_line(latte.uuid, 2);
        sized.size_uuid = Some(large.uuid);

        ctx.carts.add_item(user, sized).await?;
        ctx.carts.add_item(user, cart_line(scone.uuid, 3)).await?;

        let order = ctx.checkout.checkout(user, door_delivery()).await?;

        assert_eq!(order.items.len(), 3);
        assert_eq!(order.subtotal, 100_000);
        assert_eq!(order.total, 110_000);

        let mut totals: Vec<(String, u32, u64)> = order
            .items
            .iter()
            .map(|item| (item.product_name.clone(), item.quantity, item.line_total))
            .collect();
        totals.sort();

        assert_eq!(
            totals,
            vec![
                ("Latte".to_string(), 1, 20_000),
                ("Latte".to_string(), 2, 50_000),
                ("Scone".to_string(), 3, 30_000),
            ]
        );

        assert_eq!(product_stock(&ctx, latte.uuid).await?, 7);
        assert_eq!(product_stock(&ctx, scone.uuid).await?, 2);
        assert!(ctx.carts.list_items(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_invalid_delivery_method_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "drone@example.com").await?;
        let product = create_product(&ctx, "Cappuccino", 19_000, 4).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;

        let request = CheckoutRequest {
            delivery_method: Some("drone".to_string()),
            ..CheckoutRequest::default()
        };

        let result = ctx.checkout.checkout(user, request).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Validation(
                ValidationError::InvalidDeliveryMethod(_)
            ))
        ));
        assert_eq!(order_count(&ctx).await?, 0);
        assert_eq!(product_stock(&ctx, product.uuid).await?, 4);
        assert_eq!(ctx.carts.list_items(user).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_prices_options_at_checkout_time() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "variant@example.com").await?;
        let product = create_product(&ctx, "Latte", 20_000, 5).await?;
        let oat = create_option(&ctx, OptionKind::Variant, "Oat Milk", 2_000).await?;
        let large = create_option(&ctx, OptionKind::Size, "Large", 4_000).await?;

        let mut line = cart_line(product.uuid, 2);
        line.variant_uuid = Some(oat.uuid);
        line.size_uuid = Some(large.uuid);

        ctx.carts.add_item(user, line).await?;

        sqlx::query("UPDATE product_options SET price_adjustment = 3000 WHERE uuid = $1")
            .bind(oat.uuid)
            .execute(ctx.db.pool())
            .await?;

        let order = ctx.checkout.checkout(user, door_delivery()).await?;

        assert_eq!(order.items[0].unit_price, 27_000);
        assert_eq!(order.items[0].variant_uuid, Some(oat.uuid));
        assert_eq!(order.items[0].size_uuid, Some(large.uuid));
        assert_eq!(order.subtotal, 54_000);
        assert_eq!(order.total, 64_000);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_falls_back_to_profile_contact() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "profile@example.com").await?;
        let product = create_product(&ctx, "Mocha", 22_000, 5).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;

        let request = CheckoutRequest {
            address: Some("  42 Override Road ".to_string()),
            ..CheckoutRequest::default()
        };

        let order = ctx.checkout.checkout(user, request).await?;

        assert_eq!(order.email, "profile@example.com");
        assert_eq!(order.full_name, "Ada Lovelace");
        assert_eq!(order.delivery_address, "42 Override Road");

        Ok(())
    }

    #[tokio::test]
    async fn checkout_missing_contact_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "noaddress@example.com").await?;
        let product = create_product(&ctx, "Mocha", 22_000, 5).await?;

        sqlx::query("UPDATE user_profiles SET address = NULL WHERE user_uuid = $1")
            .bind(user)
            .execute(ctx.db.pool())
            .await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;

        let result = ctx
            .checkout
            .checkout(user, CheckoutRequest::default())
            .await;

        assert!(matches!(
            result,
            Err(CheckoutError::Validation(ValidationError::MissingAddress))
        ));
        assert_eq!(product_stock(&ctx, product.uuid).await?, 5);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_deactivated_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "retired@example.com").await?;
        let product = create_product(&ctx, "Winter Special", 25_000, 5).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;

        sqlx::query("UPDATE products SET is_active = FALSE WHERE uuid = $1")
            .bind(product.uuid)
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.checkout.checkout(user, door_delivery()).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Validation(
                ValidationError::ProductUnavailable(ref name)
            )) if name == "Winter Special"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_deactivated_option_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "seasonal@example.com").await?;
        let product = create_product(&ctx, "Mocha", 22_000, 5).await?;
        let syrup = create_option(&ctx, OptionKind::Variant, "Pumpkin Syrup", 3_000).await?;

        let mut line = cart_line(product.uuid, 1);
        line.variant_uuid = Some(syrup.uuid);

        ctx.carts.add_item(user, line).await?;

        sqlx::query("UPDATE product_options SET is_active = FALSE WHERE uuid = $1")
            .bind(syrup.uuid)
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.checkout.checkout(user, door_delivery()).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Validation(
                ValidationError::OptionUnavailable(ref name)
            )) if name == "Mocha"
        ));
        assert_eq!(product_stock(&ctx, product.uuid).await?, 5);
        assert_eq!(ctx.carts.list_items(user).await?.len(), 1);
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_applies_configured_tax() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "tax@example.com").await?;
        let product = create_product(&ctx, "Espresso", 15_000, 5).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 2)).await?;

        let checkout = ctx.checkout_with(CheckoutSettings {
            tax_rate_bps: 1_100,
            ..CheckoutSettings::default()
        });

        let order = checkout.checkout(user, door_delivery()).await?;

        assert_eq!(order.subtotal, 30_000);
        assert_eq!(order.tax_amount, 3_300);
        assert_eq!(order.total, 43_300);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_order_numbers_are_unique() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "repeat@example.com").await?;
        let product = create_product(&ctx, "Drip", 10_000, 10).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;
        let first = ctx.checkout.checkout(user, door_delivery()).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;
        let second = ctx.checkout.checkout(user, door_delivery()).await?;

        assert_ne!(first.order_number, second.order_number);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_for_last_unit_sell_it_once() -> TestResult {
        let ctx = TestContext::new().await;
        let first_user = create_customer(&ctx, "first@example.com").await?;
        let second_user = create_customer(&ctx, "second@example.com").await?;
        let product = create_product(&ctx, "Last Bag", 50_000, 1).await?;

        ctx.carts
            .add_item(first_user, cart_line(product.uuid, 1))
            .await?;
        ctx.carts
            .add_item(second_user, cart_line(product.uuid, 1))
            .await?;

        let (first, second) = tokio::join!(
            ctx.checkout.checkout(first_user, door_delivery()),
            ctx.checkout.checkout(second_user, door_delivery()),
        );

        let successes = [first.is_ok(), second.is_ok()]
            .into_iter()
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);

        let failure = if first.is_err() { first } else { second };

        assert!(matches!(failure, Err(CheckoutError::InsufficientStock(_))));
        assert_eq!(product_stock(&ctx, product.uuid).await?, 0);
        assert_eq!(order_count(&ctx).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_gives_up_when_lock_wait_exceeds_timeout() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "blocked@example.com").await?;
        let product = create_product(&ctx, "Locked Roast", 20_000, 5).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;

        let mut holder = ctx.db.begin_test_transaction().await;

        sqlx::query("SELECT stock FROM products WHERE uuid = $1 FOR UPDATE")
            .bind(product.uuid)
            .execute(&mut *holder)
            .await?;

        let checkout = ctx.checkout_with(CheckoutSettings {
            lock_timeout: Duration::from_millis(200),
            ..CheckoutSettings::default()
        });

        let result = checkout.checkout(user, door_delivery()).await;

        assert!(matches!(result, Err(CheckoutError::Persistence(_))));

        holder.rollback().await?;

        assert_eq!(product_stock(&ctx, product.uuid).await?, 5);
        assert_eq!(ctx.carts.list_items(user).await?.len(), 1);
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_keeps_lines_added_while_waiting_for_locks() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "latecomer@example.com").await?;
        let ordered = create_product(&ctx, "Guji", 30_000, 5).await?;
        let late = create_product(&ctx, "Biscotti", 8_000, 5).await?;

        ctx.carts.add_item(user, cart_line(ordered.uuid, 1)).await?;

        let mut holder = ctx.db.begin_test_transaction().await;

        sqlx::query("SELECT stock FROM products WHERE uuid = $1 FOR UPDATE")
            .bind(ordered.uuid)
            .execute(&mut *holder)
            .await?;

        let add_then_release = async {
            tokio::time::sleep(Duration::from_millis(300)).await;

            let added = ctx.carts.add_item(user, cart_line(late.uuid, 2)).await;

            holder.rollback().await.map(|()| added)
        };

        let (order, added) = tokio::join!(
            ctx.checkout.checkout(user, door_delivery()),
            add_then_release,
        );

        let order = order?;
        added??;

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_name, "Guji");
        assert_eq!(product_stock(&ctx, ordered.uuid).await?, 4);

        let remaining = ctx.carts.list_items(user).await?;

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_uuid, late.uuid);
        assert_eq!(remaining[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_keeps_positive_payment_method() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_customer(&ctx, "card@example.com").await?;
        let product = create_product(&ctx, "Drip", 10_000, 10).await?;

        ctx.carts.add_item(user, cart_line(product.uuid, 1)).await?;

        let request = CheckoutRequest {
            payment_method_id: Some(3),
            ..door_delivery()
        };

        let order = ctx.checkout.checkout(user, request).await?;

        assert_eq!(order.payment_method_id, 3);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_does_not_touch_other_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = create_customer(&ctx, "solo@example.com").await?;
        let bystander = create_customer(&ctx, "bystander@example.com").await?;
        let product = create_product(&ctx, "Kenya AA", 30_000, 10).await?;

        ctx.carts.add_item(buyer, cart_line(product.uuid, 1)).await?;
        ctx.carts
            .add_item(bystander, cart_line(product.uuid, 2))
            .await?;

        ctx.checkout.checkout(buyer, door_delivery()).await?;

        assert_eq!(ctx.carts.list_items(bystander).await?.len(), 1);
        assert_eq!(product_stock(&ctx, product.uuid).await?, 9);

        Ok(())
    }
}
