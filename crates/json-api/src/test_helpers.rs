//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use roastery_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid},
        },
        checkout::{MockCheckoutService, delivery::DeliveryMethod},
        orders::{
            MockOrdersService, OrderStatus,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        products::{MockProductsService, records::ProductUuid},
        users::{
            MockUsersService,
            records::{UserRole, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(Principal {
        user_uuid: TEST_USER_UUID,
        role: UserRole::Customer,
    });
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(Principal {
        user_uuid: TEST_USER_UUID,
        role: UserRole::Admin,
    });
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_list_items().never();
    carts.expect_add_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear().never();

    carts
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout().never();

    checkout
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_update_status().never();
    orders.expect_delete_order().never();

    orders
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_get_option().never();
    products.expect_create_option().never();

    products
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_profile().never();

    users
}

fn strict_context() -> AppContext {
    AppContext {
        carts: Arc::new(strict_carts_mock()),
        checkout: Arc::new(strict_checkout_mock()),
        orders: Arc::new(strict_orders_mock()),
        products: Arc::new(strict_products_mock()),
        users: Arc::new(strict_users_mock()),
        auth: Arc::new(strict_auth_mock()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        ..strict_context()
    })
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        carts: Arc::new(carts),
        ..strict_context()
    });

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_customer)
            .push(route),
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        checkout: Arc::new(checkout),
        ..strict_context()
    });

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_customer)
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        orders: Arc::new(orders),
        ..strict_context()
    });

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_customer)
            .push(route),
    )
}

pub(crate) fn admin_orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        orders: Arc::new(orders),
        ..strict_context()
    });

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn make_cart_item(uuid: CartItemUuid, product_uuid: ProductUuid) -> CartItemRecord {
    CartItemRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        product_uuid,
        product_name: "Latte".to_string(),
        quantity: 2,
        size_uuid: None,
        temperature_uuid: None,
        variant_uuid: None,
        unit_price: 20_000,
        line_total: 40_000,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        order_number: "ORD-20261016-000001".to_string(),
        user_uuid: TEST_USER_UUID,
        status: OrderStatus::Pending,
        email: "ada@example.com".to_string(),
        full_name: "Ada Lovelace".to_string(),
        delivery_address: "12 Analytical Row".to_string(),
        delivery_method: DeliveryMethod::DoorDelivery,
        payment_method_id: 1,
        subtotal: 40_000,
        delivery_fee: 10_000,
        tax_amount: 0,
        total: 50_000,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            product_name: "Latte".to_string(),
            quantity: 2,
            size_uuid: None,
            temperature_uuid: None,
            variant_uuid: None,
            unit_price: 20_000,
            line_total: 40_000,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
