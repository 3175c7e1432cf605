//! Test Helpers

use sqlx::query_scalar;

use crate::{
    domain::{
        carts::{CartsService, data::NewCartItem, records::CartItemUuid},
        checkout::{CheckoutError, CheckoutService, data::CheckoutRequest},
        orders::records::OrderRecord,
        products::{
            ProductsService, ProductsServiceError,
            data::{NewProduct, NewProductOption},
            records::{OptionKind, OptionUuid, ProductOptionRecord, ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRole, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn new_user(email: &str) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        email: email.to_string(),
        role: UserRole::Customer,
        full_name: Some("Ada Lovelace".to_string()),
        address: Some("12 Analytical Row".to_string()),
        phone: None,
    }
}

pub(crate) fn new_product(name: &str, price: u64, stock: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        price,
        stock,
        is_active: true,
    }
}

pub(crate) fn new_option(kind: OptionKind, name: &str, price_adjustment: u64) -> NewProductOption {
    NewProductOption {
        uuid: OptionUuid::new(),
        kind,
        name: name.to_string(),
        price_adjustment,
    }
}

pub(crate) fn cart_line(product: ProductUuid, quantity: u32) -> NewCartItem {
    NewCartItem {
        uuid: CartItemUuid::new(),
        product_uuid: product,
        quantity,
        size_uuid: None,
        temperature_uuid: None,
        variant_uuid: None,
    }
}

pub(crate) fn door_delivery() -> CheckoutRequest {
    CheckoutRequest {
        delivery_method: Some("door_delivery".to_string()),
        ..CheckoutRequest::default()
    }
}

pub(crate) async fn create_customer(
    ctx: &TestContext,
    email: &str,
) -> Result<UserUuid, UsersServiceError> {
    ctx.users
        .create_user(new_user(email))
        .await
        .map(|user| user.uuid)
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
    stock: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(new_product(name, price, stock))
        .await
}

pub(crate) async fn create_option(
    ctx: &TestContext,
    kind: OptionKind,
    name: &str,
    price_adjustment: u64,
) -> Result<ProductOptionRecord, ProductsServiceError> {
    ctx.products
        .create_option(new_option(kind, name, price_adjustment))
        .await
}

/// Fill the user's cart with one fresh product and check it out.
pub(crate) async fn place_order(
    ctx: &TestContext,
    user: UserUuid,
) -> Result<OrderRecord, CheckoutError> {
    let product = create_product(ctx, "Order Blend", 12_000, 10)
        .await
        .expect("product should be created");

    ctx.carts
        .add_item(user, cart_line(product.uuid, 2))
        .await
        .expect("cart line should be added");

    ctx.checkout.checkout(user, door_delivery()).await
}

pub(crate) async fn product_stock(
    ctx: &TestContext,
    product: ProductUuid,
) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT stock FROM products WHERE uuid = $1")
        .bind(product)
        .fetch_one(ctx.db.pool())
        .await
}
