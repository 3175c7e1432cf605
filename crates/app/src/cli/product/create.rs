use clap::Args;
use roastery_app::domain::products::{
    PgProductsService, ProductsService, data::NewProduct, records::ProductUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Product display name
    #[arg(long)]
    name: String,

    /// Base unit price in minor currency units
    #[arg(long)]
    price: u64,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u64,

    /// Create the product hidden from checkout
    #[arg(long)]
    inactive: bool,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = super::super::connect(&args.database_url).await?;
    let service = PgProductsService::new(db);

    let product = service
        .create_product(NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            price: args.price,
            stock: args.stock,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);
    println!("stock: {}", product.stock);

    Ok(())
}
