use clap::Args;
use roastery_app::domain::products::{
    PgProductsService, ProductsService,
    data::NewProductOption,
    records::{OptionKind, OptionUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateOptionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Option slot: `size`, `temperature` or `variant`
    #[arg(long)]
    kind: String,

    /// Option display name
    #[arg(long)]
    name: String,

    /// Amount added to the product price when selected
    #[arg(long, default_value_t = 0)]
    price_adjustment: u64,

    /// Optional option UUID; generated when omitted
    #[arg(long)]
    option_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateOptionArgs) -> Result<(), String> {
    let kind: OptionKind = args.kind.parse().map_err(|error| format!("{error}"))?;

    let db = super::super::connect(&args.database_url).await?;
    let service = PgProductsService::new(db);

    let option = service
        .create_option(NewProductOption {
            uuid: args
                .option_uuid
                .map_or_else(OptionUuid::new, OptionUuid::from_uuid),
            kind,
            name: args.name,
            price_adjustment: args.price_adjustment,
        })
        .await
        .map_err(|error| format!("failed to create option: {error}"))?;

    println!("option_uuid: {}", option.uuid);
    println!("kind: {}", option.kind);
    println!("name: {}", option.name);
    println!("price_adjustment: {}", option.price_adjustment);

    Ok(())
}
