use clap::Args;
use roastery_app::domain::users::{
    PgUsersService, UsersService,
    data::NewUser,
    records::{UserRole, UserUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// Account role: `customer` or `admin`
    #[arg(long, default_value = "customer")]
    role: String,

    #[arg(long)]
    full_name: Option<String>,

    /// Default delivery address
    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let role: UserRole = args.role.parse().map_err(|error| format!("{error}"))?;

    let db = super::super::connect(&args.database_url).await?;
    let service = PgUsersService::new(db);

    let user = service
        .create_user(NewUser {
            uuid: args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            email: args.email,
            role,
            full_name: args.full_name,
            address: args.address,
            phone: args.phone,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
