use clap::{Parser, Subcommand};
use roastery_app::database::{self, Db};

mod db;
mod option;
mod product;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "roastery-app", about = "Roastery operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Token(token::TokenCommand),
    Product(product::ProductCommand),
    Option(option::OptionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Option(command) => option::run(command).await,
        }
    }
}

pub(crate) async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
