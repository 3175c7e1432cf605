use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct OptionCommand {
    #[command(subcommand)]
    command: OptionSubcommand,
}

#[derive(Debug, Subcommand)]
enum OptionSubcommand {
    Create(create::CreateOptionArgs),
}

pub(crate) async fn run(command: OptionCommand) -> Result<(), String> {
    match command.command {
        OptionSubcommand::Create(args) => create::run(args).await,
    }
}
