use crate::demo::{run_demo, run_payout_statement, DemoArgs, StatementArgs};
use crate::server;
use backoffice::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Marketplace Back Office",
    about = "Run and demonstrate the trainer compliance and payout workflow service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Payout bookkeeping utilities
    Payouts {
        #[command(subcommand)]
        command: PayoutsCommand,
    },
    /// Run an end-to-end CLI demo covering compliance and payout workflows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PayoutsCommand {
    /// Render a trainer's payout statement as CSV
    Statement(StatementArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Payouts {
            command: PayoutsCommand::Statement(args),
        } => run_payout_statement(args),
        Command::Demo(args) => run_demo(args),
    }
}
