use crate::demo::{run_demo, run_expiry_sweep, DemoArgs, ExpireArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mall_ops::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Mall Back Office",
    about = "Run and demonstrate the mall back-office service from the command line",
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
    /// Walk the occupancy engine through a move-in, repair, and move-out
    Demo(DemoArgs),
    /// Run the lease expiry sweep against the sample portfolio
    ExpireLeases(ExpireArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the sample mall portfolio regardless of APP_SEED_DEMO_DATA
    #[arg(long)]
    pub(crate) seed: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::ExpireLeases(args) => run_expiry_sweep(args),
    }
}
