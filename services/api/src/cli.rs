use crate::demo::{run_chemistry_report, run_demo, ChemistryReportArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use clearwater::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Clearwater Pool Care",
    about = "Run the Clearwater pool-care service or exercise it from the command line",
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
    /// Evaluate water chemistry without starting the service
    Chemistry {
        #[command(subcommand)]
        command: ChemistryCommand,
    },
    /// Run an end-to-end CLI demo covering readings, visits, and assessments
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ChemistryCommand {
    /// Produce a one-shot evaluation and recommendation report
    Report(ChemistryReportArgs),
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
        Command::Chemistry {
            command: ChemistryCommand::Report(args),
        } => run_chemistry_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
