use crate::demo::{run_demo, run_score_import, DemoArgs, ScoreImportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use parlo::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Parlo Proficiency Engine",
    about = "Demonstrate and run the Parlo placement and progression engine from the command line",
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
    /// Inspect historical session scores for stakeholder demos
    Progress {
        #[command(subcommand)]
        command: ProgressCommand,
    },
    /// Run an end-to-end CLI demo covering placement and progression workflows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ProgressCommand {
    /// Import a session score export and report per-learner standings
    Import(ScoreImportArgs),
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
        Command::Progress {
            command: ProgressCommand::Import(args),
        } => run_score_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
