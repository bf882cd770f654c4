use crate::report::{run_batch, run_prediction, run_subject_listing, BatchArgs, PredictArgs, SubjectsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use grade_predictor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Grade Predictor",
    about = "Predict course grades and the end-term marks needed for each target grade",
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
    /// List catalog subjects for a degree track and level
    Subjects(SubjectsArgs),
    /// Predict the grade for one subject from scores given on the command line
    Predict(PredictArgs),
    /// Predict every student/subject sheet in a CSV export
    Batch(BatchArgs),
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
        Command::Subjects(args) => run_subject_listing(args),
        Command::Predict(args) => run_prediction(args),
        Command::Batch(args) => run_batch(args),
    }
}
