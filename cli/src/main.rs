use std::sync::Arc;

use clap::{Parser, Subcommand};
use goalbingo::config::{API_URL_ENV, DEFAULT_API_BASE_URL};
use goalbingo::render::render_view;
use goalbingo::validation::validate_goal;
use goalbingo::{
    ApiConfig, ApiError, BoardController, BoardError, ConfigError, CreationError, CreationFlow, HttpGoalsApi,
    NotFound, ToggleOutcome, ValidationReport, load_session, validate_goals,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    NotFound(#[from] NotFound),
    #[error("{0}")]
    Create(#[from] CreationError),
    #[error("invalid goals: {0}")]
    Invalid(ValidationReport),
    #[error("{0}")]
    Board(#[from] BoardError),
    #[error("toggle at ({row}, {col}) not applied: {reason}")]
    Toggle { row: usize, col: usize, reason: &'static str },
}

#[derive(Parser, Debug)]
#[command(name = "goalbingo", about = "Create and track Goal Bingo boards")]
struct Cli {
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check goals against the input rules without contacting the API.
    Validate { goals: Vec<String> },
    /// Create a bingo from eight goals and print its board path.
    Create { goals: Vec<String> },
    /// Print a bingo's board.
    Show { bingo_id: String },
    /// Toggle one cell (row and column are 0-2) and print the board.
    Toggle { bingo_id: String, row: usize, col: usize },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate { goals } => run_validate(&goals),
        Command::Create { goals } => run_create(&cli.api_url, goals).await,
        Command::Show { bingo_id } => run_show(&cli.api_url, &bingo_id).await,
        Command::Toggle { bingo_id, row, col } => run_toggle(&cli.api_url, &bingo_id, row, col).await,
    }
}

fn connect(api_url: &str) -> Result<Arc<HttpGoalsApi>, CliError> {
    let config = ApiConfig::new(api_url)?;
    tracing::debug!(api = %config.api_base_url, "using goals API");
    Ok(Arc::new(HttpGoalsApi::new(config)?))
}

fn run_validate(goals: &[String]) -> Result<(), CliError> {
    for (index, goal) in goals.iter().enumerate() {
        match validate_goal(goal) {
            Ok(trimmed) => println!("{:>2}  ok     {trimmed}", index + 1),
            Err(err) => println!("{:>2}  error  {err}", index + 1),
        }
    }
    validate_goals(goals).map_err(CliError::Invalid)?;
    println!("all 8 goals are valid");
    Ok(())
}

async fn run_create(api_url: &str, goals: Vec<String>) -> Result<(), CliError> {
    let api = connect(api_url)?;
    let flow = CreationFlow::new(api);
    flow.set_goals(goals);

    let created = flow.submit().await?;
    println!("{}", created.path);
    Ok(())
}

async fn run_show(api_url: &str, bingo_id: &str) -> Result<(), CliError> {
    let api = connect(api_url)?;
    let session = load_session(api.as_ref(), bingo_id).await?;
    let controller = BoardController::new(api, &session)?;
    print!("{}", render_view(&controller.snapshot()));
    Ok(())
}

async fn run_toggle(api_url: &str, bingo_id: &str, row: usize, col: usize) -> Result<(), CliError> {
    let api = connect(api_url)?;
    let session = load_session(api.as_ref(), bingo_id).await?;
    let controller = BoardController::new(api, &session)?;

    let outcome = controller.toggle_cell(row, col).await;
    print!("{}", render_view(&controller.snapshot()));

    let reason = match outcome {
        ToggleOutcome::Confirmed { .. } => return Ok(()),
        ToggleOutcome::RolledBack => "update failed; board restored",
        ToggleOutcome::Fixed => "the center cell cannot be toggled",
        ToggleOutcome::OutOfRange => "row and column must be 0, 1, or 2",
        ToggleOutcome::Busy => "another update is in progress",
        ToggleOutcome::Superseded => "the board was reloaded",
    };
    Err(CliError::Toggle { row, col, reason })
}
