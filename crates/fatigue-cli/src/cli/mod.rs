//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use fatigue_core::api::{
    ActivityType, Position, PredictedAction, RiskLevel, SessionId, SessionRequest,
};
use fatigue_core::config;
use fatigue_core::feedback::Outcome;
use fatigue_core::logging::{self, LogOutput};

mod commands;

#[derive(Parser)]
#[command(name = "fatigue")]
#[command(version)]
#[command(about = "Player fatigue predictions from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the prediction API (overrides config)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Submits a session and prints the prediction
    Predict(PredictArgs),

    /// Prints the agent status once
    Status,

    /// Sends feedback on a prediction
    Feedback(FeedbackArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args, Debug)]
struct PredictArgs {
    #[arg(long)]
    player_name: String,

    /// goalkeeper, defender, midfielder, forward
    #[arg(long)]
    position: Position,

    /// practice, game (or match)
    #[arg(long)]
    activity: ActivityType,

    /// Hours slept, 0 to 12
    #[arg(long)]
    sleep_hours: f64,

    /// 1 to 10
    #[arg(long)]
    stress_level: u8,

    #[arg(long)]
    distance_km: f64,

    #[arg(long)]
    sprint_count: u32,

    /// Muscle soreness, 1 to 10
    #[arg(long)]
    soreness: Option<u8>,

    /// Rate of perceived exertion, 1 to 10
    #[arg(long)]
    rpe: Option<u8>,

    /// Player reports an injury or illness
    #[arg(long)]
    injury_illness: bool,
}

impl From<PredictArgs> for SessionRequest {
    fn from(args: PredictArgs) -> Self {
        // Any advanced field sends the injury flag too.
        let advanced = args.soreness.is_some() || args.rpe.is_some() || args.injury_illness;
        SessionRequest {
            player_name: args.player_name.trim().to_string(),
            position: args.position,
            activity_type: args.activity,
            sleep_hours: args.sleep_hours,
            stress_level: args.stress_level,
            distance_km: args.distance_km,
            sprint_count: args.sprint_count,
            soreness: args.soreness,
            rpe: args.rpe,
            injury_illness: advanced.then_some(args.injury_illness),
        }
    }
}

#[derive(clap::Args, Debug)]
struct FeedbackArgs {
    #[arg(long)]
    session_id: SessionId,

    /// Action the agent predicted for the session
    #[arg(long, value_name = "ACTION")]
    predicted_action: PredictedAction,

    /// The prediction was right
    #[arg(long, conflicts_with = "incorrect")]
    correct: bool,

    /// The prediction was wrong (requires --action and --fatigue)
    #[arg(long)]
    incorrect: bool,

    /// What the action should have been
    #[arg(long, value_name = "ACTION")]
    action: Option<PredictedAction>,

    /// Estimated fatigue: low, medium, high, critical
    #[arg(long, value_name = "LEVEL")]
    fatigue: Option<RiskLevel>,

    #[arg(long)]
    comment: Option<String>,

    /// Observed outcomes: injured, exhausted, performed_well
    #[arg(long, value_delimiter = ',')]
    outcome: Vec<Outcome>,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, api_url } = cli;
    let api_url = api_url.as_deref();

    // default to the dashboard
    let Some(command) = command else {
        let config = prepare(LogOutput::File)?;
        return commands::dashboard::run(&config, api_url).await;
    };

    match command {
        Commands::Predict(args) => {
            let config = prepare(LogOutput::FileAndStderr)?;
            commands::predict::run(&config, api_url, args.into()).await
        }
        Commands::Status => {
            let config = prepare(LogOutput::FileAndStderr)?;
            commands::status::run(&config, api_url).await
        }
        Commands::Feedback(args) => {
            let config = prepare(LogOutput::FileAndStderr)?;
            let verdict = if args.correct {
                Some(true)
            } else if args.incorrect {
                Some(false)
            } else {
                None
            };
            commands::feedback::run(commands::feedback::FeedbackRunOptions {
                config: &config,
                api_url,
                session_id: args.session_id,
                predicted_action: args.predicted_action,
                verdict,
                correct_action: args.action,
                estimated_fatigue: args.fatigue,
                comment: args.comment.as_deref().unwrap_or_default(),
                outcomes: &args.outcome,
            })
            .await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Starts logging and loads the config file.
fn prepare(output: LogOutput) -> Result<config::Config> {
    init_logging(output);
    config::Config::load().context("load config")
}

/// Logging is best effort; a read-only home must not block predictions.
fn init_logging(output: LogOutput) {
    if let Err(e) = logging::init(output) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
}
