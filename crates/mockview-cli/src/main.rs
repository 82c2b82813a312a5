//! mockview CLI: drive mock interview sessions from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_FILTER: &str = "mockview_core=info,mockview_store=info";

#[derive(Parser)]
#[command(name = "mockview", version, about = "Mock interview session engine")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config
    Init {
        /// Directory for the file store
        #[arg(long)]
        store_path: Option<PathBuf>,
    },

    /// Start a new interview session
    Create {
        /// Interview mode: text or voice
        #[arg(long)]
        mode: String,

        /// Target job role
        #[arg(long)]
        job_role: String,

        /// Candidate experience, e.g. "3 years"
        #[arg(long)]
        experience: String,

        /// Target company
        #[arg(long)]
        company: Option<String>,

        /// Easy, Intermediate, Advanced or Mixed
        #[arg(long)]
        difficulty: String,

        /// File holding the resume text
        #[arg(long)]
        resume: Option<PathBuf>,
    },

    /// Draw the next question for a session
    Question {
        #[arg(long)]
        session_id: String,

        /// Difficulty to draw from (default: Mixed)
        #[arg(long)]
        difficulty: Option<String>,
    },

    /// Submit a text answer
    Answer {
        #[arg(long)]
        session_id: String,

        #[arg(long)]
        question_id: String,

        /// Answer text
        #[arg(long, default_value = "")]
        answer: String,
    },

    /// Submit a recorded answer
    VoiceAnswer {
        #[arg(long)]
        session_id: String,

        #[arg(long)]
        question_id: String,

        /// Audio file
        #[arg(long)]
        audio: PathBuf,
    },

    /// Summary of the rounds answered so far
    Summary {
        #[arg(long)]
        session_id: String,
    },

    /// End-of-session report
    Report {
        #[arg(long)]
        session_id: String,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show a stored session and its state
    Status {
        #[arg(long)]
        session_id: String,
    },

    /// Show interview prices
    Pricing,

    /// Record a mock payment
    Pay {
        #[arg(long)]
        amount: u32,

        /// Interview mode: text or voice
        #[arg(long)]
        mode: String,
    },

    /// Report backend and store status
    Health,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init { store_path } => commands::init::execute(config, store_path),
        Commands::Create {
            mode,
            job_role,
            experience,
            company,
            difficulty,
            resume,
        } => {
            commands::create::execute(
                config, mode, job_role, experience, company, difficulty, resume,
            )
            .await
        }
        Commands::Question {
            session_id,
            difficulty,
        } => commands::question::execute(config, session_id, difficulty).await,
        Commands::Answer {
            session_id,
            question_id,
            answer,
        } => commands::answer::execute(config, session_id, question_id, answer).await,
        Commands::VoiceAnswer {
            session_id,
            question_id,
            audio,
        } => commands::voice_answer::execute(config, session_id, question_id, audio).await,
        Commands::Summary { session_id } => commands::summary::execute(config, session_id).await,
        Commands::Report {
            session_id,
            format,
            output,
        } => commands::report::execute(config, session_id, format, output).await,
        Commands::Status { session_id } => commands::status::execute(config, session_id).await,
        Commands::Pricing => commands::pricing::execute(config),
        Commands::Pay { amount, mode } => commands::pay::execute(config, amount, mode).await,
        Commands::Health => commands::health::execute(config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
