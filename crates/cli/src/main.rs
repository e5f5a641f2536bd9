//! `mentorscope` -- command-line client for the mentor analysis platform.
//!
//! Uploads recorded teaching sessions for asynchronous AI analysis,
//! follows jobs to completion with synthesized progress lines, and
//! renders the service's precomputed mentor aggregates.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default                 | Description            |
//! |-----------------------|----------|-------------------------|------------------------|
//! | `MENTORSCOPE_API_URL` | no       | `http://localhost:8000` | Platform API base URL  |
//!
//! `--api-url` takes precedence over the environment. `RUST_LOG`
//! controls diagnostics (default `mentorscope=warn`).

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use mentorscope_cli::config::CliConfig;
use mentorscope_cli::{render, watch};
use mentorscope_client::AnalysisApi;
use mentorscope_core::analysis::{AnalysisRecord, AnalysisState, AnalysisStatus};
use mentorscope_tracker::{SessionState, StatusPoller, StopCause};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "mentorscope",
    about = "Client for the mentor video-analysis platform",
    version
)]
struct Cli {
    /// Platform API base URL; overrides `MENTORSCOPE_API_URL`
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a session recording and follow its analysis
    Submit(SubmitArgs),
    /// Follow an existing analysis job to completion
    Watch { analysis_id: String },
    /// Fetch and print one analysis record
    Status { analysis_id: String },
    /// List recent analyses, newest first
    List {
        /// Records to skip
        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Page size
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// List mentors with aggregate stats
    Mentors,
    /// Show one mentor's rollup and recent sessions
    Mentor { mentor_id: String },
    /// Show the mentor leaderboard
    Top {
        /// Leaderboard size
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Probe service and database health
    Health,
}

#[derive(Parser, Debug)]
struct SubmitArgs {
    /// Path to the session recording
    #[arg(long)]
    video: PathBuf,

    /// Mentor display name
    #[arg(long)]
    mentor: String,

    /// Session subject
    #[arg(long)]
    subject: String,

    /// Existing mentor id; the service assigns one when omitted
    #[arg(long)]
    mentor_id: Option<String>,

    /// Upload only; do not follow the analysis
    #[arg(long, default_value_t = false)]
    no_watch: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentorscope=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = CliConfig::from_env();
    let api_url = cli.api_url.unwrap_or(config.api_url);
    let api = AnalysisApi::new(api_url);

    if let Err(error) = run(api, cli.command).await {
        tracing::error!("{error:#}");
        std::process::exit(1);
    }
}

async fn run(api: AnalysisApi, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Submit(args) => {
            let response = api
                .upload_analysis(
                    &args.video,
                    &args.mentor,
                    &args.subject,
                    args.mentor_id.as_deref(),
                )
                .await
                .context("upload failed")?;
            println!("{} (analysis {})", response.message, response.analysis_id);

            if args.no_watch {
                return Ok(());
            }
            follow_analysis(api, &response.analysis_id).await
        }
        Commands::Watch { analysis_id } => follow_analysis(api, &analysis_id).await,
        Commands::Status { analysis_id } => {
            let record = api
                .get_analysis(&analysis_id)
                .await
                .context("fetch failed")?;
            print_record(&record);
            Ok(())
        }
        Commands::List { skip, limit } => {
            let page = api.list_analyses(skip, limit).await.context("list failed")?;
            println!(
                "{} analyses total (showing {} from {})",
                page.total,
                page.analyses.len(),
                page.skip,
            );
            for record in &page.analyses {
                println!("{}", render::listing_row(record));
            }
            Ok(())
        }
        Commands::Mentors => {
            let listing = api.list_mentors().await.context("mentor list failed")?;
            if listing.mentors.is_empty() {
                println!("No mentors yet");
            }
            for mentor in &listing.mentors {
                println!("{}", render::mentor_row(mentor));
            }
            Ok(())
        }
        Commands::Mentor { mentor_id } => {
            let detail = api
                .mentor_detail(&mentor_id)
                .await
                .context("mentor fetch failed")?;
            println!("{}", render::mentor_detail_block(&detail));
            Ok(())
        }
        Commands::Top { limit } => {
            let board = api
                .top_mentors(limit)
                .await
                .context("leaderboard fetch failed")?;
            for row in &board.top_mentors {
                println!("{}", render::leaderboard_row(row));
            }
            Ok(())
        }
        Commands::Health => {
            let service = api.health().await.context("health probe failed")?;
            println!("{}", render::health_line("service", &service));

            let database = api
                .database_health()
                .await
                .context("database probe failed")?;
            println!("{}", render::health_line("database", &database));
            Ok(())
        }
    }
}

/// Track one analysis on the standard 3 s cadence, printing a progress
/// line per applied poll, and report its terminal outcome.
async fn follow_analysis(api: AnalysisApi, analysis_id: &str) -> anyhow::Result<()> {
    let poller = StatusPoller::new(Arc::new(api));
    let handle = poller.start(analysis_id)?;

    let mut stdout = io::stdout();
    let session = watch::follow(&handle, &mut stdout).await?;

    match session.state {
        SessionState::Stopped(StopCause::Terminal) => match session.latest {
            Some(record) => report_terminal(&record),
            None => anyhow::bail!("analysis {analysis_id} stopped without a record"),
        },
        SessionState::Stopped(StopCause::FetchError) => match session.last_error {
            Some(error) => Err(anyhow::Error::new(error)
                .context(format!("tracking stopped for analysis {analysis_id}"))),
            None => anyhow::bail!("tracking stopped for analysis {analysis_id}"),
        },
        SessionState::Idle | SessionState::Polling => {
            anyhow::bail!("tracking ended early for analysis {analysis_id}")
        }
    }
}

/// Render the terminal record: the score report on success, a nonzero
/// exit on failure, a warning plus whatever fields are present when the
/// record contradicts its own status.
fn report_terminal(record: &AnalysisRecord) -> anyhow::Result<()> {
    match record.state() {
        Ok(AnalysisState::Completed(done)) => {
            println!("{}", render::score_report(&done.scores, &done.insights));
            Ok(())
        }
        Ok(AnalysisState::Failed { .. }) => anyhow::bail!(render::failure_line(record)),
        Ok(_) => anyhow::bail!("analysis {} stopped while still running", record.id),
        Err(anomaly) => {
            tracing::warn!(analysis_id = %record.id, "{anomaly}");
            println!("{}", render::record_summary(record));
            if record.status == AnalysisStatus::Failed {
                anyhow::bail!("analysis {} failed", record.id);
            }
            Ok(())
        }
    }
}

/// Print one record; completed analyses get the full score report.
fn print_record(record: &AnalysisRecord) {
    println!("{}", render::record_summary(record));
    match record.state() {
        Ok(AnalysisState::Completed(done)) => {
            println!("{}", render::score_report(&done.scores, &done.insights));
        }
        Ok(_) => {}
        Err(anomaly) => tracing::warn!(analysis_id = %record.id, "{anomaly}"),
    }
}
