use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod agents;
mod assemble;
mod coalesce;
mod config;
mod dashboard;
mod dates;
mod envelope;
mod error;
mod gateway;
mod models;
mod report;
mod store;
mod urgency;

use agents::AgentRole;
use config::GatewayConfig;
use dashboard::{Action, Dashboard};
use gateway::{AgentGateway, HttpGateway, ReplayGateway};

#[derive(Parser)]
#[command(name = "campus-dashboard")]
#[command(about = "Student dashboard over the academic, study-plan and collaboration agents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Print view models as JSON instead of markdown
    #[arg(long, global = true)]
    json: bool,
    /// Write output to a file instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    /// Weekday used for today's classes (defaults to the local day)
    #[arg(long, global = true)]
    day: Option<String>,
    /// Agent gateway base URL (overrides AGENT_GATEWAY_URL)
    #[arg(long, global = true)]
    gateway_url: Option<String>,
    /// HTTP timeout for gateway calls (overrides AGENT_GATEWAY_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync LMS data and get the weekly plan from the academic coordinator
    Sync,
    /// Ask the study planner for a plan
    StudyPlan {
        #[arg(long)]
        message: Option<String>,
    },
    /// Study groups, calendar and peer benchmarks
    Collaboration,
    /// Run all three actions concurrently and show every view
    Dashboard {
        #[arg(long)]
        message: Option<String>,
    },
    /// Normalize a saved gateway reply or agent result without calling the gateway
    Render {
        #[arg(long, value_enum)]
        view: ViewKind,
        #[arg(long)]
        input: PathBuf,
    },
    /// List the agents this dashboard talks to
    Agents,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewKind {
    Coordinator,
    StudyPlan,
    Collaboration,
}

impl ViewKind {
    fn action(self) -> Action {
        match self {
            ViewKind::Coordinator => Action::SyncAndPlan,
            ViewKind::StudyPlan => Action::StudyPlan,
            ViewKind::Collaboration => Action::Collaboration,
        }
    }
}

struct Output {
    json: bool,
    out: Option<PathBuf>,
    today: String,
}

impl Output {
    fn emit<T: Serialize>(&self, view: &T, markdown: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        let rendered = if self.json {
            let mut json = serde_json::to_string_pretty(view)?;
            json.push('\n');
            json
        } else {
            markdown(view)
        };

        match &self.out {
            Some(path) => {
                std::fs::write(path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Report written to {}.", path.display());
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,campus_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn live_dashboard(
    gateway_url: Option<String>,
    timeout_secs: Option<u64>,
) -> anyhow::Result<Dashboard<HttpGateway>> {
    let config = GatewayConfig::resolve(gateway_url, timeout_secs)?;
    let gateway = HttpGateway::new(&config.base_url, config.api_key, config.timeout)?;
    tracing::debug!(endpoint = gateway.endpoint(), "using agent gateway");
    Ok(Dashboard::new(gateway))
}

async fn run_action<G: AgentGateway>(
    dashboard: &Dashboard<G>,
    action: Action,
    message: Option<&str>,
    output: &Output,
) -> anyhow::Result<()> {
    let outcome = match action {
        Action::SyncAndPlan => dashboard.sync_and_plan().await,
        Action::StudyPlan => dashboard.get_study_plan(message).await,
        Action::Collaboration => dashboard.get_collaboration().await,
    };

    let store = dashboard.store();
    if let Err(err) = outcome {
        let shown = store.error().unwrap_or_else(|| err.user_message());
        anyhow::bail!("{} failed: {shown}", action.name());
    }

    let emitted = match action {
        Action::SyncAndPlan => store
            .coordinator()
            .map(|view| output.emit(&view, |v| report::render_coordinator(v, &output.today))),
        Action::StudyPlan => store
            .study_plan()
            .map(|view| output.emit(&view, report::render_study_plan)),
        Action::Collaboration => store
            .collaboration()
            .map(|view| output.emit(&view, report::render_collaboration)),
    };

    match emitted {
        Some(result) => result,
        None => {
            println!("No data returned.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let output = Output {
        json: cli.json,
        out: cli.out,
        today: cli.day.unwrap_or_else(models::current_day_name),
    };
    let gateway_url = cli.gateway_url;
    let timeout_secs = cli.timeout_secs;

    match cli.command {
        Commands::Sync => {
            let dashboard = live_dashboard(gateway_url, timeout_secs)?;
            run_action(&dashboard, Action::SyncAndPlan, None, &output).await?;
        }
        Commands::StudyPlan { message } => {
            let dashboard = live_dashboard(gateway_url, timeout_secs)?;
            run_action(&dashboard, Action::StudyPlan, message.as_deref(), &output).await?;
        }
        Commands::Collaboration => {
            let dashboard = live_dashboard(gateway_url, timeout_secs)?;
            run_action(&dashboard, Action::Collaboration, None, &output).await?;
        }
        Commands::Dashboard { message } => {
            let dashboard = live_dashboard(gateway_url, timeout_secs)?;
            let errors = dashboard.refresh_all(message.as_deref()).await;
            let snapshot = dashboard.store().snapshot();
            output.emit(&snapshot, |s| report::render_snapshot(s, &output.today))?;

            if !errors.is_empty() {
                anyhow::bail!("{} of 3 dashboard actions failed", errors.len());
            }
        }
        Commands::Render { view, input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let saved = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not valid JSON", input.display()))?;
            let dashboard = Dashboard::new(ReplayGateway::from_saved(saved)?);
            run_action(&dashboard, view.action(), None, &output).await?;
        }
        Commands::Agents => {
            println!("Agents:");
            for role in AgentRole::ALL {
                println!("- {} {}", role.name(), role.agent_id());
            }
        }
    }

    Ok(())
}
