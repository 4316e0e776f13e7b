use std::error::Error;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bus_planner::cli::{Session, run_repl};
use bus_planner::planner::PlannerConfig;
use bus_planner::schedule::ScheduleConfig;
use bus_planner::store::Network;
use bus_planner::web::{AppState, create_router};

/// Bus network itinerary planner and schedule conflict checker.
#[derive(Parser)]
#[command(name = "bus-planner", version)]
struct Cli {
    /// JSON snapshot to load at startup and rewrite after every change
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Log more detail (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Interactive shell (the default)
    Repl,

    /// Execute a comma-separated command file and exit
    Run {
        /// Command file, one `command, arg, ...` row per line
        file: PathBuf,
    },

    /// Serve the JSON API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let mode = cli.mode.unwrap_or(Mode::Repl);
    init_tracing(matches!(mode, Mode::Serve { .. }), cli.verbose);

    let schedule_config = ScheduleConfig::default();
    let planner_config = PlannerConfig::default();
    let network = load_network(cli.data.as_deref(), &schedule_config)?;

    match mode {
        Mode::Repl => {
            let mut session = session(network, schedule_config, planner_config, cli.data);
            run_repl(&mut session, io::stdin().lock(), io::stdout().lock())?;
        }
        Mode::Run { file } => {
            let mut session = session(network, schedule_config, planner_config, cli.data);
            for out in session.run_file(&file) {
                println!("{out}");
            }
        }
        Mode::Serve { addr } => {
            let mut state = AppState::new(network, schedule_config, planner_config);
            if let Some(path) = cli.data {
                state = state.with_snapshot(path);
            }
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(serve(state, addr))?;
        }
    }

    Ok(())
}

/// Log to stderr so shell output on stdout stays exact. `RUST_LOG`
/// overrides the defaults.
fn init_tracing(serving: bool, verbose: u8) {
    let default = match (serving, verbose) {
        (false, 0) => "bus_planner=warn",
        (true, 0) => "bus_planner=info,tower_http=info",
        (_, 1) => "bus_planner=debug,tower_http=debug",
        _ => "bus_planner=trace,tower_http=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Load the snapshot if one exists; otherwise start empty.
fn load_network(path: Option<&Path>, config: &ScheduleConfig) -> Result<Network, Box<dyn Error>> {
    match path {
        Some(path) if path.exists() => Ok(Network::load(path, config)?),
        Some(path) => {
            info!(path = %path.display(), "no snapshot yet, starting empty");
            Ok(Network::new())
        }
        None => Ok(Network::new()),
    }
}

fn session(
    network: Network,
    schedule_config: ScheduleConfig,
    planner_config: PlannerConfig,
    snapshot: Option<PathBuf>,
) -> Session {
    let session = Session::new(network, schedule_config, planner_config);
    match snapshot {
        Some(path) => session.with_snapshot(path),
        None => session,
    }
}

async fn serve(state: AppState, addr: SocketAddr) -> io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "bus planner listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
