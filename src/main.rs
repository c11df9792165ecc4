use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use award_intake::api::{AppState, create_router};
use award_intake::batch::{BatchReport, BatchRunner, FileOutputs, JsonFieldSource, collect_documents};
use award_intake::config::{ActionsConfig, ConfigLoader, IntakeConfig};
use award_intake::error::{EngineError, EngineResult};
use award_intake::intake::{ConsoleResolver, HeadlessResolver, JsonCounterStore, Resolver};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "award-intake")]
#[command(about = "Award nomination intake: validate, number and record nomination documents")]
struct Cli {
    /// Path to the intake configuration file.
    #[arg(long, global = true, default_value = "./config/intake.yaml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process field dumps (files or directories) as one batch.
    Run {
        /// Only print the record blocks; write, rename and count nothing.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Ask on the terminal when the value/extent or funding org is unclear.
        #[arg(long, default_value_t = false)]
        interactive: bool,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Serve the validation endpoint.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(&cli.config) {
        Ok(loader) => loader.into_config(),
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_filter);

    let outcome = match cli.command {
        Commands::Run {
            dry_run,
            interactive,
            paths,
        } => run_batch(config, dry_run, interactive, &paths).map(|report| {
            print_summary(&report);
            report.failed.is_empty()
        }),
        Commands::Serve { addr } => serve(config, addr).map(|()| true),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            error!(error = %err, "Intake failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

fn run_batch(
    mut config: IntakeConfig,
    dry_run: bool,
    interactive: bool,
    paths: &[PathBuf],
) -> EngineResult<BatchReport> {
    if dry_run {
        config.actions = ActionsConfig::dry_run();
    }

    let documents = collect_documents(paths)?;
    let source = JsonFieldSource;
    let mut sink = FileOutputs::from_config(&config);
    let counter_store = JsonCounterStore::new(config.paths.counter_store.clone());

    let stdin = io::stdin();
    let mut console = ConsoleResolver::new(stdin.lock(), io::stdout());
    let mut headless = HeadlessResolver;
    let resolver: &mut dyn Resolver = if interactive { &mut console } else { &mut headless };

    BatchRunner::new(&config, &source, &mut sink, &counter_store, resolver).run(&documents)
}

fn print_summary(report: &BatchReport) {
    for accepted in &report.processed {
        println!("accepted  {}  {}", accepted.id, accepted.location.display());
    }
    for failed in &report.failed {
        println!("rejected  {}  ({:?})", failed.name, failed.kind);
    }
    println!(
        "{} accepted, {} rejected; next IND {}, next GRP {}",
        report.processed.len(),
        report.failed.len(),
        report.counter.individual,
        report.counter.group
    );
}

fn serve(config: IntakeConfig, addr: SocketAddr) -> EngineResult<()> {
    let counter_store = JsonCounterStore::new(config.paths.counter_store.clone());
    let app = create_router(AppState::new(config, counter_store));

    let runtime = tokio::runtime::Runtime::new().map_err(|err| server_error(&addr, err))?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| server_error(&addr, err))?;
        info!(addr = %addr, "Validation server listening");
        axum::serve(listener, app)
            .await
            .map_err(|err| server_error(&addr, err))
    })
}

fn server_error(addr: &SocketAddr, err: io::Error) -> EngineError {
    EngineError::Output {
        target: addr.to_string(),
        message: err.to_string(),
    }
}
