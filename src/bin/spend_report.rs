//! Renders a portfolio spend or task order report as JSON on standard output.
//!
//! Usage:
//!
//! ```text
//! spend_report --portfolio <name> [--application <app> --environment <env>]
//! spend_report --expired-for <portfolio-id> --task-order-file <file> [--report-date <date>]
//! ```
//!
//! Without an application and environment the report lists monthly totals
//! for every application of the portfolio. With both, it lists invoiced and
//! estimated spend per CLIN type of that environment. `--expired-for` lists
//! the signed task orders of a portfolio that have expired on the report
//! date, read from a JSON array of serialized task orders.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::Parser;
use clinledger::{
    clock::FixedClock,
    config::{ConfigError, ReportArgs, ReportTarget},
    reporting::{
        adapters::FixtureSpendDataSource,
        ports::SpendSourceError,
        services::{ReportService, ReportingError},
    },
    task_order::{
        adapters::memory::InMemoryTaskOrderRepository,
        domain::TaskOrder,
        ports::{TaskOrderRepository, TaskOrderRepositoryError},
    },
};
use mockable::{Clock, DefaultClock};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
enum SpendReportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open fixture directory {path}: {source}")]
    FixtureDir { path: String, source: io::Error },
    #[error(transparent)]
    Source(#[from] SpendSourceError),
    #[error("failed to read task orders from {path}: {source}")]
    TaskOrderFile { path: String, source: io::Error },
    #[error("malformed task orders in {path}: {source}")]
    TaskOrderParse {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Repository(#[from] TaskOrderRepositoryError),
    #[error(transparent)]
    Report(#[from] ReportingError),
    #[error("no spend data for environment {0}")]
    UnknownEnvironment(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(io::Error),
    #[error("failed to write report: {0}")]
    Output(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let dotenv_error = dotenvy::dotenv().err().filter(|err| !err.not_found());

    let args = ReportArgs::parse();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_directive())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Some(err) = dotenv_error {
        warn!(error = %err, "ignoring unreadable .env file");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "spend report failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &ReportArgs) -> Result<(), SpendReportError> {
    let target = args.target()?;

    let dir = Dir::open_ambient_dir(&args.fixture_dir, ambient_authority()).map_err(|source| {
        SpendReportError::FixtureDir {
            path: args.fixture_dir.to_string(),
            source,
        }
    })?;
    let source = if target.reads_spend() {
        let source = FixtureSpendDataSource::open(&dir, &args.fixture_file)?;
        info!(
            fixture = %args.fixture_dir.join(&args.fixture_file),
            "loaded spend fixture"
        );
        source
    } else {
        FixtureSpendDataSource::new()
    };

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SpendReportError::Runtime)?;
    let repository = InMemoryTaskOrderRepository::new();
    if let Some(file) = &args.task_order_file {
        let task_orders = load_task_orders(&dir, file)?;
        runtime.block_on(async {
            for task_order in &task_orders {
                repository.store(task_order).await?;
            }
            Ok::<_, TaskOrderRepositoryError>(())
        })?;
        info!(count = task_orders.len(), fixture = %file, "loaded task orders");
    }

    match args.report_date {
        Some(date) => render(target, &runtime, source, repository, FixedClock::at_date(date)),
        None => render(target, &runtime, source, repository, DefaultClock),
    }
}

fn load_task_orders(dir: &Dir, file: &Utf8Path) -> Result<Vec<TaskOrder>, SpendReportError> {
    let raw = dir
        .read_to_string(file)
        .map_err(|source| SpendReportError::TaskOrderFile {
            path: file.to_string(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| SpendReportError::TaskOrderParse {
        path: file.to_string(),
        source,
    })
}

fn render<C>(
    target: ReportTarget<'_>,
    runtime: &Runtime,
    source: FixtureSpendDataSource,
    repository: InMemoryTaskOrderRepository,
    clock: C,
) -> Result<(), SpendReportError>
where
    C: Clock + Send + Sync,
{
    info!(as_of = %clock.utc().date_naive(), "rendering report");
    let service = ReportService::new(Arc::new(source), Arc::new(repository), Arc::new(clock));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match target {
        ReportTarget::MonthlySpending { portfolio } => {
            let applications = service.monthly_spending(portfolio)?;
            serde_json::to_writer_pretty(&mut out, &applications)?;
        }
        ReportTarget::EnvironmentClinTypes {
            portfolio,
            application,
            environment,
        } => {
            let totals = service
                .environment_clin_type_totals(portfolio, application, environment)?
                .ok_or_else(|| {
                    SpendReportError::UnknownEnvironment(format!(
                        "{portfolio}/{application}/{environment}"
                    ))
                })?;
            serde_json::to_writer_pretty(&mut out, &totals)?;
        }
        ReportTarget::ExpiredTaskOrders { portfolio_id, .. } => {
            let expired = runtime.block_on(service.expired_task_orders(portfolio_id))?;
            serde_json::to_writer_pretty(&mut out, &expired)?;
        }
    }
    writeln!(out)?;
    Ok(())
}
