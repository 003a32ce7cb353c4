//! Seed deterministic example postings into PostgreSQL.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use jobboard::domain::ExampleDataSeeder;
use jobboard::domain::ports::SeedingResult;
use jobboard::example_data::load_registry;
use jobboard::outbound::persistence::{
    DbPool, DieselExampleDataSeedRepository, PoolConfig, run_pending_migrations,
};
use mockable::DefaultClock;
use tokio::runtime::Builder;

/// `seed-postings` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-postings",
    about = "Insert a named batch of example job postings once",
    version
)]
struct CliArgs {
    /// Seed name from the registry.
    #[arg(long = "seed", value_name = "name", default_value = "sunrise-flow")]
    seed_name: String,
    /// Override the registry's posting count.
    #[arg(long = "count", value_name = "n")]
    count: Option<usize>,
    /// Registry file path.
    #[arg(
        long = "registry",
        value_name = "path",
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/example-data/seeds.json")
    )]
    registry_path: PathBuf,
    /// Database connection URL. Falls back to `JOBBOARD_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;
    let registry = load_registry(&args.registry_path).map_err(io::Error::other)?;

    run_pending_migrations(&database_url)
        .await
        .map_err(io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let seeder = ExampleDataSeeder::new(
        Arc::new(DieselExampleDataSeedRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let outcome = seeder
        .seed_from_registry(&registry, &args.seed_name, args.count)
        .await
        .map_err(|error| io::Error::other(format!("seeding failed: {error}")))?;

    let status = match outcome.result {
        SeedingResult::Applied => "applied",
        SeedingResult::AlreadySeeded => "already-seeded",
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "status={status}")?;
    writeln!(stdout, "seed={}", outcome.seed_key)?;
    writeln!(stdout, "posting_count={}", outcome.posting_count)?;
    Ok(())
}

fn resolve_database_url(flag: Option<String>) -> io::Result<String> {
    flag.or_else(|| env::var("JOBBOARD_DATABASE_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| io::Error::other("--database-url or JOBBOARD_DATABASE_URL is required"))
}
