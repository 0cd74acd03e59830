use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

mod commands;
mod context;

use context::AppContext;

#[derive(Parser, Debug, Clone)]
#[command(name = "lootcase")]
#[command(author, version, about = "Loot-case rewards: catalog, weighted draws and cooldowns")]
pub struct Args {
    /// Postgres connection URL. Without one everything lives in memory
    /// for the duration of the command.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Upper bound on pooled Postgres connections
    #[arg(long, env = "LOOTCASE_DB_MAX_CONNECTIONS", default_value_t = 5)]
    db_max_connections: u32,

    /// JSON file with free case / free wheel settings
    #[arg(long, env = "LOOTCASE_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for a reproducible draw sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Account the rewards are applied to
    #[arg(long, env = "LOOTCASE_SUBJECT", default_value = "00000000-0000-0000-0000-000000000001")]
    subject: Uuid,

    /// Coins credited when the account does not exist yet
    #[arg(long, default_value_t = 1000)]
    starting_balance: i64,

    /// Print outcomes as JSON lines
    #[arg(long, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cases currently offered in the shop
    ListCases,
    /// Open a case from the catalog
    OpenCase {
        case_id: String,
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Open the daily free case
    FreeCase {
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Spin the daily free wheel
    FreeWheel {
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Balance and cooldown state for the subject
    Status,
    /// Draw repeatedly from one case without touching any balance
    Simulate {
        case_id: String,
        #[arg(long, default_value_t = 10_000)]
        draws: u32,
    },
    /// Load the bundled catalog into an empty store
    SeedCatalog,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("lootcase=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!(
        "lootcase starting. store={}, subject={}",
        if args.database_url.is_some() { "postgres" } else { "memory" },
        args.subject
    );

    let ctx = AppContext::new(&args).await?;
    if let Err(e) = commands::run(&ctx, &args.command, args.json).await {
        error!("Command failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
