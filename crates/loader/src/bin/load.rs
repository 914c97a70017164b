use clap::{Parser, Subcommand};
use loader::{Config, LoaderError, PlayerImporter, input};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::path::{Path, PathBuf};
use storage::repository::PlayerRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "players-load")]
#[command(about = "Players JSON-to-Postgres loader", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ensure the schema and insert every player from a JSON file
    Load {
        #[arg(default_value = "players.json")]
        file: PathBuf,

        /// Also apply the integrity layer (constraints, index, audit trigger)
        #[arg(long)]
        integrity: bool,

        /// Decode the input file and exit without touching the database
        #[arg(long)]
        parse_only: bool,
    },
    /// Apply schema DDL without loading any data
    Schema {
        /// Also apply the integrity layer (constraints, index, audit trigger)
        #[arg(long)]
        integrity: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("load={},loader={},storage={}", log_level, log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Load {
            file,
            integrity,
            parse_only,
        } => {
            handle_load(&file, integrity, parse_only).await?;
        }
        Commands::Schema { integrity } => {
            handle_schema(integrity).await?;
        }
    }

    Ok(())
}

async fn handle_load(
    file: &Path,
    integrity: bool,
    parse_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if parse_only {
        let records = input::read_players_file(file)?;
        for (index, value) in records.iter().enumerate() {
            input::PlayerRecord::decode(index, value)?;
        }
        tracing::info!("✓ {} record(s) decoded from {}", records.len(), file.display());
        return Ok(());
    }

    let pool = connect().await?;

    ensure_schema(&pool, integrity).await?;

    tracing::info!("Loading players from {}", file.display());
    let records = input::read_players_file(file)?;
    tracing::info!("Found {} player record(s)", records.len());

    let importer = PlayerImporter::new(&pool);
    importer.import(&records).await?;

    let total = PlayerRepository::new(&pool)
        .count()
        .await
        .map_err(LoaderError::Storage)?;
    tracing::info!("players table now holds {} row(s)", total);

    tracing::info!("✓ Load completed successfully!");

    Ok(())
}

async fn handle_schema(integrity: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    ensure_schema(&pool, integrity).await?;

    tracing::info!("✓ Schema applied successfully!");

    Ok(())
}

async fn connect() -> Result<PgPool, LoaderError> {
    let config = Config::from_env()?;

    tracing::info!(
        "Connecting to {}:{}/{}",
        config.host,
        config.port,
        config.database
    );

    PgPoolOptions::new()
        .max_connections(1)
        .connect_with(config.connect_options())
        .await
        .map_err(LoaderError::Connection)
}

async fn ensure_schema(pool: &PgPool, integrity: bool) -> Result<(), LoaderError> {
    tracing::info!("Ensuring players table...");
    storage::schema::ensure_players_table(pool)
        .await
        .map_err(LoaderError::Schema)?;

    if integrity {
        tracing::info!("Applying integrity layer...");
        storage::schema::apply_integrity_schema(pool)
            .await
            .map_err(LoaderError::Schema)?;
    }

    Ok(())
}
