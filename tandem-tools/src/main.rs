use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tandem_store::config::Settings;
use tandem_store::{catalog, social, Database};

/// Tandem Database Utility
///
/// Initializes an app database (applying its schema), optionally loads seed
/// data, and prints a per-table row-count report.
#[derive(Parser, Debug)]
#[command(name = "tandem-db")]
#[command(about = "Initialize, seed, and inspect the Tandem app databases", long_about = None)]
struct Args {
    /// Which app database to operate on
    #[arg(value_enum)]
    app: App,

    /// Path to the SQLite database file (defaults to the configured path)
    #[arg(short, long)]
    database: Option<String>,

    /// Load seed data after initializing
    #[arg(long)]
    seed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum App {
    Social,
    Catalog,
}

/// Row counts per table, collected after initialization
#[derive(Debug, Default)]
struct TableReport {
    tables: Vec<(String, i64)>,
}

impl TableReport {
    fn collect(db: &Database) -> Result<Self> {
        let conn = db.connection()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut tables = Vec::new();
        for name in names {
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM \"{name}\""), [], |row| {
                    row.get(0)
                })?;
            tables.push((name, count));
        }
        Ok(Self { tables })
    }

    #[cfg(test)]
    fn rows(&self, table: &str) -> Option<i64> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|&(_, count)| count)
    }

    fn print(&self) {
        println!("{:<20} rows", "table");
        for (name, count) in &self.tables {
            println!("{name:<20} {count}");
        }
    }
}

fn run(app: App, path: &str, seed: bool) -> Result<TableReport> {
    let db = match app {
        App::Social => social::open(path),
        App::Catalog => catalog::open(path),
    }
    .with_context(|| format!("Failed to open database at {path}"))?;

    if seed {
        let seed_sql = match app {
            App::Social => social::schema::SEED_DATA,
            App::Catalog => catalog::schema::SEED_DATA,
        };
        db.seed(seed_sql).context("Failed to load seed data")?;
    }

    TableReport::collect(&db)
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tandem_db=info,tandem_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let path = match args.database {
        Some(path) => path,
        None => {
            let settings = Settings::new().context("Failed to load settings")?;
            match args.app {
                App::Social => settings.social.path,
                App::Catalog => settings.catalog.path,
            }
        }
    };

    tracing::info!(app = ?args.app, path, seed = args.seed, "initializing database");
    let report = run(args.app, &path, args.seed)?;
    report.print();

    Ok(())
}
