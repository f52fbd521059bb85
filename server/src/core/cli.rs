use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::StoreBackend;
use super::constants::{
    ENV_CONFIG, ENV_CORS_ORIGINS, ENV_DB_BACKEND, ENV_DB_TABLE, ENV_DEFAULT_LIMIT, ENV_HOST,
    ENV_MAX_LIMIT, ENV_PORT, ENV_POSTGRES_URL, ENV_QUERY_TIMEOUT_SECS, ENV_SQLITE_PATH,
};

#[derive(Parser)]
#[command(name = "oed")]
#[command(version, about = "Read-only query API for enzyme kinetics data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Allowed CORS origins, comma-separated ("*" for any)
    #[arg(long, global = true, env = ENV_CORS_ORIGINS, value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // Database options
    /// Store backend (sqlite or postgres)
    #[arg(long, global = true, env = ENV_DB_BACKEND, value_parser = parse_store_backend)]
    pub db_backend: Option<StoreBackend>,

    /// Kinetics table name (optionally schema-qualified on postgres)
    #[arg(long, global = true, env = ENV_DB_TABLE)]
    pub db_table: Option<String>,

    /// PostgreSQL connection URL (when using postgres backend)
    #[arg(long, global = true, env = ENV_POSTGRES_URL)]
    pub postgres_url: Option<String>,

    /// SQLite database path (when using sqlite backend)
    #[arg(long, global = true, env = ENV_SQLITE_PATH)]
    pub sqlite_path: Option<PathBuf>,

    // Query options
    /// Page size when a request gives no limit
    #[arg(long, global = true, env = ENV_DEFAULT_LIMIT)]
    pub default_limit: Option<u64>,

    /// Largest page size a request may ask for
    #[arg(long, global = true, env = ENV_MAX_LIMIT)]
    pub max_limit: Option<u64>,

    /// Per-request query deadline in seconds
    #[arg(long, global = true, env = ENV_QUERY_TIMEOUT_SECS)]
    pub query_timeout_secs: Option<u64>,
}

/// Parse store backend from CLI/env string
fn parse_store_backend(s: &str) -> Result<StoreBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(StoreBackend::Sqlite),
        "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
        _ => Err(format!(
            "Invalid store backend '{}'. Valid options: sqlite, postgres",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Load a JSON array of kinetic records into the SQLite store
    Import {
        /// Path to the records file
        #[arg(long, short = 'f')]
        file: PathBuf,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub cors_origins: Option<Vec<String>>,
    pub db_backend: Option<StoreBackend>,
    pub db_table: Option<String>,
    pub postgres_url: Option<String>,
    pub sqlite_path: Option<PathBuf>,
    pub default_limit: Option<u64>,
    pub max_limit: Option<u64>,
    pub query_timeout_secs: Option<u64>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        cors_origins: cli.cors_origins,
        db_backend: cli.db_backend,
        db_table: cli.db_table,
        postgres_url: cli.postgres_url,
        sqlite_path: cli.sqlite_path,
        default_limit: cli.default_limit,
        max_limit: cli.max_limit,
        query_timeout_secs: cli.query_timeout_secs,
    };
    (config, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_store_backend_variants() {
        assert_eq!(parse_store_backend("sqlite"), Ok(StoreBackend::Sqlite));
        assert_eq!(parse_store_backend("PostgreSQL"), Ok(StoreBackend::Postgres));
        assert!(parse_store_backend("duckdb").is_err());
    }

    #[test]
    fn import_subcommand_parses() {
        let cli = Cli::try_parse_from(["oed", "import", "--file", "records.json"]).unwrap();
        match cli.command {
            Some(Commands::Import { file }) => assert_eq!(file, PathBuf::from("records.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn cors_origins_split_on_commas() {
        let cli = Cli::try_parse_from([
            "oed",
            "--cors-origins",
            "http://a.example,http://b.example",
        ])
        .unwrap();
        assert_eq!(
            cli.cors_origins,
            Some(vec![
                "http://a.example".to_string(),
                "http://b.example".to_string()
            ])
        );
    }
}
