//! Core application

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::{AppConfig, StoreBackend};
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::types::KineticRecord;
use crate::data::{KineticsService, SqliteService};
use crate::utils::file::expand_path;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub store: Arc<KineticsService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Import { file }) => {
                let config = AppConfig::load(&cli_config)?;
                return Self::import_records(&config, &file).await;
            }
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config).await?;
        Self::start_server(app).await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let store = KineticsService::init(&config).await.with_context(|| {
            format!(
                "Failed to open kinetics table '{}' on {}",
                config.database.table, config.database.backend
            )
        })?;
        let store = Arc::new(store);
        tracing::debug!(backend = %store.backend(), "Kinetics store initialized");

        let shutdown = ShutdownService::new(store.clone());

        Ok(Self {
            shutdown,
            config,
            store,
        })
    }

    /// Load a JSON array of records into the SQLite store
    async fn import_records(config: &AppConfig, file: &Path) -> Result<()> {
        if config.database.backend != StoreBackend::Sqlite {
            anyhow::bail!(
                "Import only targets the sqlite backend (configured: {})",
                config.database.backend
            );
        }

        let path = expand_path(&file.to_string_lossy());
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read records file: {}", path.display()))?;
        let records: Vec<KineticRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse records file: {}", path.display()))?;

        let service = SqliteService::init(
            &config.database.sqlite,
            &config.database.table,
            std::time::Duration::from_secs(config.query.timeout_secs),
        )
        .await?;
        service.create_table().await?;
        let count = service.insert_records(&records).await?;
        service.close().await;

        tracing::info!(
            count,
            table = %config.database.table,
            path = %config.database.sqlite.path.display(),
            "Records imported"
        );
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }
}
