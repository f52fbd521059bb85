// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths, identifiers and log targets)
pub const APP_NAME_LOWER: &str = "oed";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".oed";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "oed.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "OED_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "OED_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "OED_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "OED_LOG";

/// Environment variable for allowed CORS origins (comma-separated)
pub const ENV_CORS_ORIGINS: &str = "OED_CORS_ORIGINS";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default allowed CORS origin (any)
pub const DEFAULT_CORS_ORIGIN: &str = "*";

/// Maximum time to wait for the store pool to close during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for store backend (sqlite or postgres)
pub const ENV_DB_BACKEND: &str = "OED_DB_BACKEND";

/// Environment variable for the kinetics table name
pub const ENV_DB_TABLE: &str = "OED_DB_TABLE";

/// Environment variable for PostgreSQL connection URL
pub const ENV_POSTGRES_URL: &str = "OED_POSTGRES_URL";

/// Environment variable for the SQLite database path
pub const ENV_SQLITE_PATH: &str = "OED_SQLITE_PATH";

/// Discrete PostgreSQL connection settings, assembled into a URL when no
/// explicit URL is given
pub const ENV_DB_USER: &str = "OED_DB_USER";
pub const ENV_DB_PASSWORD: &str = "OED_DB_PASSWORD";
pub const ENV_DB_HOST: &str = "OED_DB_HOST";
pub const ENV_DB_PORT: &str = "OED_DB_PORT";
pub const ENV_DB_NAME: &str = "OED_DB_NAME";

/// Default PostgreSQL port for assembled URLs
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default PostgreSQL database name for assembled URLs
pub const DEFAULT_DB_NAME: &str = "oed_data";

/// Default kinetics table on PostgreSQL
pub const DEFAULT_POSTGRES_TABLE: &str = "oed.oed_data";

/// Default kinetics table on SQLite
pub const DEFAULT_TABLE: &str = "oed_data";

// =============================================================================
// Environment Variables - Query
// =============================================================================

/// Environment variable for default page size
pub const ENV_DEFAULT_LIMIT: &str = "OED_DEFAULT_LIMIT";

/// Environment variable for maximum page size
pub const ENV_MAX_LIMIT: &str = "OED_MAX_LIMIT";

/// Environment variable for per-request query deadline
pub const ENV_QUERY_TIMEOUT_SECS: &str = "OED_QUERY_TIMEOUT_SECS";

// =============================================================================
// Query Defaults
// =============================================================================

/// Page size when the request gives no limit
pub const DEFAULT_LIMIT: u64 = 100;

/// Largest page size a request may ask for
pub const DEFAULT_MAX_LIMIT: u64 = 10_000;

/// Per-request deadline covering count and page reads
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// HTTP
// =============================================================================

/// Download file name for CSV responses
pub const CSV_FILENAME: &str = "oed_data.csv";

/// Response header carrying the total match count
pub const HEADER_TOTAL_COUNT: &str = "x-total-count";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename (inside the dotfile folder)
pub const SQLITE_DB_FILENAME: &str = "oed.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

// =============================================================================
// PostgreSQL Database
// =============================================================================

/// PostgreSQL default max connections
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL default min connections (keep warm for low latency)
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;

/// PostgreSQL default connection acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// PostgreSQL idle connection timeout in seconds (release unused connections)
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// PostgreSQL max connection lifetime in seconds (cycle connections to prevent stale state)
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// PostgreSQL statement timeout in seconds (prevent runaway queries, 0 = disabled)
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;
