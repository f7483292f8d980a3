use std::env;
use std::fmt;
#[cfg(feature = "database")]
use std::time::Duration;

#[cfg(feature = "database")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Supported relational backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbDriver {
    Postgres,
    Mysql,
    Sqlite,
}

impl DbDriver {
    /// Parse a `DB_DRIVER` value. Anything unrecognised falls back to MySQL.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => DbDriver::Postgres,
            "sqlite" => DbDriver::Sqlite,
            "mysql" => DbDriver::Mysql,
            other => {
                tracing::warn!(driver = %other, "Unknown DB_DRIVER, using mysql");
                DbDriver::Mysql
            }
        }
    }

    pub fn default_port(&self) -> &'static str {
        match self {
            DbDriver::Postgres => "5432",
            DbDriver::Mysql => "3306",
            DbDriver::Sqlite => "",
        }
    }
}

/// Connection parameters assembled from `DB_*` variables.
#[derive(Debug, Clone)]
pub struct DbUrlParts {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DbUrlParts {
    /// Build a connection URL. Credentials are used verbatim, so passwords with
    /// URL-reserved characters should go through `DATABASE_URL` instead.
    pub fn to_url(&self, driver: DbDriver) -> String {
        match driver {
            DbDriver::Postgres => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
            DbDriver::Mysql => format!(
                "mysql://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
            DbDriver::Sqlite => format!("sqlite://{}.db?mode=rwc", self.name),
        }
    }
}

/// Configuration for the blog database.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub driver: DbDriver,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load from `DATABASE_URL`, or assemble from `DB_DRIVER`, `DB_HOST`,
    /// `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
    pub fn from_env() -> Self {
        let driver = DbDriver::from_name(&env_or("DB_DRIVER", "mysql"));

        let url = match env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()) {
            Some(url) => url,
            None => DbUrlParts {
                host: env_or("DB_HOST", "localhost"),
                port: env_or("DB_PORT", driver.default_port()),
                user: env_or("DB_USER", "root"),
                password: env_or("DB_PASSWORD", ""),
                name: env_or("DB_NAME", "simple_blog"),
            }
            .to_url(driver),
        };

        Self {
            driver,
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        }
    }

    /// Private in-memory SQLite database. One connection, so every query sees
    /// the same data.
    pub fn sqlite_memory() -> Self {
        Self {
            driver: DbDriver::Sqlite,
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }

    /// The connection URL with any password replaced by `***`.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        match rest.rsplit_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}", scheme, user, host)
            }
            None => self.url.clone(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Connection pool for the blog database.
#[cfg(feature = "database")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "database")]
impl DatabaseConnections {
    /// Connect and make sure every table exists.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!(
            driver = ?config.driver,
            url = %config.redacted_url(),
            "Initializing database connection..."
        );

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "Database connected");

        super::schema::ensure_schema(&main).await?;

        Ok(Self { main })
    }
}
