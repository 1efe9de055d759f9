//! Session state: at most one live connection per backend kind.
//!
//! `DbSession` is the per-process context handlers receive instead of
//! ambient globals. Each backend moves through `Unconfigured -> Configured
//! -> Connected`; a `connect_*` call replaces the configuration wholesale,
//! closing any prior handle first, and there is no way back to
//! `Unconfigured` short of process shutdown.
//!
//! Connections are lazy (opened on first use after configuration) and
//! idempotent (repeated ensures reuse the live handle). A failed close
//! during replacement is logged and swallowed so reconnection can proceed.
//! The per-backend mutex also serializes reconfiguration against in-flight
//! requests, so a handle is never swapped out under a running call.

use crate::error::{DbError, DbResult};
use crate::models::{BackendKind, MongoConfig, MySqlConfig};
use mongodb::bson::doc;
use mongodb::{Client, Database};
use sqlx::mysql::MySqlConnection;
use sqlx::{ConnectOptions, Connection};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{info, warn};

#[derive(Default)]
struct MySqlState {
    config: Option<MySqlConfig>,
    conn: Option<MySqlConnection>,
}

#[derive(Default)]
struct MongoState {
    config: Option<MongoConfig>,
    client: Option<Client>,
    database: Option<Database>,
}

/// Owns the two backend connection states for the lifetime of the process.
pub struct DbSession {
    mysql: Mutex<MySqlState>,
    mongo: Mutex<MongoState>,
    default_mongo_uri: String,
    mysql_connect_timeout_secs: Option<u64>,
}

impl DbSession {
    /// Create a session with no backend configured.
    ///
    /// `default_mongo_uri` is the process-wide fallback used when
    /// connect_mongodb is called with only a database name.
    pub fn new(default_mongo_uri: impl Into<String>) -> Self {
        Self {
            mysql: Mutex::new(MySqlState::default()),
            mongo: Mutex::new(MongoState::default()),
            default_mongo_uri: default_mongo_uri.into(),
            mysql_connect_timeout_secs: None,
        }
    }

    /// Set the process-wide MySQL connect timeout carried into every
    /// resolved configuration that does not declare its own.
    pub fn with_mysql_connect_timeout(mut self, secs: u64) -> Self {
        self.mysql_connect_timeout_secs = Some(secs);
        self
    }

    /// The fallback MongoDB URI for discrete-field resolution.
    pub fn default_mongo_uri(&self) -> &str {
        &self.default_mongo_uri
    }

    /// Fill process-wide defaults into a resolved configuration.
    fn apply_mysql_defaults(&self, mut config: MySqlConfig) -> MySqlConfig {
        config.connect_timeout_secs = config
            .connect_timeout_secs
            .or(self.mysql_connect_timeout_secs);
        config
    }

    /// Replace the MySQL configuration and eagerly connect.
    ///
    /// The prior handle, if any, is fully closed before the new
    /// configuration is assigned; a close failure is logged, not propagated.
    /// A connect failure leaves the backend Configured so a later call can
    /// retry lazily.
    pub async fn reconfigure_mysql(&self, config: MySqlConfig) -> DbResult<()> {
        let config = self.apply_mysql_defaults(config);
        let mut state = self.mysql.lock().await;

        if let Some(conn) = state.conn.take() {
            if let Err(e) = conn.close().await {
                warn!(error = %e, "Failed to close previous MySQL connection");
            }
        }

        info!(target = %config.masked(), "MySQL configuration replaced");
        state.config = Some(config);
        ensure_mysql(&mut state).await?;
        Ok(())
    }

    /// Get the live MySQL connection, establishing it if needed.
    ///
    /// Fails with invalid_request while Unconfigured and internal_error when
    /// the driver cannot connect.
    pub async fn mysql_conn(&self) -> DbResult<MappedMutexGuard<'_, MySqlConnection>> {
        let mut state = self.mysql.lock().await;
        ensure_mysql(&mut state).await?;
        MutexGuard::try_map(state, |s| s.conn.as_mut())
            .map_err(|_| DbError::internal("MySQL connection state lost"))
    }

    /// Replace the MongoDB configuration and eagerly connect.
    pub async fn reconfigure_mongo(&self, config: MongoConfig) -> DbResult<()> {
        let mut state = self.mongo.lock().await;

        state.database = None;
        if let Some(client) = state.client.take() {
            client.shutdown().await;
        }

        info!(target = %config.masked(), "MongoDB configuration replaced");
        state.config = Some(config);
        ensure_mongo(&mut state).await?;
        Ok(())
    }

    /// Get the database handle for the configured MongoDB backend,
    /// establishing the client if needed. The handle is cheap to clone and
    /// detached from the session lock.
    pub async fn mongo_database(&self) -> DbResult<Database> {
        let mut state = self.mongo.lock().await;
        ensure_mongo(&mut state).await?;
        state
            .database
            .clone()
            .ok_or_else(|| DbError::internal("MongoDB connection state lost"))
    }

    /// Close both backends, best-effort. Called on process shutdown.
    pub async fn close_all(&self) {
        let mut mysql = self.mysql.lock().await;
        if let Some(conn) = mysql.conn.take() {
            if let Err(e) = conn.close().await {
                warn!(error = %e, "Failed to close MySQL connection on shutdown");
            }
        }

        let mut mongo = self.mongo.lock().await;
        mongo.database = None;
        if let Some(client) = mongo.client.take() {
            client.shutdown().await;
        }
    }
}

async fn ensure_mysql(state: &mut MySqlState) -> DbResult<()> {
    let config = state
        .config
        .as_ref()
        .ok_or_else(|| DbError::not_configured(BackendKind::MySql))?;

    if state.conn.is_none() {
        let conn = config.connect_options().connect().await.map_err(|e| {
            DbError::internal(format!("Failed to connect to database: {}", e))
        })?;
        info!(target = %config.masked(), "MySQL connection established");
        state.conn = Some(conn);
    }
    Ok(())
}

async fn ensure_mongo(state: &mut MongoState) -> DbResult<()> {
    let config = state
        .config
        .as_ref()
        .ok_or_else(|| DbError::not_configured(BackendKind::Mongo))?;

    if state.client.is_none() {
        let client = Client::with_uri_str(&config.uri).await.map_err(|e| {
            DbError::internal(format!("Failed to connect to MongoDB: {}", e))
        })?;
        let database = client.database(&config.database);

        // The driver connects lazily; ping so a bad target surfaces now
        database.run_command(doc! { "ping": 1 }).await.map_err(|e| {
            DbError::internal(format!("Failed to connect to MongoDB: {}", e))
        })?;

        info!(target = %config.masked(), "MongoDB connection established");
        state.client = Some(client);
        state.database = Some(database);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mysql_unconfigured_is_invalid_request() {
        let session = DbSession::new("mongodb://localhost:27017");
        let err = session.mysql_conn().await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotConfigured {
                backend: BackendKind::MySql
            }
        ));
    }

    #[tokio::test]
    async fn test_mongo_unconfigured_is_invalid_request() {
        let session = DbSession::new("mongodb://localhost:27017");
        let err = session.mongo_database().await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotConfigured {
                backend: BackendKind::Mongo
            }
        ));
    }

    #[tokio::test]
    async fn test_backends_are_independent() {
        // Configuring one backend must not touch the other's state.
        let session = DbSession::new("mongodb://localhost:27017");
        let err = session.mongo_database().await.unwrap_err();
        assert!(matches!(err, DbError::NotConfigured { .. }));
        let err = session.mysql_conn().await.unwrap_err();
        assert!(matches!(err, DbError::NotConfigured { .. }));
    }

    #[tokio::test]
    async fn test_close_all_on_fresh_session_is_noop() {
        let session = DbSession::new("mongodb://localhost:27017");
        session.close_all().await;
        // Still Unconfigured afterwards
        assert!(session.mysql_conn().await.is_err());
    }

    #[test]
    fn test_default_mongo_uri_accessor() {
        let session = DbSession::new("mongodb://example:27017");
        assert_eq!(session.default_mongo_uri(), "mongodb://example:27017");
    }

    fn mysql_config() -> MySqlConfig {
        MySqlConfig {
            host: "h".to_string(),
            port: None,
            user: "u".to_string(),
            password: "p".to_string(),
            database: "d".to_string(),
            ssl: None,
            connect_timeout_secs: None,
        }
    }

    #[test]
    fn test_connect_timeout_default_applied_to_config() {
        let session = DbSession::new("mongodb://localhost:27017").with_mysql_connect_timeout(15);
        let config = session.apply_mysql_defaults(mysql_config());
        assert_eq!(config.connect_timeout_secs, Some(15));
    }

    #[test]
    fn test_connect_timeout_does_not_override_config_value() {
        let session = DbSession::new("mongodb://localhost:27017").with_mysql_connect_timeout(15);
        let mut config = mysql_config();
        config.connect_timeout_secs = Some(3);
        let config = session.apply_mysql_defaults(config);
        assert_eq!(config.connect_timeout_secs, Some(3));
    }

    #[test]
    fn test_no_connect_timeout_default_leaves_config_unset() {
        let session = DbSession::new("mongodb://localhost:27017");
        let config = session.apply_mysql_defaults(mysql_config());
        assert_eq!(config.connect_timeout_secs, None);
    }
}
