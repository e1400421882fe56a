use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tracing::{info, instrument};

use crate::config::DatabaseSettings;
use crate::error::{AppError, Result};
use crate::storage::postgres_backend::PostgresStore;

/// Connection options from the `DATABASE_*` settings.
///
/// Empty settings are left to the driver defaults, the same way libpq treats
/// an empty keyword.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions> {
    let mut options = PgConnectOptions::new();
    if !settings.host.is_empty() {
        options = options.host(&settings.host);
    }
    if !settings.port.is_empty() {
        let port = settings
            .port
            .parse()
            .map_err(|e| AppError::connection(format!("invalid port '{}': {e}", settings.port)))?;
        options = options.port(port);
    }
    if !settings.username.is_empty() {
        options = options.username(&settings.username);
    }
    if !settings.password.is_empty() {
        options = options.password(&settings.password);
    }
    if !settings.name.is_empty() {
        options = options.database(&settings.name);
    }
    Ok(options)
}

/// Open the one connection the run uses. Postgres connections are in
/// autocommit mode unless a transaction is started, and none is.
#[instrument(err, skip(settings), fields(database = %settings.name, host = %settings.host))]
pub async fn connect(settings: &DatabaseSettings) -> Result<PostgresStore> {
    let options = connect_options(settings)?;
    let conn = PgConnection::connect_with(&options)
        .await
        .map_err(AppError::connection)?;
    info!("Connected to database");
    Ok(PostgresStore::new(conn))
}
