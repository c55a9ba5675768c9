use crate::config::PoolConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};

/// Opens the process-wide connection pool. Handlers borrow connections from it
/// per statement; the pool itself lives for the lifetime of the server.
pub async fn init_db(database_url: &str, pool: &PoolConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(pool.max_connections)
        .min_connections(pool.min_connections)
        .connect_timeout(pool.connect_timeout)
        .acquire_timeout(pool.acquire_timeout)
        .idle_timeout(pool.idle_timeout)
        .sqlx_logging(pool.sql_logging);

    let db = Database::connect(opt).await?;
    log::info!(
        "Database pool ready ({:?}, max {} connections).",
        db.get_database_backend(),
        pool.max_connections
    );

    Ok(db)
}
