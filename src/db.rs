use anyhow::{Context, Result};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Builds an r2d2 connection pool for the given SQLite database URL
///
/// ### Errors
///
/// Returns an error if the pool cannot open its initial connections
pub fn init_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .with_context(|| format!("Failed to create pool for {}", database_url))
}
