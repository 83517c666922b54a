use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::error::AppResult;

const PRAGMAS: [&str; 3] =
    ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA cache_size=-64000"];

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> AppResult<DatabaseConnection> {
    let in_memory = is_in_memory(database_url);

    let mut opts = ConnectOptions::new(database_url.to_string());
    opts.sqlx_logging(false);
    if in_memory {
        // each pooled connection would otherwise open its own empty database
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(max_connections.max(1));
    }

    let db = Database::connect(opts).await?;

    if !in_memory {
        for pragma in PRAGMAS {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    Migrator::up(&db, None).await?;
    info!(in_memory = in_memory, "database ready");
    Ok(db)
}

pub async fn close(db: DatabaseConnection) -> AppResult<()> {
    db.close().await?;
    info!("database connection closed");
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::is_in_memory;

    #[test]
    fn detects_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:catalog?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://cinedex.db?mode=rwc"));
    }
}
