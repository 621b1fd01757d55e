use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection,
    sqlx::sqlite::{SqliteJournalMode, SqliteSynchronous},
};

use crate::error::AppResult;

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url);
    if database_url.contains(":memory:") {
        // every pooled connection would otherwise get its own empty database
        opts.max_connections(1).min_connections(1);
    }
    // pragmas are per connection, so they go on the connect options
    opts.map_sqlx_sqlite_opts(|sqlite| {
        sqlite
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
    });

    let db = Database::connect(opts).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Statement, TransactionTrait};

    use super::*;

    async fn pragma(db: &DatabaseConnection, name: &str) -> i32 {
        let row = db
            .query_one(Statement::from_string(db.get_database_backend(), format!("PRAGMA {name}")))
            .await
            .expect("query")
            .expect("row");
        row.try_get_by_index(0).expect("value")
    }

    #[tokio::test]
    async fn every_connection_gets_pragmas() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("movies.db").display());
        let db = connect_and_migrate(&url).await.expect("db");

        let mut held = Vec::new();
        for _ in 0..3 {
            // synchronous=NORMAL is 1, foreign_keys=ON is 1
            assert_eq!(pragma(&db, "synchronous").await, 1);
            assert_eq!(pragma(&db, "foreign_keys").await, 1);
            held.push(db.begin().await.expect("txn"));
        }
    }
}
