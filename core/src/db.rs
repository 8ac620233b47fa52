// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic abstraction to access the database.
//!
//! Services keep their state in a local single-file SQLite database.  The facilities in this module
//! hide the details of the connection pool so that the persistence layer of each service only
//! deals with an `Executor`, regardless of whether it talks to the pool directly or to an open
//! transaction.

use crate::model::ModelError;
use async_trait::async_trait;
use sqlx::Transaction;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnection};

pub mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("Already exists")]
    AlreadyExists,

    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,

    /// Indicates that the database is not available (maybe because all connections in the pool
    /// are busy).
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// Checks that a modification described by `what` touched exactly one row.
///
/// Zero rows means that the target entity does not exist.
pub fn check_one_row(rows_affected: u64, what: &str) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError(format!("{} affected more than one row", what))),
    }
}

/// A database executor that can be passed to `sqlx` operations via `conn`.
///
/// Note that this can wrap a connection obtained directly from the pool or an open transaction.
#[derive(Debug)]
pub enum Executor {
    /// An executor backed by a pooled connection.  Operations issued via this executor aren't
    /// guaranteed to be atomic with each other.
    PoolExec(PoolConnection<Sqlite>),

    /// An executor backed by a transaction.
    TxExec(Transaction<'static, Sqlite>),
}

impl Executor {
    /// Returns the raw connection to issue queries against.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        match self {
            Executor::PoolExec(conn) => &mut **conn,
            Executor::TxExec(tx) => &mut **tx,
        }
    }
}

/// A wrapper for a database executor backed by an open transaction.
pub struct TxExecutor(Executor);

impl TxExecutor {
    /// Returns the executor wrapped by this transaction.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Commits the transaction.
    pub async fn commit(self) -> DbResult<()> {
        match self.0 {
            Executor::PoolExec(_) => unreachable!("Transactions always wrap a TxExec"),
            Executor::TxExec(tx) => tx.commit().await.map_err(sqlite::map_sqlx_error),
        }
    }
}

/// Abstraction over the database connection.
#[async_trait]
pub trait Db {
    /// Obtains an executor for direct access to the pool.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    async fn ex(&self) -> DbResult<Executor>;

    /// Begins a transaction.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned executor.  Otherwise
    /// the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes all connections to the database.
    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::testutils::setup;
    use sqlx::Row;
    use std::sync::Arc;

    /// Runs a `query` on `conn` and does not care about its results.
    async fn exec(conn: &mut SqliteConnection, query: &str) {
        sqlx::query(query).execute(conn).await.unwrap();
    }

    /// Runs a `query` on `conn` that fetches a single row with an `i64` value on `column` and
    /// returns that value.
    async fn query_i64(conn: &mut SqliteConnection, column: &str, query: &str) -> i64 {
        let row = sqlx::query(query).fetch_one(conn).await.unwrap();
        row.try_get(column).unwrap()
    }

    #[tokio::test]
    async fn test_direct_execution() {
        let db = setup().await;
        exec(db.ex().await.unwrap().conn(), "CREATE TABLE test (i INTEGER)").await;
        exec(db.ex().await.unwrap().conn(), "INSERT INTO test (i) VALUES (3)").await;
        let count =
            query_i64(db.ex().await.unwrap().conn(), "count", "SELECT COUNT(*) AS count FROM test")
                .await;
        assert_eq!(1, count);
        db.close().await;
    }

    #[tokio::test]
    async fn test_tx_commit() {
        let db = setup().await;
        exec(db.ex().await.unwrap().conn(), "CREATE TABLE test (i INTEGER)").await;

        let mut tx = db.begin().await.unwrap();
        exec(tx.ex().conn(), "INSERT INTO test (i) VALUES (3)").await;
        tx.commit().await.unwrap();

        let count =
            query_i64(db.ex().await.unwrap().conn(), "count", "SELECT COUNT(*) AS count FROM test")
                .await;
        assert_eq!(1, count);
        db.close().await;
    }

    #[tokio::test]
    async fn test_tx_rollback_on_drop() {
        let db = setup().await;
        exec(db.ex().await.unwrap().conn(), "CREATE TABLE test (i INTEGER)").await;

        {
            let mut tx = db.begin().await.unwrap();
            exec(tx.ex().conn(), "INSERT INTO test (i) VALUES (3)").await;
        }

        let count =
            query_i64(db.ex().await.unwrap().conn(), "count", "SELECT COUNT(*) AS count FROM test")
                .await;
        assert_eq!(0, count);
        db.close().await;
    }

    #[tokio::test]
    async fn test_begin_tx_after_drop() {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(setup().await);

        let tx1 = db.clone().begin().await.unwrap();
        tx1.commit().await.unwrap();

        let tx2 = db.begin().await.unwrap();
        tx2.commit().await.unwrap();

        db.close().await;
    }

    #[test]
    fn test_check_one_row() {
        assert_eq!(Ok(()), check_one_row(1, "Update"));
        assert_eq!(Err(DbError::NotFound), check_one_row(0, "Update"));
        assert_eq!(
            Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
            check_one_row(2, "Deletion")
        );
    }
}
