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

//! Common utilities to interact with an SQLite database.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use crate::env::get_optional_var;
use async_trait::async_trait;
use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;

/// Default value for the `path` configuration property.
const DEFAULT_PATH: &str = "sql_app.db";

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::PoolTimedOut => DbError::Unavailable,
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("FOREIGN KEY constraint failed") => DbError::NotFound,
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Options to open a file-backed SQLite database.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct SqliteOptions {
    /// Path to the database file.  The file is created if it does not exist yet.
    pub path: PathBuf,

    /// Maximum number of connections to allow against the database.
    pub max_connections: Option<u32>,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_PATH), max_connections: None }
    }
}

impl SqliteOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_PATH` and `<prefix>_MAX_CONNECTIONS`.
    pub fn from_env(prefix: &str) -> Result<SqliteOptions, String> {
        Ok(SqliteOptions {
            path: get_optional_var::<PathBuf>(prefix, "PATH")?
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH)),
            max_connections: get_optional_var::<u32>(prefix, "MAX_CONNECTIONS")?,
        })
    }
}

/// Opens the file-backed database described by `opts`, creating it if necessary.
pub async fn connect_file(opts: SqliteOptions) -> DbResult<SqliteDb> {
    info!("Opening database {}", opts.path.display());
    let conn_opts = SqliteConnectOptions::new().filename(&opts.path).create_if_missing(true);
    let mut pool_opts = SqlitePoolOptions::new();
    if let Some(max_connections) = opts.max_connections {
        pool_opts = pool_opts.max_connections(max_connections);
    }
    let pool = pool_opts.connect_with(conn_opts).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// Creates a new connection pool against the database described by `conn_str`.
///
/// `conn_str` can be `:memory:` to get a fresh in-memory database shared by all the connections in
/// the pool.
pub async fn connect(conn_str: &str) -> DbResult<SqliteDb> {
    let conn_opts = SqliteConnectOptions::from_str(conn_str).map_err(map_sqlx_error)?;
    let pool = SqlitePool::connect_with(conn_opts).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// A database instance backed by an SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::PoolExec(conn))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::TxExec(tx)))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
///
/// The `schema` can contain multiple statements and should be idempotent because services run it
/// every time they start.
pub async fn run_schema(ex: &mut Executor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(ex.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes the test database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}
