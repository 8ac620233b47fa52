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

//! Generic business logic for any service.
//!
//! Every service should implement its own `Driver` type.  In most cases, this type will only hold
//! the database handle, and as such the definition will look like this:
//!
//! ```rust
//! use iii_iv_core::db::Db;
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! pub struct Driver {
//!     /// The database that the driver uses for persistence.
//!     db: Arc<dyn Db + Send + Sync>,
//!
//!     // ... other fields here ...
//! }
//! ```
//!
//! Every operation implemented in the `Driver` should consume `self` because this is the layer
//! that coordinates multiple operations against the database inside a single transaction.
//! Consuming `self` prevents the caller from easily issuing multiple operations against the driver,
//! as this would require a clone and highlight an undesirable pattern.

use crate::db::{DbError, DbResult};
use log::warn;
use std::fmt;

/// Business logic errors.  These errors encompass backend and logical errors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DriverError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("{0}")]
    AlreadyExists(String),

    /// Catch-all error type for unexpected database errors.
    #[error("{0}")]
    BackendError(String),

    /// Indicates an error in the input data.
    #[error("{0}")]
    InvalidInput(String),

    /// Indicates that a requested entry does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl From<DbError> for DriverError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::AlreadyExists => DriverError::AlreadyExists(e.to_string()),
            DbError::BackendError(_) => DriverError::BackendError(e.to_string()),
            DbError::DataIntegrityError(_) => DriverError::BackendError(e.to_string()),
            DbError::NotFound => DriverError::NotFound(e.to_string()),
            DbError::Unavailable => DriverError::BackendError(e.to_string()),
        }
    }
}

/// Result type for this module.
pub type DriverResult<T> = Result<T, DriverError>;

/// Extension trait to replace the generic messages of database errors with messages that make
/// sense to the caller of a specific operation.
pub trait DbResultExt<T> {
    /// Converts a `DbError::NotFound` into a `DriverError::NotFound` carrying `message`.  Any other
    /// error is converted as usual.
    fn or_not_found(self, message: &str) -> DriverResult<T>;

    /// Converts a `DbError::AlreadyExists` into a `DriverError::AlreadyExists` carrying `message`.
    /// Any other error is converted as usual.
    fn or_already_exists(self, message: &str) -> DriverResult<T>;
}

impl<T> DbResultExt<T> for DbResult<T> {
    fn or_not_found(self, message: &str) -> DriverResult<T> {
        self.map_err(|e| match e {
            DbError::NotFound => DriverError::NotFound(message.to_owned()),
            e => DriverError::from(e),
        })
    }

    fn or_already_exists(self, message: &str) -> DriverResult<T> {
        self.map_err(|e| match e {
            DbError::AlreadyExists => DriverError::AlreadyExists(message.to_owned()),
            e => DriverError::from(e),
        })
    }
}

/// Logs a warning if `result` says that the `kind` entity identified by `id` does not exist.
///
/// `result` is returned unchanged.
pub fn warn_if_not_found<T, I: fmt::Display>(
    result: DriverResult<T>,
    kind: &str,
    id: I,
) -> DriverResult<T> {
    result.inspect_err(|e| {
        if let DriverError::NotFound(_) = e {
            warn!("{} {} not found", kind, id);
        }
    })
}
