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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use iii_iv_core::db::{Db, DbError};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app against a fresh in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(iii_iv_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    /// Returns a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Stores `fields` as a new address bypassing the app.
    pub(crate) async fn put_address(&self, fields: &AddressFields) -> Address {
        let id = db::create_address(&mut self.db.ex().await.unwrap(), fields).await.unwrap();
        Address::new(id, fields.clone())
    }

    /// Gets the address identified by `id` directly from the database, if it exists.
    pub(crate) async fn get_address(&self, id: AddressId) -> Option<Address> {
        match db::get_address(&mut self.db.ex().await.unwrap(), id).await {
            Ok(address) => Some(address),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Failed to query address: {}", e),
        }
    }
}
