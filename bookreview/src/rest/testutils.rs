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
use crate::model::testutils::{book_fields, review_fields};
use crate::model::*;
use crate::rest::app;
use axum::Router;
use iii_iv_core::db::{Db, DbError, Executor};
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

    /// Obtains a direct executor against the database.
    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Stores a new book bypassing the app.
    pub(crate) async fn put_book(&self, title: &str, author: &str, year: i64) -> BookId {
        db::create_book(&mut self.ex().await, &book_fields(title, author, year)).await.unwrap()
    }

    /// Stores a new review for `book_id` bypassing the app.
    pub(crate) async fn put_review(&self, book_id: BookId, text: &str, rating: f64) -> ReviewId {
        db::create_review(&mut self.ex().await, book_id, &review_fields(text, rating))
            .await
            .unwrap()
    }

    /// Gets all books directly from the database.
    pub(crate) async fn get_books(&self) -> Vec<Book> {
        db::get_books(&mut self.ex().await, &BookFilter::default()).await.unwrap()
    }

    /// Gets all reviews directly from the database.
    pub(crate) async fn get_reviews(&self) -> Vec<Review> {
        db::get_reviews(&mut self.ex().await).await.unwrap()
    }

    /// Gets the review identified by `id` directly from the database, if it exists.
    pub(crate) async fn get_review(&self, id: ReviewId) -> Option<Review> {
        match db::get_review(&mut self.ex().await, id).await {
            Ok(review) => Some(review),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Failed to query review: {}", e),
        }
    }
}
